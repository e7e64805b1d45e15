use std::fmt;

use crate::hash::Tth;
use crate::units::parse_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBound {
    AtLeast(u64),
    AtMost(u64),
}

/// File type filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileType {
    #[default]
    Any,
    Audio,
    Archive,
    Document,
    Executable,
    Image,
    Video,
    Directory,
    /// Exact content hash, set whenever a TTH is given
    Tth,
}

impl FileType {
    /// Types selectable with `-t`, in numeric code order starting at 1.
    const SELECTABLE: [FileType; 8] = [
        Self::Any,
        Self::Audio,
        Self::Archive,
        Self::Document,
        Self::Executable,
        Self::Image,
        Self::Video,
        Self::Directory,
    ];

    /// Parse a `-t` operand: a code from 1 to 8 or a keyword.
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(code) = input.parse::<usize>() {
            return code.checked_sub(1).and_then(|i| Self::SELECTABLE.get(i)).copied();
        }
        let input = input.to_ascii_lowercase();
        Self::SELECTABLE.into_iter().find(|t| t.keyword() == input)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Document => "doc",
            Self::Executable => "exe",
            Self::Image => "img",
            Self::Video => "video",
            Self::Directory => "dir",
            Self::Tth => "tth",
        }
    }
}

/// Which hubs a search is sent to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    CurrentHub,
    AllHubs,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Option {0} expects an argument.")]
    MissingOperand(String),
    #[error("Invalid size '{value}' for {flag}.")]
    InvalidSize { flag: String, value: String },
    #[error("Unknown file type '{value}' for {flag}.")]
    InvalidType { flag: String, value: String },
    #[error("Invalid TTH '{value}' for {flag}.")]
    InvalidTth { flag: String, value: String },
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("No search query given.")]
    Empty,
    #[error("Invalid argument: {0}")]
    Syntax(String),
}

/// A search request for the protocol engine.
///
/// Syntax accepted by [`SearchQuery::parse`]:
/// - `foo bar` - every term must match
/// - `"foo bar"` - quoting keeps a term together
/// - `-hub` / `-all` - search the current hub (default) or all hubs
/// - `-le <size>` / `-ge <size>` - size at most / at least, e.g. `700M`
/// - `-t <type>` - 1 to 8 or any, audio, archive, doc, exe, img, video, dir
/// - `-tth <hash>` - exact content hash
/// - `--` - everything after it is a term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: Vec<String>,
    pub size: Option<SizeBound>,
    pub file_type: FileType,
    pub tth: Option<Tth>,
    pub scope: SearchScope,
}

impl SearchQuery {
    pub fn parse(args: &str) -> Result<Self, SearchError> {
        let tokens = shell_words::split(args).map_err(|e| SearchError::Syntax(e.to_string()))?;
        Self::from_args(&tokens)
    }

    /// Build a query from already split tokens.
    pub fn from_args<S: AsRef<str>>(tokens: &[S]) -> Result<Self, SearchError> {
        let mut query = SearchQuery::default();
        let mut tokens = tokens.iter().map(AsRef::<str>::as_ref);
        let mut terms_only = false;

        while let Some(token) = tokens.next() {
            if terms_only || !token.starts_with('-') {
                query.terms.push(token.to_string());
                continue;
            }
            match token {
                "--" => terms_only = true,
                "-hub" => query.scope = SearchScope::CurrentHub,
                "-all" => query.scope = SearchScope::AllHubs,
                "-le" | "-ge" => {
                    let value = operand(token, tokens.next())?;
                    let bytes = parse_size(value).ok_or_else(|| SearchError::InvalidSize {
                        flag: token.to_string(),
                        value: value.to_string(),
                    })?;
                    query.size = Some(if token == "-le" {
                        SizeBound::AtMost(bytes)
                    } else {
                        SizeBound::AtLeast(bytes)
                    });
                }
                "-t" => {
                    let value = operand(token, tokens.next())?;
                    query.file_type = FileType::parse(value).ok_or_else(|| SearchError::InvalidType {
                        flag: token.to_string(),
                        value: value.to_string(),
                    })?;
                }
                "-tth" => {
                    let value = operand(token, tokens.next())?;
                    let tth = value.parse::<Tth>().map_err(|()| SearchError::InvalidTth {
                        flag: token.to_string(),
                        value: value.to_string(),
                    })?;
                    query.tth = Some(tth);
                }
                _ => return Err(SearchError::UnknownOption(token.to_string())),
            }
        }

        if query.tth.is_some() {
            query.file_type = FileType::Tth;
        } else if query.terms.is_empty() {
            return Err(SearchError::Empty);
        }
        Ok(query)
    }
}

fn operand<'a>(flag: &str, value: Option<&'a str>) -> Result<&'a str, SearchError> {
    value.ok_or_else(|| SearchError::MissingOperand(flag.to_string()))
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tth {
            Some(tth) => write!(f, "TTH {tth}"),
            None => write!(f, "'{}'", self.terms.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_TTH: &str = "LWPNACQDBZRYXW3VHJVCJ64QBZNGHOHHHZWCLNQ";

    #[test]
    fn parse_type_size_and_terms() {
        let query = SearchQuery::from_args(&["-t", "video", "-ge", "10M", "foo", "bar"]).unwrap();
        assert_eq!(query.terms, vec!["foo", "bar"]);
        assert_eq!(query.file_type, FileType::Video);
        assert_eq!(query.size, Some(SizeBound::AtLeast(10 << 20)));
        assert_eq!(query.scope, SearchScope::CurrentHub);
        assert_eq!(query.tth, None);
    }

    #[test]
    fn parse_missing_operand() {
        assert_eq!(
            SearchQuery::from_args(&["foo", "-ge"]),
            Err(SearchError::MissingOperand("-ge".into()))
        );
        let err = SearchQuery::parse("foo -ge").unwrap_err();
        assert_eq!(err.to_string(), "Option -ge expects an argument.");
    }

    #[test]
    fn parse_invalid_operands_name_the_flag() {
        assert_eq!(
            SearchQuery::parse("-le huge foo"),
            Err(SearchError::InvalidSize {
                flag: "-le".into(),
                value: "huge".into()
            })
        );
        assert!(matches!(
            SearchQuery::parse("-t 9 foo"),
            Err(SearchError::InvalidType { .. })
        ));
        assert!(matches!(
            SearchQuery::parse("-tth nothash"),
            Err(SearchError::InvalidTth { .. })
        ));
        assert_eq!(
            SearchQuery::parse("-x foo"),
            Err(SearchError::UnknownOption("-x".into()))
        );
    }

    #[test]
    fn parse_quoted_terms() {
        let query = SearchQuery::parse("\"error handling\" -all pdf").unwrap();
        assert_eq!(query.terms, vec!["error handling", "pdf"]);
        assert_eq!(query.scope, SearchScope::AllHubs);
    }

    #[test]
    fn parse_double_dash_ends_options() {
        let query = SearchQuery::parse("-t audio -- -le -t").unwrap();
        assert_eq!(query.terms, vec!["-le", "-t"]);
        assert_eq!(query.file_type, FileType::Audio);
        assert_eq!(query.size, None);
    }

    #[test]
    fn last_option_wins() {
        let query = SearchQuery::parse("-all -hub -ge 1k -le 2k -t 2 -t exe foo").unwrap();
        assert_eq!(query.scope, SearchScope::CurrentHub);
        assert_eq!(query.size, Some(SizeBound::AtMost(2048)));
        assert_eq!(query.file_type, FileType::Executable);
    }

    #[test]
    fn tth_forces_type_and_allows_no_terms() {
        let query = SearchQuery::parse(&format!("-t video -tth {EMPTY_TTH}")).unwrap();
        assert_eq!(query.file_type, FileType::Tth);
        assert!(query.terms.is_empty());
        assert_eq!(query.to_string(), format!("TTH {EMPTY_TTH}"));
    }

    #[test]
    fn empty_query() {
        assert_eq!(SearchQuery::parse(""), Err(SearchError::Empty));
        assert_eq!(SearchQuery::parse("-all -t img"), Err(SearchError::Empty));
    }

    #[test]
    fn unbalanced_quote() {
        assert!(matches!(
            SearchQuery::parse("\"foo"),
            Err(SearchError::Syntax(_))
        ));
    }

    #[test]
    fn file_type_codes() {
        assert_eq!(FileType::parse("1"), Some(FileType::Any));
        assert_eq!(FileType::parse("8"), Some(FileType::Directory));
        assert_eq!(FileType::parse("0"), None);
        assert_eq!(FileType::parse("DOC"), Some(FileType::Document));
    }
}

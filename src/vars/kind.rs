//! Value kinds: parsing raw text, formatting typed values, and suggestions.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;

use crate::units;

/// Declared type of a variable.
#[derive(Debug, Clone, Copy)]
pub enum VarKind {
    Bool,
    Int { min: i64, max: i64 },
    Str,
    Enum(&'static [&'static str]),
    Path,
    Regex,
    Interval,
    Speed,
    Colors,
}

/// A parsed variable value.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Path(PathBuf),
    Regex(Regex),
    /// Seconds.
    Interval(u64),
    /// Bytes per second.
    Speed(u64),
    Colors(ColorSpec),
}

impl VarKind {
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Bool => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| "Invalid boolean value, use true or false.".to_string()),
            Self::Int { min, max } => {
                let n: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| "Invalid number.".to_string())?;
                if n < *min || n > *max {
                    return Err(format!("Number must be between {} and {}.", min, max));
                }
                Ok(Value::Int(n))
            }
            Self::Str => Ok(Value::Str(raw.to_string())),
            Self::Enum(options) => options
                .iter()
                .find(|o| o.eq_ignore_ascii_case(raw.trim()))
                .map(|o| Value::Str(o.to_string()))
                .ok_or_else(|| format!("Invalid value, must be one of: {}.", options.join(", "))),
            Self::Path => parse_path(raw).map(Value::Path),
            Self::Regex => Regex::new(raw)
                .map(Value::Regex)
                .map_err(|e| format!("Invalid regular expression: {}", e)),
            Self::Interval => units::parse_interval(raw)
                .map(Value::Interval)
                .ok_or_else(|| "Invalid interval, use e.g. 30s, 5m or 1h30m.".to_string()),
            Self::Speed => units::parse_speed(raw)
                .map(Value::Speed)
                .ok_or_else(|| "Invalid speed, use e.g. 500K or 2M/s.".to_string()),
            Self::Colors => ColorSpec::parse(raw).map(Value::Colors),
        }
    }

    /// Completions for a partially typed value.
    pub fn suggest(&self, fragment: &str) -> Vec<String> {
        match self {
            Self::Bool => complete_from(&["false", "true"], fragment),
            Self::Enum(options) => complete_from(options, fragment),
            Self::Colors => {
                let (head, last) = match fragment.rfind(',') {
                    Some(i) => fragment.split_at(i + 1),
                    None => ("", fragment),
                };
                complete_from(COLOR_WORDS, last)
                    .into_iter()
                    .map(|w| format!("{}{}", head, w))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Type label shown in help output.
    pub fn label(&self) -> String {
        match self {
            Self::Bool => "<boolean>".to_string(),
            Self::Int { .. } => "<integer>".to_string(),
            Self::Str => "<string>".to_string(),
            Self::Enum(options) => options.join("|"),
            Self::Path => "<path>".to_string(),
            Self::Regex => "<regex>".to_string(),
            Self::Interval => "<interval>".to_string(),
            Self::Speed => "<speed>".to_string(),
            Self::Colors => "<color>".to_string(),
        }
    }
}

impl Value {
    /// Canonical text for storage; always parses back to the same value.
    pub fn raw(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::Path(p) => p.display().to_string(),
            Self::Regex(r) => r.as_str().to_string(),
            Self::Interval(s) => s.to_string(),
            Self::Speed(b) => b.to_string(),
            Self::Colors(c) => c.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval(s) => f.write_str(&units::format_interval(*s)),
            Self::Speed(b) => f.write_str(&units::format_speed(*b)),
            other => f.write_str(&other.raw()),
        }
    }
}

fn complete_from(words: &[&str], fragment: &str) -> Vec<String> {
    words
        .iter()
        .filter(|w| w.starts_with(fragment))
        .map(|w| w.to_string())
        .collect()
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "y" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "n" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_path(raw: &str) -> Result<PathBuf, String> {
    let raw = raw.trim();
    let path = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = dirs::home_dir().ok_or("Could not determine home directory.")?;
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };
    if !path.is_absolute() {
        return Err("Path must be absolute.".to_string());
    }
    Ok(path)
}

/// Sorted color and attribute names.
const COLOR_WORDS: &[&str] = &[
    "black",
    "blink",
    "blue",
    "bold",
    "cyan",
    "default",
    "green",
    "magenta",
    "red",
    "reverse",
    "underline",
    "white",
    "yellow",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    White,
    Yellow,
}

impl Color {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "default" => Self::Default,
            "black" => Self::Black,
            "blue" => Self::Blue,
            "cyan" => Self::Cyan,
            "green" => Self::Green,
            "magenta" => Self::Magenta,
            "red" => Self::Red,
            "white" => Self::White,
            "yellow" => Self::Yellow,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Black => "black",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Magenta => "magenta",
            Self::Red => "red",
            Self::White => "white",
            Self::Yellow => "yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Attr {
    Blink,
    Bold,
    Reverse,
    Underline,
}

impl Attr {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "blink" => Self::Blink,
            "bold" => Self::Bold,
            "reverse" => Self::Reverse,
            "underline" => Self::Underline,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blink => "blink",
            Self::Bold => "bold",
            Self::Reverse => "reverse",
            Self::Underline => "underline",
        }
    }
}

/// Foreground, background and attributes, written as `fg[,bg][,attr...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorSpec {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Vec<Attr>,
}

impl ColorSpec {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut spec = ColorSpec::default();
        let mut colors = 0;
        for word in raw.split(',') {
            let word = word.trim().to_ascii_lowercase();
            if word.is_empty() {
                return Err("Empty color name.".to_string());
            }
            if let Some(color) = Color::from_name(&word) {
                match colors {
                    0 => spec.fg = color,
                    1 => spec.bg = color,
                    _ => return Err("Too many colors, at most a foreground and background.".to_string()),
                }
                colors += 1;
            } else if let Some(attr) = Attr::from_name(&word) {
                if !spec.attrs.contains(&attr) {
                    spec.attrs.push(attr);
                }
            } else {
                return Err(format!("Unknown color or attribute: {}", word));
            }
        }
        spec.attrs.sort();
        Ok(spec)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        if self.fg != Color::Default || self.bg != Color::Default {
            words.push(self.fg.name());
        }
        if self.bg != Color::Default {
            words.push(self.bg.name());
        }
        words.extend(self.attrs.iter().map(Attr::name));
        if words.is_empty() {
            words.push("default");
        }
        f.write_str(&words.join(","))
    }
}

//! Key binding documentation.
//!
//! Informational only: the bindings themselves are installed by the binary.

/// Group of related bindings, selectable with `/help keys <section>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySection {
    Tabs,
    Editing,
    Completion,
}

impl KeySection {
    pub fn all() -> [Self; 3] {
        [Self::Tabs, Self::Editing, Self::Completion]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::Editing => "editing",
            Self::Completion => "completion",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Tabs => "Switching tabs",
            Self::Editing => "Editing the input line",
            Self::Completion => "Tab completion",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.name() == name)
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        Shortcut::all()
            .into_iter()
            .filter(|s| s.section() == *self)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    PrevTab,
    NextTab,
    Submit,
    HistoryUp,
    HistoryDown,
    LineStart,
    LineEnd,
    DeleteWord,
    CutToEnd,
    ClearScreen,
    Quit,
    Complete,
    NextCandidate,
    PrevCandidate,
    CloseMenu,
}

impl Shortcut {
    pub fn all() -> Vec<Self> {
        vec![
            Self::PrevTab,
            Self::NextTab,
            Self::Submit,
            Self::HistoryUp,
            Self::HistoryDown,
            Self::LineStart,
            Self::LineEnd,
            Self::DeleteWord,
            Self::CutToEnd,
            Self::ClearScreen,
            Self::Quit,
            Self::Complete,
            Self::NextCandidate,
            Self::PrevCandidate,
            Self::CloseMenu,
        ]
    }

    /// Human-readable key representation for help display.
    pub fn key_display(&self) -> &'static str {
        match self {
            Self::PrevTab => "Alt+Left",
            Self::NextTab => "Alt+Right",
            Self::Submit => "Enter",
            Self::HistoryUp => "Up",
            Self::HistoryDown => "Down",
            Self::LineStart => "Ctrl+A",
            Self::LineEnd => "Ctrl+E",
            Self::DeleteWord => "Ctrl+W",
            Self::CutToEnd => "Ctrl+K",
            Self::ClearScreen => "Ctrl+L",
            Self::Quit => "Ctrl+D",
            Self::Complete => "Tab",
            Self::NextCandidate => "Tab/Right",
            Self::PrevCandidate => "Shift+Tab/Left",
            Self::CloseMenu => "Esc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PrevTab => "Switch to the previous tab",
            Self::NextTab => "Switch to the next tab",
            Self::Submit => "Send the line or run the command",
            Self::HistoryUp => "Previous line from history",
            Self::HistoryDown => "Next line from history",
            Self::LineStart => "Move to the start of the line",
            Self::LineEnd => "Move to the end of the line",
            Self::DeleteWord => "Delete the word before the cursor",
            Self::CutToEnd => "Delete everything after the cursor",
            Self::ClearScreen => "Clear the screen",
            Self::Quit => "Quit on an empty line",
            Self::Complete => "Complete commands, settings and nicks",
            Self::NextCandidate => "Select the next completion",
            Self::PrevCandidate => "Select the previous completion",
            Self::CloseMenu => "Close the completion menu",
        }
    }

    pub fn section(&self) -> KeySection {
        match self {
            Self::PrevTab | Self::NextTab => KeySection::Tabs,
            Self::Submit
            | Self::HistoryUp
            | Self::HistoryDown
            | Self::LineStart
            | Self::LineEnd
            | Self::DeleteWord
            | Self::CutToEnd
            | Self::ClearScreen
            | Self::Quit => KeySection::Editing,
            Self::Complete | Self::NextCandidate | Self::PrevCandidate | Self::CloseMenu => {
                KeySection::Completion
            }
        }
    }
}

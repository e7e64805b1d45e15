//! Terminal side of the client: the line editor's completer, its key
//! bindings and the painter that prints drained log lines.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Arc;

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use parking_lot::Mutex;
use reedline::{
    ColumnarMenu, Completer, Emacs, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Span, Suggestion, default_emacs_keybindings,
};

use crate::commands::{self, Registry};
use crate::messages::{Level, LogLine};
use crate::session::Session;
use crate::vars::{Attr, Color, ColorSpec, Scope, Value, VarStore};

pub const COMPLETION_MENU: &str = "completion_menu";

/// Host command markers emitted by the tab switching bindings.
pub const PREV_TAB: &str = "\u{1b}dcline:prev-tab";
pub const NEXT_TAB: &str = "\u{1b}dcline:next-tab";

const FALLBACK_TIME_FORMAT: &str = "[%H:%M:%S]";

/// Feeds the line editor's completion menu from the command registry.
pub struct SessionCompleter {
    session: Arc<Mutex<Session>>,
    registry: Arc<Registry>,
}

impl SessionCompleter {
    pub fn new(session: Arc<Mutex<Session>>, registry: Arc<Registry>) -> Self {
        Self { session, registry }
    }
}

impl Completer for SessionCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let Some(typed) = line.get(..pos) else {
            return Vec::new();
        };
        let session = self.session.lock();
        commands::suggest(&self.registry, &session, typed)
            .into_iter()
            .map(|value| Suggestion {
                value,
                span: Span::new(0, pos),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}

/// Build the line editor with completion and tab switching bindings.
pub fn line_editor(completer: SessionCompleter) -> Reedline {
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Left,
        ReedlineEvent::ExecuteHostCommand(PREV_TAB.to_string()),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Right,
        ReedlineEvent::ExecuteHostCommand(NEXT_TAB.to_string()),
    );

    let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
    Reedline::create()
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Blue => style::Color::DarkBlue,
        Color::Cyan => style::Color::DarkCyan,
        Color::Green => style::Color::DarkGreen,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Red => style::Color::DarkRed,
        Color::White => style::Color::Grey,
        Color::Yellow => style::Color::DarkYellow,
    }
}

fn term_attr(attr: Attr) -> Attribute {
    match attr {
        Attr::Blink => Attribute::SlowBlink,
        Attr::Bold => Attribute::Bold,
        Attr::Reverse => Attribute::Reverse,
        Attr::Underline => Attribute::Underlined,
    }
}

/// Styles read from the `color_log_*` and `ui_time_format` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogStyle {
    pub time_format: String,
    pub time: ColorSpec,
    pub info: ColorSpec,
    pub error: ColorSpec,
}

impl LogStyle {
    pub fn from_vars(vars: &VarStore) -> Self {
        let colors = |name: &str| match vars.value(Scope::Global, name) {
            Some(Value::Colors(spec)) => spec,
            _ => ColorSpec::default(),
        };
        let time_format = match vars.value(Scope::Global, "ui_time_format") {
            Some(Value::Str(format)) => format,
            _ => FALLBACK_TIME_FORMAT.to_string(),
        };
        Self {
            time_format,
            time: colors("color_log_time"),
            info: colors("color_log_default"),
            error: colors("color_log_error"),
        }
    }

    /// Timestamp for a line. An unusable format falls back to the default.
    pub fn stamp(&self, line: &LogLine) -> String {
        let mut out = String::new();
        if write!(out, "{}", line.time.format(&self.time_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", line.time.format(FALLBACK_TIME_FORMAT));
        }
        out
    }

    fn text_color(&self, level: Level) -> &ColorSpec {
        match level {
            Level::Info => &self.info,
            Level::Error => &self.error,
        }
    }
}

fn print_styled(out: &mut impl Write, text: &str, spec: &ColorSpec) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(term_color(spec.fg)),
        SetBackgroundColor(term_color(spec.bg))
    )?;
    for attr in &spec.attrs {
        queue!(out, SetAttribute(term_attr(*attr)))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
}

/// Print log lines, one timestamp per physical line.
pub fn paint(out: &mut impl Write, style: &LogStyle, lines: &[LogLine]) -> io::Result<()> {
    for line in lines {
        let stamp = style.stamp(line);
        for text in line.text.lines() {
            print_styled(out, &stamp, &style.time)?;
            queue!(out, Print(" "))?;
            print_styled(out, text, style.text_color(line.level))?;
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use dcline::commands::{self, Registry};
use dcline::config::{self, ConfigError, Settings};
use dcline::net::OfflineLink;
use dcline::session::Session;
use dcline::term::{self, LogStyle, NEXT_TAB, PREV_TAB, SessionCompleter};
use parking_lot::Mutex;
use reedline::{DefaultPrompt, DefaultPromptSegment, Signal};
use tracing_subscriber::EnvFilter;

/// Interactive Direct Connect chat and file sharing client.
#[derive(Parser, Debug)]
#[command(name = "dcline", version, about)]
struct Cli {
    /// Settings file (default: ~/.config/dcline/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not connect to hubs marked with autoconnect
    #[arg(long)]
    no_autoconnect: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(StdMutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn print_colored_message(message: &str, color: Color) {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, SetForegroundColor(color), Print(message), ResetColor);
}

fn settings_location(cli: &Cli) -> Result<PathBuf, ConfigError> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => config::settings_path().ok_or(ConfigError::NoHome),
    }
}

fn flush_log(session: &mut Session) {
    let lines = session.log.drain();
    if lines.is_empty() {
        return;
    }
    let style = LogStyle::from_vars(&session.vars);
    if let Err(e) = term::paint(&mut io::stdout(), &style, &lines) {
        tracing::warn!(error = %e, "failed to print log");
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_file.as_ref()) {
        print_colored_message(&format!("Warning: cannot open log file: {e}\n"), Color::DarkYellow);
    }

    let settings_path = settings_location(&cli);
    let settings = match &settings_path {
        Ok(path) => config::load_settings(path).unwrap_or_else(|e| {
            print_colored_message(
                &format!("Warning: {e}\nStarting with default settings.\n"),
                Color::DarkYellow,
            );
            Settings::default()
        }),
        Err(e) => {
            print_colored_message(&format!("Warning: {e}\n"), Color::DarkYellow);
            Settings::default()
        }
    };

    let registry = match Registry::builtin() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let session = Arc::new(Mutex::new(Session::new(
        settings.into_store(),
        Box::new(OfflineLink::new()),
    )));

    print_colored_message(
        &format!(
            "dcline {}. Type /help for commands, /help keys for shortcuts.\n",
            env!("CARGO_PKG_VERSION")
        ),
        Color::DarkMagenta,
    );

    {
        let mut session = session.lock();
        if !cli.no_autoconnect {
            commands::autoconnect(&mut session);
        }
        flush_log(&mut session);
    }

    let mut rl = term::line_editor(SessionCompleter::new(session.clone(), registry.clone()));

    loop {
        let title = {
            let state = session.lock();
            state.tab_title(state.current_tab())
        };
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(title),
            DefaultPromptSegment::Empty,
        );

        let line = match rl.read_line(&prompt) {
            Ok(Signal::Success(input)) => input,
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) | Err(_) => break,
        };

        let mut state = session.lock();
        match line.as_str() {
            PREV_TAB => state.focus_prev(),
            NEXT_TAB => state.focus_next(),
            _ => commands::dispatch(&registry, &mut state, &line),
        }

        if state.take_clear_request()
            && let Err(e) = rl.clear_screen()
        {
            tracing::warn!(error = %e, "failed to clear screen");
        }
        flush_log(&mut state);

        if state.should_quit() {
            break;
        }
    }

    let state = session.lock();
    if let Ok(path) = settings_path
        && let Err(e) = Settings::from_store(&state.vars).save(&path)
    {
        print_colored_message(&format!("Warning: {e}\n"), Color::DarkYellow);
    }
}

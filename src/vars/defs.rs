//! Variable definitions.

use chrono::format::{Item, StrftimeItems};

use super::kind::VarKind;
use super::Scope;

/// Tiers a variable may hold a value at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarScope {
    Global,
    Hub,
    Both,
}

impl VarScope {
    pub fn allows(&self, scope: Scope) -> bool {
        match (self, scope) {
            (Self::Both, _) => true,
            (Self::Global, Scope::Global) => true,
            (Self::Hub, Scope::Hub(_)) => true,
            _ => false,
        }
    }

    pub fn allows_global(&self) -> bool {
        matches!(self, Self::Global | Self::Both)
    }

    pub fn allows_hub(&self) -> bool {
        matches!(self, Self::Hub | Self::Both)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Hub => "hub",
            Self::Both => "global & hub",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VarDef {
    pub name: &'static str,
    pub kind: VarKind,
    pub scope: VarScope,
    /// Raw value used when neither tier holds one.
    pub default: Option<&'static str>,
    /// Extra validation on top of the kind's parser.
    pub check: Option<fn(&str) -> Result<(), String>>,
    /// Internal bookkeeping, invisible to /set and /hset.
    pub hidden: bool,
    pub doc: &'static str,
}

impl VarDef {
    const fn new(name: &'static str, scope: VarScope, kind: VarKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            scope,
            default: None,
            check: None,
            hidden: false,
            doc,
        }
    }

    const fn global(name: &'static str, kind: VarKind, doc: &'static str) -> Self {
        Self::new(name, VarScope::Global, kind, doc)
    }

    const fn hub(name: &'static str, kind: VarKind, doc: &'static str) -> Self {
        Self::new(name, VarScope::Hub, kind, doc)
    }

    const fn both(name: &'static str, kind: VarKind, doc: &'static str) -> Self {
        Self::new(name, VarScope::Both, kind, doc)
    }

    const fn with_default(mut self, raw: &'static str) -> Self {
        self.default = Some(raw);
        self
    }

    const fn with_check(mut self, check: fn(&str) -> Result<(), String>) -> Self {
        self.check = Some(check);
        self
    }

    const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

const POLICY: VarKind = VarKind::Enum(&["disabled", "allow", "prefer"]);
const ENCODINGS: VarKind = VarKind::Enum(&[
    "CP1250",
    "CP1251",
    "CP1252",
    "ISO-8859-1",
    "ISO-8859-2",
    "ISO-8859-15",
    "KOI8-R",
    "UTF-8",
]);

fn check_nick(raw: &str) -> Result<(), String> {
    if raw.is_empty() || raw.len() > 32 {
        return Err("Nick must be between 1 and 32 characters.".to_string());
    }
    if raw
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '$' | '|' | '<' | '>'))
    {
        return Err("Nick may not contain spaces or any of $|<>.".to_string());
    }
    Ok(())
}

fn check_time_format(raw: &str) -> Result<(), String> {
    if StrftimeItems::new(raw).any(|item| matches!(item, Item::Error)) {
        return Err("Invalid time format.".to_string());
    }
    Ok(())
}

/// All variables, sorted by name.
pub static DEFS: &[VarDef] = &[
    VarDef::global("active", VarKind::Bool, "Accept incoming connections from other clients.")
        .with_default("false"),
    VarDef::both(
        "active_port",
        VarKind::Int { min: 1, max: 65535 },
        "Port to listen on for incoming TCP and UDP connections.",
    ),
    VarDef::hub("autoconnect", VarKind::Bool, "Connect to this hub on startup.")
        .with_default("false"),
    VarDef::both(
        "backlog",
        VarKind::Int { min: 0, max: 512 },
        "Number of chat lines to load from the log when opening a tab.",
    )
    .with_default("0"),
    VarDef::both(
        "chat_only",
        VarKind::Bool,
        "Announce as a chat-only client and do not share files.",
    )
    .with_default("false"),
    VarDef::global("color_log_default", VarKind::Colors, "Color of regular log lines.")
        .with_default("default"),
    VarDef::global("color_log_error", VarKind::Colors, "Color of error messages.")
        .with_default("red,bold"),
    VarDef::global(
        "color_log_highlight",
        VarKind::Colors,
        "Color of chat lines mentioning your nick.",
    )
    .with_default("yellow,bold"),
    VarDef::global("color_log_time", VarKind::Colors, "Color of timestamps.")
        .with_default("blue"),
    VarDef::both("description", VarKind::Str, "Free-form description shown to other users."),
    VarDef::global("download_dir", VarKind::Path, "Directory finished downloads are moved to."),
    VarDef::global(
        "download_exclude",
        VarKind::Regex,
        "Files matching this expression are skipped when queueing directories.",
    ),
    VarDef::global(
        "download_rate",
        VarKind::Speed,
        "Maximum combined download speed. Unset for unlimited.",
    ),
    VarDef::global(
        "download_slots",
        VarKind::Int { min: 1, max: 64 },
        "Number of simultaneous downloads.",
    )
    .with_default("3"),
    VarDef::both("email", VarKind::Str, "E-mail address shown to other users."),
    VarDef::both("encoding", ENCODINGS, "Character encoding used for NMDC hubs.")
        .with_default("UTF-8"),
    VarDef::global(
        "filelist_maxage",
        VarKind::Interval,
        "Cached file lists older than this are downloaded again.",
    )
    .with_default("1w"),
    VarDef::global(
        "hash_rate",
        VarKind::Speed,
        "Maximum disk read speed while hashing shared files.",
    ),
    VarDef::hub("hubaddr", VarKind::Str, "Address of the hub.").hidden(),
    VarDef::hub("hubkp", VarKind::Str, "Pinned keyprint of the hub certificate.").hidden(),
    VarDef::hub("hubname", VarKind::Str, "Tab name of the hub.").hidden(),
    VarDef::global("log_debug", VarKind::Bool, "Write protocol debug messages to a file.")
        .with_default("false"),
    VarDef::global("log_downloads", VarKind::Bool, "Log finished downloads.")
        .with_default("true"),
    VarDef::both("log_hubchat", VarKind::Bool, "Log hub chat to a file.")
        .with_default("true"),
    VarDef::global("log_uploads", VarKind::Bool, "Log finished uploads.")
        .with_default("true"),
    VarDef::global(
        "minislot_size",
        VarKind::Int { min: 64, max: 1_048_576 },
        "Files up to this size in KiB may be sent over a minislot.",
    )
    .with_default("64"),
    VarDef::global(
        "minislots",
        VarKind::Int { min: 0, max: 128 },
        "Number of minislots granted for small files and file lists.",
    )
    .with_default("3"),
    VarDef::both("nick", VarKind::Str, "Your nick name.").with_check(check_nick),
    VarDef::both(
        "reconnect_timeout",
        VarKind::Interval,
        "Wait this long before reconnecting to a hub after losing the connection.",
    )
    .with_default("30s"),
    VarDef::global(
        "share_exclude",
        VarKind::Regex,
        "Files matching this expression are not shared.",
    ),
    VarDef::global("share_hidden", VarKind::Bool, "Share hidden files and directories.")
        .with_default("false"),
    VarDef::both("show_joinquit", VarKind::Bool, "Show users joining and leaving the hub.")
        .with_default("false"),
    VarDef::global(
        "slots",
        VarKind::Int { min: 1, max: 1000 },
        "Number of upload slots.",
    )
    .with_default("10"),
    VarDef::both("sudp_policy", POLICY, "Encrypt UDP search results.").with_default("allow"),
    VarDef::both("tls_policy", POLICY, "Use TLS for client-to-client transfers.")
        .with_default("prefer"),
    VarDef::global(
        "ui_time_format",
        VarKind::Str,
        "strftime format of the timestamp in front of log lines.",
    )
    .with_default("[%H:%M:%S]")
    .with_check(check_time_format),
    VarDef::global(
        "upload_rate",
        VarKind::Speed,
        "Maximum combined upload speed. Unset for unlimited.",
    ),
];

/// Find a definition by exact name, including hidden ones.
pub fn find(name: &str) -> Option<&'static VarDef> {
    DEFS.iter().find(|d| d.name == name)
}

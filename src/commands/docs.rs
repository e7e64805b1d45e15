//! Help text for the built-in commands.

use super::types::{CommandCategory, CommandDoc};

use CommandCategory::{Chat, Hubs, Other, Settings, Transfers};

const fn doc(
    name: &'static str,
    category: CommandCategory,
    args: &'static str,
    summary: &'static str,
    description: Option<&'static str>,
) -> CommandDoc {
    CommandDoc {
        name,
        args,
        summary,
        description,
        category,
    }
}

static DOCS: &[CommandDoc] = &[
    doc(
        "clear",
        Other,
        "",
        "Clear the screen.",
        None,
    ),
    doc(
        "close",
        Hubs,
        "",
        "Close the current tab.",
        Some(
            "Closing a hub tab disconnects from the hub and closes every private message tab \
             opened on it. The main tab cannot be closed.",
        ),
    ),
    doc(
        "connect",
        Hubs,
        "[<address>]",
        "Connect the current hub tab.",
        Some(
            "Connect to the given address, or to the address used the last time when none is \
             given. The address is remembered for the next /open or /reconnect.\n\n\
             Accepted forms are [dchub|nmdc|nmdcs|adc|adcs://]host[:port][/?kp=SHA256/<keyprint>]. \
             The port defaults to 411. A keyprint pins the hub certificate and is only accepted \
             with the nmdcs:// and adcs:// protocols. Connecting to another address forgets a \
             pinned keyprint unless a new one is given.",
        ),
    ),
    doc(
        "disconnect",
        Hubs,
        "",
        "Disconnect from the hub.",
        Some("On the main tab this disconnects from every connected hub."),
    ),
    doc(
        "grant",
        Transfers,
        "[<user>]",
        "Grant a slot to a user.",
        Some(
            "A granted user may download from you even when all upload slots are in use. \
             Without arguments, lists the users with a granted slot.",
        ),
    ),
    doc(
        "help",
        Other,
        "[<command>|set <key>|keys [<section>]]",
        "Request information on commands.",
        Some(
            "Without arguments, lists all commands. '/help <command>' describes a command, \
             '/help set <key>' describes a setting and '/help keys' lists the key bindings.",
        ),
    ),
    doc(
        "hset",
        Settings,
        "[<key> [<value>]]",
        "Get or set a hub setting.",
        Some(
            "Like /set, but for the hub of the current tab. A hub setting overrides the global \
             value for that hub only. Use /hunset to go back to the global value.",
        ),
    ),
    doc(
        "hunset",
        Settings,
        "<key>",
        "Remove a hub setting, falling back to the global value.",
        None,
    ),
    doc(
        "kick",
        Hubs,
        "<user>",
        "Kick a user from the hub.",
        Some("Requires operator status on the hub."),
    ),
    doc(
        "me",
        Chat,
        "<message>",
        "Send a chat message in the third person.",
        None,
    ),
    doc(
        "msg",
        Chat,
        "<user> [<message>]",
        "Send a private message.",
        Some(
            "Opens a private message tab with the user and, when a message is given, sends it.",
        ),
    ),
    doc(
        "open",
        Hubs,
        "[-n] <name> [<address>]",
        "Open a new hub tab and connect to the hub.",
        Some(
            "Opens the tab named #<name>, or switches to it if it is already open. Settings \
             changed with /hset are remembered under this name. When an address is given it is \
             stored as with /connect. With -n, the tab is opened without connecting.",
        ),
    ),
    doc(
        "password",
        Hubs,
        "<password>",
        "Send your password to the hub.",
        Some("Only needed when the hub asks for a password during login."),
    ),
    doc(
        "quit",
        Other,
        "",
        "Quit dcline.",
        None,
    ),
    doc(
        "reconnect",
        Hubs,
        "",
        "Reconnect to the hub.",
        Some(
            "Useful after changing settings that are only sent on login, such as your nick or \
             description. On the main tab this reconnects every open hub.",
        ),
    ),
    doc(
        "say",
        Chat,
        "<message>",
        "Send a chat message.",
        Some(
            "Any line not starting with / is sent with this command. Leading and trailing \
             spaces are part of the message.",
        ),
    ),
    doc(
        "search",
        Transfers,
        "[options] <query>",
        "Search for files.",
        Some(
            "Options:\n\
             \x20 -hub      Search the current hub only (default)\n\
             \x20 -all      Search all connected hubs\n\
             \x20 -le <s>   Size less than or equal to <s>\n\
             \x20 -ge <s>   Size greater than or equal to <s>\n\
             \x20 -t <t>    File type: any, audio, archive, doc, exe, img, video, dir, or 1-8\n\
             \x20 -tth <h>  Search for a file by its TTH\n\
             \x20 --        Stop looking for options\n\n\
             Sizes accept the K, M, G and T suffixes (powers of 1024). Quote terms containing \
             spaces.",
        ),
    ),
    doc(
        "set",
        Settings,
        "[<key> [<value>]]",
        "Get or set a global setting.",
        Some(
            "Without arguments, lists every global setting. With only a key, shows its value. \
             The key may contain the wildcards * and ? to list matching settings. Use \
             '/help set <key>' to read about a setting.",
        ),
    ),
    doc(
        "ungrant",
        Transfers,
        "<user>",
        "Revoke a granted slot.",
        Some(
            "The user is matched by name, ignoring case, or else by a prefix of the user id \
             shown by /grant.",
        ),
    ),
    doc(
        "unset",
        Settings,
        "<key>",
        "Reset a global setting to its default.",
        None,
    ),
    doc(
        "version",
        Other,
        "",
        "Show the version.",
        None,
    ),
    doc(
        "whois",
        Hubs,
        "[<user>]",
        "Show information about a user.",
        Some("On a private message tab the user defaults to the other party."),
    ),
];

pub fn lookup(name: &str) -> Option<CommandDoc> {
    DOCS.iter().find(|d| d.name == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_sorted_and_unique() {
        for pair in DOCS.windows(2) {
            assert!(pair[0].name < pair[1].name, "{} >= {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn missing_entry() {
        assert!(lookup("set").is_some());
        assert!(lookup("nope").is_none());
    }
}

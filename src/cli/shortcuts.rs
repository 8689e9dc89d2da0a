//! cli::shortcuts
//!
//! Short aliases for common `domain:verb` commands.

/// Alias → full command. Sorted by alias.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("create", "apps:create"),
    ("destroy", "apps:destroy"),
    ("info", "apps:info"),
    ("login", "auth:login"),
    ("logout", "auth:logout"),
    ("logs", "apps:logs"),
    ("open", "apps:open"),
    ("passwd", "auth:passwd"),
    ("pull", "builds:create"),
    ("register", "auth:register"),
    ("rollback", "releases:rollback"),
    ("run", "apps:run"),
    ("scale", "ps:scale"),
    ("sharing", "perms:list"),
    ("sharing:add", "perms:create"),
    ("sharing:list", "perms:list"),
    ("sharing:remove", "perms:delete"),
    ("whoami", "auth:whoami"),
];

/// Expand `command` if it is an alias.
pub fn expand(command: &str) -> &str {
    SHORTCUTS
        .iter()
        .find(|(alias, _)| *alias == command)
        .map(|(_, full)| *full)
        .unwrap_or(command)
}

/// `alias -> command` lines, one per shortcut.
pub fn listing() -> String {
    SHORTCUTS
        .iter()
        .map(|(alias, full)| format!("{} -> {}\n", alias, full))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_expand() {
        assert_eq!(expand("create"), "apps:create");
        assert_eq!(expand("sharing:add"), "perms:create");
        assert_eq!(expand("pull"), "builds:create");
    }

    #[test]
    fn other_commands_pass_through() {
        assert_eq!(expand("apps:list"), "apps:list");
        assert_eq!(expand("bogus"), "bogus");
    }

    #[test]
    fn table_is_sorted_by_alias() {
        let aliases: Vec<&str> = SHORTCUTS.iter().map(|(a, _)| *a).collect();
        let mut sorted = aliases.clone();
        sorted.sort();
        assert_eq!(aliases, sorted);
    }

    #[test]
    fn listing_has_one_line_per_alias() {
        let listing = listing();
        assert_eq!(listing.lines().count(), SHORTCUTS.len());
        assert!(listing.starts_with("create -> apps:create\n"));
    }
}

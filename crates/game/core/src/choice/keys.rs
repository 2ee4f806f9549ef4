//! Option keys shared by choice builders and handlers.

pub const LEAVE: &str = "leave";
pub const SKIP: &str = "skip";
pub const CANCEL: &str = "cancel";
pub const CLOSE: &str = "close";
pub const ACCEPT: &str = "accept";
pub const REFUSE: &str = "refuse";
pub const REJECT: &str = "reject";
pub const HEAL: &str = "heal";
pub const UPGRADE: &str = "upgrade";
pub const REMOVE: &str = "remove";
pub const RECOVER: &str = "recover";

pub const CARD: &str = "card";
pub const BUY: &str = "buy";
pub const RELIC: &str = "relic";
pub const DEITY: &str = "deity";
pub const TAG: &str = "tag";

/// Builds `prefix:value`.
pub fn keyed(prefix: &str, value: impl core::fmt::Display) -> String {
    format!("{prefix}:{value}")
}

/// Returns the value of a `prefix:value` key.
pub fn value<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    key.strip_prefix(prefix)?.strip_prefix(':')
}

/// Parses a `prefix:<index>` key.
pub fn index(key: &str, prefix: &str) -> Option<usize> {
    value(key, prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indexed_keys() {
        assert_eq!(index(&keyed(CARD, 3), CARD), Some(3));
        assert_eq!(index("card:x", CARD), None);
        assert_eq!(index("cards:1", CARD), None);
        assert_eq!(value("deity:sun", DEITY), Some("sun"));
        assert_eq!(value("deity", DEITY), None);
    }
}

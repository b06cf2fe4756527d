//! Mention scanner: pure text -> candidate usernames.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("mention pattern is valid"));

/// Extract every `@word` token from the text. Duplicates collapse; order is
/// not significant. Whether a candidate names a real user is the fan-out's
/// problem, not the scanner's.
pub fn mentions(text: &str) -> HashSet<String> {
    MENTION
        .captures_iter(text)
        .map(|capture| capture[1].to_string())
        .collect()
}

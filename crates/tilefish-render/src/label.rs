use std::sync::OnceLock;

use regex::Regex;

// An uppercase letter that starts a lowercase-led word. Split points sit
// before each match, so acronym runs stay attached to their word.
fn word_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[A-Z][^A-Z]").expect("word boundary regex must compile"))
}

/// Splits a tile name into label lines at camel/Pascal-case word boundaries:
/// before every uppercase letter that is not followed by another uppercase
/// letter. `"WiiSports"` becomes `["Wii", "Sports"]`; a name with no such
/// boundary stays whole.
pub fn split_label(name: &str) -> Vec<String> {
    if name.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0;
    for m in word_start().find_iter(name) {
        if m.start() > start {
            out.push(name[start..m.start()].to_string());
            start = m.start();
        }
    }
    out.push(name[start..].to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_pascal_case_names() {
        assert_eq!(split_label("WiiSports"), ["Wii", "Sports"]);
        assert_eq!(split_label("DuckTales: Remastered"), ["Duck", "Tales: ", "Remastered"]);
    }

    #[test]
    fn plain_words_stay_whole() {
        assert_eq!(split_label("Inception"), ["Inception"]);
        assert_eq!(split_label("minecraft"), ["minecraft"]);
    }

    #[test]
    fn trailing_acronyms_stay_whole() {
        assert_eq!(split_label("GTA"), ["GTA"]);
    }

    #[test]
    fn acronym_splits_before_its_last_letter_when_a_word_follows() {
        // The boundary sits before any uppercase letter trailed by a
        // non-uppercase one, so "A " starts a segment of its own.
        assert_eq!(split_label("FIFA Soccer"), ["FIF", "A ", "Soccer"]);
    }

    #[test]
    fn spaces_are_kept_with_the_preceding_segment() {
        assert_eq!(split_label("Wii Sports"), ["Wii ", "Sports"]);
    }

    #[test]
    fn lowercase_prefix_splits_before_first_word() {
        assert_eq!(split_label("iPhone"), ["i", "Phone"]);
    }

    #[test]
    fn empty_name_yields_no_lines() {
        assert!(split_label("").is_empty());
    }
}

//! Word-boundary aware keyword matching over lower-cased incident text.
//!
//! Terms are plain lower-case words or phrases. A trailing `*` marks a stem
//! (`retaliat*` matches "retaliated" and "retaliation"); without it the term
//! must end on a word boundary, so `age` does not fire on "agenda". Every
//! term must start on a word boundary.

/// True when `term` occurs in `text` under the rules above.
pub fn mentions(text: &str, term: &str) -> bool {
    let (needle, stem) = match term.strip_suffix('*') {
        Some(stem) => (stem, true),
        None => (term, false),
    };
    if needle.is_empty() {
        return false;
    }

    text.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let starts_word = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let ends_word = stem
            || text[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
        starts_word && ends_word
    })
}

/// True when any term in `terms` matches.
pub fn mentions_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| mentions(text, term))
}

/// Walk `tiers` from most to least severe and return the first matching score.
pub fn tiered_score(text: &str, tiers: &[(u8, &[&str])], fallback: u8) -> u8 {
    tiers
        .iter()
        .find(|(_, terms)| mentions_any(text, terms))
        .map_or(fallback, |(score, _)| *score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_terms_respect_both_boundaries() {
        assert!(mentions("discussed her age openly", "age"));
        assert!(!mentions("reviewed the agenda", "age"));
        assert!(!mentions("the manager was there", "age"));
        assert!(mentions("age", "age"));
    }

    #[test]
    fn stems_match_suffixes_only_at_word_start() {
        assert!(mentions("he retaliated later", "retaliat*"));
        assert!(mentions("fear of retaliation.", "retaliat*"));
        assert!(!mentions("white board", "hit*"));
    }

    #[test]
    fn phrases_span_whitespace_and_punctuation() {
        assert!(mentions("there were no records, sadly", "no records"));
        assert!(mentions("(pay-cut) applied", "pay-cut"));
        assert!(!mentions("there were no recordsets", "no records"));
    }

    #[test]
    fn tiered_score_prefers_highest_tier() {
        let tiers: &[(u8, &[&str])] = &[(5, &["ceo"]), (3, &["manager"])];
        assert_eq!(tiered_score("the manager and the ceo", tiers, 1), 5);
        assert_eq!(tiered_score("the manager", tiers, 1), 3);
        assert_eq!(tiered_score("a peer", tiers, 1), 1);
    }
}

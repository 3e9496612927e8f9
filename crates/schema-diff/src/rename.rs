//! Field rename detection.
//!
//! Matches removed/added field pairs at the same nesting level so a rename
//! is reported as one change instead of an unrelated removal plus addition.
//! Matching is greedy first-match-wins, not a globally optimal assignment;
//! consumers depend on the first-match order for tie-breaking.

use schemadrift_core::SchemaNode;

/// Names longer than this are never compared by edit distance; short names
/// are too easy to confuse otherwise.
const MAX_EDIT_DISTANCE_LEN: usize = 8;

/// Find likely (removed, added) rename pairs.
///
/// A pair is eligible only if both schemas share a kind and the names are
/// similar under any of: pluralization, case-style equivalence, or bounded
/// edit distance. Each side of a pair is consumed at most once.
pub fn detect_renames(
    removed: &[(&str, &SchemaNode)],
    added: &[(&str, &SchemaNode)],
) -> Vec<(String, String)> {
    let mut claimed = vec![false; added.len()];
    let mut pairs = Vec::new();

    for (removed_name, removed_schema) in removed {
        for (i, (added_name, added_schema)) in added.iter().enumerate() {
            if claimed[i] {
                continue;
            }
            if removed_schema.same_kind(added_schema)
                && names_similar(removed_name, added_name)
            {
                claimed[i] = true;
                pairs.push((removed_name.to_string(), added_name.to_string()));
                break;
            }
        }
    }
    pairs
}

fn names_similar(a: &str, b: &str) -> bool {
    is_plural_variant(a, b)
        || normalize_name(a) == normalize_name(b)
        || (a.chars().count() <= MAX_EDIT_DISTANCE_LEN
            && b.chars().count() <= MAX_EDIT_DISTANCE_LEN
            && levenshtein(a, b) <= 2)
}

/// `role`/`roles` and `match`/`matches` style pairs, case-insensitive.
fn is_plural_variant(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    format!("{a}s") == b
        || format!("{b}s") == a
        || format!("{a}es") == b
        || format!("{b}es") == a
}

/// Lower-case and strip separators so `userName`, `user_name`, and
/// `user-name` all normalize to `username`.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = current[j] + 1;
            current.push(substitution.min(deletion).min(insertion));
        }
        prev = current;
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_node() -> SchemaNode {
        SchemaNode::string(None)
    }

    fn number_node() -> SchemaNode {
        SchemaNode::number(None)
    }

    #[test]
    fn pluralization_matches() {
        assert!(names_similar("role", "roles"));
        assert!(names_similar("roles", "role"));
        assert!(names_similar("match", "matches"));
        assert!(names_similar("Role", "roles"));
    }

    #[test]
    fn case_style_equivalence_matches() {
        assert!(names_similar("userName", "user_name"));
        assert!(names_similar("user-name", "userName"));
        assert!(names_similar("createdAt", "created_at"));
    }

    #[test]
    fn bounded_edit_distance_matches_short_names() {
        assert!(names_similar("email", "emial"));
        assert!(!names_similar("authentication", "authorization"));
        assert!(!names_similar("total", "cache"));
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("role", "roles"), 1);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn kind_mismatch_blocks_match() {
        let s = string_node();
        let n = number_node();
        let pairs = detect_renames(&[("role", &s)], &[("roles", &n)]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn matched_pair_is_consumed_once() {
        let s = string_node();
        let pairs = detect_renames(
            &[("role", &s), ("rol", &s)],
            &[("roles", &s)],
        );
        assert_eq!(pairs, vec![("role".to_string(), "roles".to_string())]);
    }

    #[test]
    fn greedy_matching_takes_first_eligible() {
        // Both added names are eligible for `name`; the first in natural
        // order wins. Accepted approximation, not an optimal assignment.
        let s = string_node();
        let pairs = detect_renames(
            &[("name", &s)],
            &[("names", &s), ("nam", &s)],
        );
        assert_eq!(pairs, vec![("name".to_string(), "names".to_string())]);
    }

    #[test]
    fn unrelated_names_do_not_match() {
        let s = string_node();
        let pairs = detect_renames(&[("address", &s)], &[("telephone", &s)]);
        assert!(pairs.is_empty());
    }
}

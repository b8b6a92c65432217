//! Token boundary analysis
//!
//! Pure string functions that locate separator and delimiter markers inside
//! the token being completed. Generators use them to decide whether the host
//! must recompute suggestions (`trigger`) and which part of the token is the
//! query term.
//!
//! Positions are byte offsets. `None` stands for "marker not found" and
//! orders below every `Some`, so comparing two lookups behaves like comparing
//! `-1`-based indices.

/// Position of the first occurrence of `marker` in `haystack`
pub fn index_of(haystack: &str, marker: &str) -> Option<usize> {
    haystack.find(marker)
}

/// Rightmost occurrence of any of `markers` in `haystack`
///
/// Returns the position together with the marker found there. When two
/// markers end up at the same position the longer one wins, so the query
/// term never starts in the middle of a marker.
pub fn last_index_of<'m>(haystack: &str, markers: &[&'m str]) -> Option<(usize, &'m str)> {
    markers
        .iter()
        .filter_map(|marker| haystack.rfind(marker).map(|idx| (idx, *marker)))
        .max_by_key(|(idx, marker)| (*idx, marker.len()))
}

/// Whether the first `marker` moved between two versions of a token
pub fn first_marker_moved(marker: &str, new_token: &str, old_token: &str) -> bool {
    index_of(new_token, marker) != index_of(old_token, marker)
}

/// Text after the first `marker`, or the whole token if it has none
pub fn after_first_marker<'t>(marker: &str, token: &'t str) -> &'t str {
    match index_of(token, marker) {
        Some(idx) => &token[idx + marker.len()..],
        None => token,
    }
}

/// Whether the rightmost of `markers` moved between two versions of a token
pub fn last_marker_moved(markers: &[&str], new_token: &str, old_token: &str) -> bool {
    let position = |token: &str| last_index_of(token, markers).map(|(idx, _)| idx);
    position(new_token) != position(old_token)
}

/// Text after the rightmost of `markers`, or the whole token if it has none
pub fn after_last_marker<'t>(markers: &[&str], token: &'t str) -> &'t str {
    match last_index_of(token, markers) {
        Some((idx, marker)) => &token[idx + marker.len()..],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of() {
        assert_eq!(index_of("a,b,c", ","), Some(1));
        assert_eq!(index_of("abc", ","), None);
        assert_eq!(index_of("", ","), None);
    }

    #[test]
    fn test_last_index_of_picks_rightmost_marker() {
        assert_eq!(last_index_of("a=1,b", &["=", ","]), Some((3, ",")));
        assert_eq!(last_index_of("a=1,b=2", &["=", ","]), Some((5, "=")));
        assert_eq!(last_index_of("plain", &["=", ","]), None);
    }

    #[test]
    fn test_last_index_of_prefers_longer_marker_on_tie() {
        // ":=" and ":" both start at index 1
        assert_eq!(last_index_of("a:=b", &[":", ":="]), Some((1, ":=")));
    }

    #[test]
    fn test_none_orders_below_any_position() {
        assert!(None < Some(0usize));
    }

    #[test]
    fn test_first_marker_moved() {
        assert!(!first_marker_moved(",", "ab", "a"));
        assert!(first_marker_moved(",", "a,", "a"));
        assert!(!first_marker_moved(",", "a,bc", "a,b"));
        // A second delimiter does not move the first one
        assert!(!first_marker_moved(",", "a,b,", "a,b"));
        assert!(first_marker_moved(",", "", "a,"));
    }

    #[test]
    fn test_after_first_marker() {
        assert_eq!(after_first_marker("=", "foo=bar"), "bar");
        assert_eq!(after_first_marker("=", "foo"), "foo");
        assert_eq!(after_first_marker("=", "foo="), "");
        assert_eq!(after_first_marker("=", "a=b=c"), "b=c");
        assert_eq!(after_first_marker("::", "mod::item"), "item");
    }

    #[test]
    fn test_last_marker_moved() {
        let markers = ["=", ","];
        assert!(!last_marker_moved(&markers, "a=1", "a="));
        assert!(last_marker_moved(&markers, "a=1,", "a=1"));
        assert!(last_marker_moved(&markers, "a=1,b=", "a=1,b"));
        assert!(!last_marker_moved(&markers, "key", "ke"));
    }

    #[test]
    fn test_after_last_marker() {
        let markers = ["=", ","];
        assert_eq!(after_last_marker(&markers, "a=1,b"), "b");
        assert_eq!(after_last_marker(&markers, "a=1,b=2"), "2");
        assert_eq!(after_last_marker(&markers, "a=1,"), "");
        assert_eq!(after_last_marker(&markers, "abc"), "abc");
    }

    #[test]
    fn test_multibyte_tokens() {
        assert_eq!(after_first_marker("=", "clé=valeur"), "valeur");
        assert_eq!(after_last_marker(&["=", ","], "é=1,ü"), "ü");
    }
}

//! Hairpin (stem-loop) detection.

/// Report every local stem-loop in a dot-bracket string as `(start, end)`
/// index pairs, in ascending order of `start`.
///
/// An entry is recorded for every `'('` whose next bracket is a `')'`,
/// i.e. with no further `'('` in between. The raw granularity is kept as
/// is: callers rely on the first entries being the innermost pairs of the
/// leading hairpins, so nothing is coalesced or de-duplicated here.
pub fn find_hairpins(structure: &str) -> Vec<(usize, usize)> {
    let bytes = structure.as_bytes();
    let mut hairpins = Vec::new();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'(' {
            continue;
        }
        let next_close = bytes[i + 1..]
            .iter()
            .position(|&c| c == b')')
            .map(|p| i + 1 + p);
        let next_open = bytes[i + 1..]
            .iter()
            .position(|&c| c == b'(')
            .map(|p| i + 1 + p);
        if let Some(close) = next_close {
            match next_open {
                Some(open) if open < close => {}
                _ => hairpins.push((i, close)),
            }
        }
    }
    hairpins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hairpin() {
        assert_eq!(find_hairpins("(..)"), vec![(0, 3)]);
    }

    #[test]
    fn test_nested_stem_reports_innermost() {
        // No entry at index 0: a nested '(' comes before the next ')'.
        assert_eq!(find_hairpins("((.))."), vec![(1, 4)]);
    }

    #[test]
    fn test_two_hairpins_in_order() {
        assert_eq!(find_hairpins("(...)..((..))"), vec![(0, 4), (8, 11)]);
    }

    #[test]
    fn test_adjacent_pairs() {
        assert_eq!(find_hairpins("()()"), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_no_hairpins() {
        assert!(find_hairpins("......").is_empty());
        assert!(find_hairpins("").is_empty());
    }
}

//! Pairwise name similarity: bounded edit-distance ratio and longest
//! common substring extraction.

use strsim::levenshtein;

/// Edit distance between `a` and `b` divided by the longer char length.
///
/// 0.0 means identical; values approach 1.0 as the strings diverge.
/// Callers must not pass two empty strings (empty names are filtered out
/// before clustering); the guard below only keeps the math defined.
pub fn distance_ratio(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Longest contiguous substring shared by `a` and `b`.
///
/// Ties resolve to the leftmost maximal block in `a`. Returns an empty
/// string when nothing is shared.
pub fn common_substring(a: &str, b: &str) -> String {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut best_len = 0usize;
    let mut best_end = 0usize;
    let mut prev = vec![0usize; b_chars.len() + 1];
    for (i, &ca) in a_chars.iter().enumerate() {
        let mut row = vec![0usize; b_chars.len() + 1];
        for (j, &cb) in b_chars.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best_len {
                    best_len = run;
                    best_end = i + 1;
                }
            }
        }
        prev = row;
    }

    if best_len == 0 {
        return String::new();
    }
    a_chars[best_end - best_len..best_end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{common_substring, distance_ratio};
    use pretty_assertions::assert_eq;

    #[test]
    fn self_distance_is_zero() {
        assert_eq!(distance_ratio("タイトル", "タイトル"), 0.0);
        assert_eq!(distance_ratio("Show S01E01", "Show S01E01"), 0.0);
    }

    #[test]
    fn ratio_divides_by_longer_operand() {
        // levenshtein("kitten", "sitting") == 3, longer side is 7 chars
        assert_eq!(distance_ratio("kitten", "sitting"), 3.0 / 7.0);
    }

    #[test]
    fn ratio_counts_chars_not_bytes() {
        // One substitution across four-char names, regardless of UTF-8 width
        assert_eq!(distance_ratio("タイトル", "タイトヘ"), 0.25);
    }

    #[test]
    fn disjoint_names_approach_one() {
        assert_eq!(distance_ratio("abc", "xyz"), 1.0);
    }

    #[test]
    fn finds_longest_shared_block() {
        assert_eq!(common_substring("Show S01E01", "Show S01E02"), "Show S01E0");
        assert_eq!(common_substring("abcdef", "zcdefy"), "cdef");
    }

    #[test]
    fn ties_resolve_leftmost() {
        // "ab" appears shared twice; the leftmost block in the first
        // operand wins.
        assert_eq!(common_substring("abxab", "abyab"), "ab");
    }

    #[test]
    fn no_shared_block_yields_empty() {
        assert_eq!(common_substring("abc", "xyz"), "");
        assert_eq!(common_substring("", "abc"), "");
    }
}

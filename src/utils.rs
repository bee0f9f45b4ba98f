use regex::Regex;
use tracing::warn;


#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}


/// Non-overlapping occurrences of `needle` in `haystack`.
#[inline]
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}


pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


/// Compiles built-in patterns, skipping (and logging) any that fail to parse.
pub fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Skipping invalid pattern {}: {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Total non-overlapping matches of every pattern in `text`.
pub fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|regex| regex.find_iter(text).count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_ascii() {
        assert_eq!(safe_truncate("breakdown by region", 9), "breakdown");
    }

    #[test]
    fn test_safe_truncate_multibyte() {
        assert_eq!(safe_truncate("• Ventas: 40%", 3), "• V");
    }

    #[test]
    fn test_safe_truncate_shorter() {
        assert_eq!(safe_truncate("bar", 10), "bar");
    }

    #[test]
    fn test_safe_truncate_ellipsis_only_when_longer() {
        assert_eq!(safe_truncate_ellipsis("revenue by year", 7), "revenue...");
        assert_eq!(safe_truncate_ellipsis("revenue", 7), "revenue");
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("a\n- b\n- c\n-d", "\n-"), 3);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("abc", ""), 0);
    }

    #[test]
    fn test_compile_and_count_patterns() {
        let patterns = compile_patterns(&[r"\d+%", r"(unclosed"]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(count_matches(&patterns, "40% and 60%"), 2);
        assert_eq!(count_matches(&[], "40%"), 0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(-0.123), -0.12);
    }
}

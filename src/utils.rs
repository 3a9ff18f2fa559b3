//! Utility functions for the ledger

use chrono::{DateTime, Utc};

/// Next identifier after the largest existing one, or 1 for an empty set
///
/// Gaps are never reused: `{1, 3}` yields 4. `None` once the largest
/// identifier is `u32::MAX`.
pub fn next_id<I>(ids: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Notation with surrounding whitespace removed, or `None` if nothing is left
pub fn normalize_notation(notation: &str) -> Option<&str> {
    let trimmed = notation.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(Vec::<u32>::new()), Some(1));
    }

    #[test]
    fn test_next_id_singleton() {
        assert_eq!(next_id(vec![1]), Some(2));
        assert_eq!(next_id(vec![5]), Some(6));
    }

    #[test]
    fn test_next_id_with_gaps() {
        assert_eq!(next_id(vec![1, 3]), Some(4));
        assert_eq!(next_id(vec![3, 1, 2]), Some(4));
    }

    #[test]
    fn test_next_id_at_upper_bound() {
        assert_eq!(next_id(vec![u32::MAX - 1]), Some(u32::MAX));
        assert_eq!(next_id(vec![7, u32::MAX]), None);
    }

    #[test]
    fn test_normalize_notation() {
        assert_eq!(normalize_notation("  e4 "), Some("e4"));
        assert_eq!(normalize_notation(""), None);
        assert_eq!(normalize_notation(" \t\n"), None);
    }
}

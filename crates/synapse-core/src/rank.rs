//! Final ranking: positive-score filter plus stable descending sort.
//!
//! Ties are deliberately not broken by any secondary key. Callers enqueue
//! items in a defined production order (for the explore feed: people, then
//! projects, then articles, each in the order its source list was produced)
//! and the stable sort preserves that order among equal scores — this is
//! the documented, reproducible tie-break.

use std::cmp::Reverse;

/// Drop non-positive scores and stable-sort the rest descending.
pub fn rank_descending<T, F>(mut items: Vec<T>, score: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    items.retain(|item| score(item) > 0);
    // Vec::sort_by_key is stable; equal scores keep enqueue order.
    items.sort_by_key(|item| Reverse(score(item)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_non_positive() {
        let ranked = rank_descending(vec![5i64, 0, -3, 7], |s| *s);
        assert_eq!(ranked, vec![7, 5]);
    }

    #[test]
    fn test_sorts_descending() {
        let ranked = rank_descending(vec![1i64, 9, 4], |s| *s);
        assert_eq!(ranked, vec![9, 4, 1]);
    }

    #[test]
    fn test_ties_keep_enqueue_order() {
        let items = vec![("a", 5i64), ("b", 9), ("c", 5), ("d", 5)];
        let ranked = rank_descending(items, |(_, s)| *s);
        let order: Vec<&str> = ranked.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank_descending(Vec::<i64>::new(), |s| *s);
        assert!(ranked.is_empty());
    }
}

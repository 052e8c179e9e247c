//! Top-N rankings.
//!
//! All rankings are stable: equal counts keep their input order, which for
//! producer-ranked maps is the producer's own tie order.

use crate::models::{OrderedCounts, TelegramMessage};
use std::cmp::Reverse;

/// Sort in place, highest key first, keeping input order among ties.
pub fn stable_desc_by<T, K, F>(items: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    // slice::sort_by_key is a stable sort.
    items.sort_by_key(|item| Reverse(key(item)));
}

/// The `n` highest-ranked items by `key`, ties in input order.
pub fn top_n<T, K, F>(items: &[T], n: usize, mut key: F) -> Vec<&T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    stable_desc_by(&mut ranked, |item| key(*item));
    ranked.truncate(n);
    ranked
}

/// The `n` largest `(label, count)` entries.
pub fn ranked_entries(counts: &OrderedCounts, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().collect();
    stable_desc_by(&mut entries, |(_, count)| *count);
    entries.truncate(n);
    entries
}

/// Messages ordered by their attached ranking value.
///
/// Top lists arrive pre-ranked, but a message without a `count` sinks to
/// the bottom instead of breaking the order.
pub fn ranked_messages(messages: &[TelegramMessage], n: usize) -> Vec<&TelegramMessage> {
    top_n(messages, n, |m| m.count.unwrap_or(0))
}

/// Podium label for a 0-based rank.
pub fn podium(rank: usize) -> Option<&'static str> {
    match rank {
        0 => Some("🥇"),
        1 => Some("🥈"),
        2 => Some("🥉"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_descending() {
        let items = vec![3, 9, 1, 7];
        let top = top_n(&items, 2, |x| *x);
        assert_eq!(top, vec![&9, &7]);
    }

    #[test]
    fn test_top_n_is_stable() {
        let items = vec![("a", 5), ("b", 8), ("c", 5), ("d", 8), ("e", 5)];
        let top = top_n(&items, 5, |(_, count)| *count);
        let labels: Vec<&str> = top.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let items = vec![1, 2];
        assert_eq!(top_n(&items, 10, |x| *x).len(), 2);
        assert!(top_n(&Vec::<u64>::new(), 3, |x| *x).is_empty());
    }

    #[test]
    fn test_ranked_entries_keep_tie_order() {
        let counts = OrderedCounts::from_pairs([("luz", 4), ("bloque", 9), ("corriente", 4)]);
        let ranked = ranked_entries(&counts, 3);
        assert_eq!(ranked, vec![("bloque", 9), ("luz", 4), ("corriente", 4)]);
    }

    #[test]
    fn test_ranked_messages_by_count() {
        let messages = vec![
            TelegramMessage { id: 1, count: Some(10), ..Default::default() },
            TelegramMessage { id: 2, count: None, ..Default::default() },
            TelegramMessage { id: 3, count: Some(30), ..Default::default() },
        ];
        let ids: Vec<u64> = ranked_messages(&messages, 3).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_podium() {
        assert_eq!(podium(0), Some("🥇"));
        assert_eq!(podium(2), Some("🥉"));
        assert_eq!(podium(3), None);
    }
}

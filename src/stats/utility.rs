use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

/// Frequency breakdown ordered by descending count. Values with equal
/// counts keep first-seen order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, u64)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (u64, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    let mut ordered: Vec<_> = counts.into_iter().collect();
    ordered.sort_by_key(|(_, (count, first_seen))| (Reverse(*count), *first_seen));
    ordered
        .into_iter()
        .map(|(value, (count, _))| (value, count))
        .collect()
}

/// Most frequent value and its count. Ties break toward the value seen
/// first; `None` when the input yields no values.
pub fn mode<T, I>(values: I) -> Option<(T, u64)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_of_empty_input_is_none() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(vec![1, 2, 2, 3, 2]), Some((2, 3)));
    }

    #[test]
    fn test_mode_tie_breaks_toward_first_seen() {
        assert_eq!(mode(vec!["b", "a", "a", "b"]), Some(("b", 2)));
        assert_eq!(mode(vec![7, 7, 9, 9, 3]), Some((7, 2)));
    }

    #[test]
    fn test_value_counts_orders_by_descending_count() {
        let counts = value_counts(vec!["x", "y", "y", "y", "z", "z"]);
        assert_eq!(counts, vec![("y", 3), ("z", 2), ("x", 1)]);
    }

    #[test]
    fn test_value_counts_equal_counts_keep_first_seen_order() {
        let counts = value_counts(vec!["beta", "alpha", "beta", "alpha"]);
        assert_eq!(counts, vec![("beta", 2), ("alpha", 2)]);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[100.0, 200.0, 300.0]), 200.0);
    }
}

/// Stable ascending sort by distance; equal distances keep their relative order.
pub fn rank_by_distance<T>(items: &mut [T], distance: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_ascending_and_keeps_ties_in_order() {
        let mut items = vec![("c", 3.0), ("a1", 1.0), ("b", 2.0), ("a2", 1.0)];
        rank_by_distance(&mut items, |(_, d)| *d);
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a1", "a2", "b", "c"]);
    }
}

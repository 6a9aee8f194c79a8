//! Lexicographic k-subset enumeration

/// Visit every `k`-element subset of `0..n` in lexicographic order
///
/// Each subset is passed as a strictly increasing index slice. Nothing is visited when
/// `n == 0`, `k == 0` or `k > n`. The index buffer is local to the call, so `visit` may
/// itself call `for_each_combination` (the enumerator does exactly that).
pub fn for_each_combination<F>(n: usize, k: usize, mut visit: F)
where
    F: FnMut(&[usize]),
{
    if n == 0 || k == 0 || k > n {
        return;
    }

    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        visit(&indices);

        // Rightmost position that has not reached its final value
        let Some(pos) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return;
        };

        indices[pos] += 1;
        for next in pos + 1..k {
            indices[next] = indices[next - 1] + 1;
        }
    }
}

/// Collect all `k`-subsets of `0..n` in lexicographic order
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    for_each_combination(n, k, |indices| result.push(indices.to_vec()));
    result
}

/// Binomial coefficient C(n, k), saturating at `u64::MAX`
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut acc: u128 = 1;

    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1)
        acc = acc * (n - i) / (i + 1);
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }

    acc as u64
}

/// Number of non-empty subsets of a `d`-element set, `2^d - 1`
pub fn subset_count(d: usize) -> u64 {
    if d >= 64 {
        u64::MAX
    } else {
        (1u64 << d) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lexicographic_order() {
        let combos = combinations(4, 2);
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(combinations(0, 0).is_empty());
        assert!(combinations(0, 1).is_empty());
        assert!(combinations(3, 0).is_empty());
        assert!(combinations(2, 3).is_empty());
        assert_eq!(combinations(3, 3), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_reentrant_visit() {
        let mut pairs = Vec::new();
        for_each_combination(3, 1, |outer| {
            for_each_combination(2, 2, |inner| {
                pairs.push((outer[0], inner.to_vec()));
            });
        });

        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|(_, inner)| inner == &vec![0, 1]));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(10, 10), 1);
        assert_eq!(binomial(3, 5), 0);
        assert_eq!(binomial(52, 5), 2_598_960);
    }

    #[test]
    fn test_subset_count() {
        assert_eq!(subset_count(0), 0);
        assert_eq!(subset_count(3), 7);
        assert_eq!(subset_count(64), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_count_matches_binomial(n in 1usize..10, k in 1usize..10) {
            let count = combinations(n, k).len() as u64;
            prop_assert_eq!(count, binomial(n, k));
        }

        #[test]
        fn prop_subsets_sorted_and_ordered(n in 1usize..9, k in 1usize..9) {
            let combos = combinations(n, k);
            for combo in &combos {
                prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(combo.iter().all(|&i| i < n));
            }
            for pair in combos.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn prop_all_sizes_sum_to_power_set(d in 0usize..12) {
            let total: u64 = (1..=d).map(|k| combinations(d, k).len() as u64).sum();
            prop_assert_eq!(total, subset_count(d));
        }
    }
}

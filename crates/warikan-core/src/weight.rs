//! Rank-based linear role weights.
//!
//! `weight_i = 1 + alpha * (n - 1 - i)` with `alpha = tilt / 100`. Weights are
//! kept as integers scaled by [`WEIGHT_SCALE`] so shares stay exact.

use crate::model::Role;

/// Factor every scaled weight carries (`scaled = weight * WEIGHT_SCALE`).
pub const WEIGHT_SCALE: i128 = 100;

/// Scaled weight of the role at `index` among `role_count` roles.
pub fn scaled_weight(role_count: usize, index: usize, tilt: u8) -> i128 {
    debug_assert!(index < role_count);
    let steps_above_lowest = role_count.saturating_sub(1).saturating_sub(index) as i128;
    WEIGHT_SCALE + i128::from(tilt) * steps_above_lowest
}

/// Unscaled weight, for display.
pub fn weight(role_count: usize, index: usize, tilt: u8) -> f64 {
    scaled_weight(role_count, index, tilt) as f64 / WEIGHT_SCALE as f64
}

/// Scaled weights for every rank, highest rank first.
pub fn role_weights(role_count: usize, tilt: u8) -> Vec<i128> {
    (0..role_count)
        .map(|i| scaled_weight(role_count, i, tilt))
        .collect()
}

/// `sum(weight_i * headcount_i)`, scaled.
pub fn total_weight(weights: &[i128], roles: &[Role]) -> i128 {
    weights
        .iter()
        .zip(roles)
        .map(|(w, r)| w * i128::from(r.headcount))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tilt_is_flat() {
        assert_eq!(role_weights(4, 0), vec![100, 100, 100, 100]);
        assert_eq!(weight(4, 0, 0), 1.0);
    }

    #[test]
    fn full_tilt_spans_n_to_one() {
        let weights: Vec<f64> = (0..4).map(|i| weight(4, i, 100)).collect();
        assert_eq!(weights, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn half_tilt() {
        assert_eq!(role_weights(3, 50), vec![200, 150, 100]);
    }

    #[test]
    fn weight_never_increases_with_rank_index() {
        for n in 1..8 {
            for tilt in 0..=100u8 {
                let weights = role_weights(n, tilt);
                assert!(
                    weights.windows(2).all(|w| w[0] >= w[1]),
                    "n={n} tilt={tilt}: {weights:?}"
                );
                assert_eq!(*weights.last().unwrap(), WEIGHT_SCALE);
            }
        }
    }

    #[test]
    fn total_weight_counts_heads() {
        let roles = vec![Role::new("A", 2), Role::new("B", 3)];
        let weights = role_weights(2, 50);
        assert_eq!(total_weight(&weights, &roles), 150 * 2 + 100 * 3);

        let empty = vec![Role::new("A", 0), Role::new("B", 0)];
        assert_eq!(total_weight(&weights, &empty), 0);
    }
}

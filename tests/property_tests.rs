//! Property-based tests.
//!
//! Relational distances are checked against the Euclidean geometry they are
//! supposed to reproduce, and the windowed ranking against a full sort.

use proptest::prelude::*;
use relgas::{
    check_convex_coefficients, check_dissimilarity_matrix, distances_to_prototypes, lambda,
    nearest_prototypes, normalization_terms, pairwise, train, Euclidean,
};

// Reference implementations

fn ref_squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn ref_mean(alpha: &[f64], points: &[Vec<f64>]) -> Vec<f64> {
    let mut w = vec![0.0; points[0].len()];
    for (a, p) in alpha.iter().zip(points) {
        for (w_d, p_d) in w.iter_mut().zip(p) {
            *w_d += a * p_d;
        }
    }
    w
}

fn ref_ranking(distances: &[f64], window: usize) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = distances.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));
    indexed.truncate(window);
    indexed.into_iter().map(|(i, _)| i).collect()
}

fn normalize(row: Vec<f64>) -> Vec<f64> {
    let total: f64 = row.iter().sum();
    row.into_iter().map(|a| a / total).collect()
}

/// Points in the plane plus convex coefficient rows over them.
fn arb_points_and_alpha() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    (2usize..10, 1usize..5).prop_flat_map(|(m, k)| {
        (
            proptest::collection::vec(proptest::collection::vec(-10.0f64..10.0, 2), m),
            proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, m), k),
        )
            .prop_map(|(points, raw)| (points, raw.into_iter().map(normalize).collect()))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    /// On Euclidean data, relational distances equal squared distances to
    /// the prototype means.
    #[test]
    fn relational_matches_euclidean((points, alpha) in arb_points_and_alpha()) {
        let d = pairwise(&points, &Euclidean);
        let z = normalization_terms(&d, &alpha).unwrap();
        let dp = distances_to_prototypes(&d, &alpha, &z).unwrap();

        for (k, a) in alpha.iter().enumerate() {
            let w = ref_mean(a, &points);
            for (i, p) in points.iter().enumerate() {
                let expected = ref_squared_distance(p, &w);
                let tolerance = 1e-7 * (1.0 + expected.abs());
                prop_assert!(
                    (dp[i][k] - expected).abs() < tolerance,
                    "Dp[{}][{}] = {} vs {}", i, k, dp[i][k], expected
                );
            }
        }
    }

    /// Normalization terms are minus half the mean squared spread, hence ≤ 0.
    #[test]
    fn normalization_terms_nonpositive((points, alpha) in arb_points_and_alpha()) {
        let d = pairwise(&points, &Euclidean);
        for z in normalization_terms(&d, &alpha).unwrap() {
            prop_assert!(z <= 1e-12, "z = {}", z);
        }
    }

    /// Windowed insertion ranking agrees with a stable full sort.
    #[test]
    fn ranking_matches_sort(
        distances in proptest::collection::vec(0.0f64..5.0, 1..40),
        window in 1usize..40,
    ) {
        let window = window.min(distances.len());
        prop_assert_eq!(nearest_prototypes(&distances, window), ref_ranking(&distances, window));
    }

    /// Ties are frequent on a coarse grid; ranking must still match.
    #[test]
    fn ranking_matches_sort_with_ties(
        distances in proptest::collection::vec(0u8..4, 1..30),
        window in 1usize..30,
    ) {
        let distances: Vec<f64> = distances.into_iter().map(f64::from).collect();
        let window = window.min(distances.len());
        prop_assert_eq!(nearest_prototypes(&distances, window), ref_ranking(&distances, window));
    }

    /// λ runs from K / 2 down to 0.01, strictly decreasing.
    #[test]
    fn lambda_anneals(k in 1usize..100, t in 2usize..60) {
        prop_assert_eq!(lambda(0, k, t).unwrap(), k as f64 / 2.0);
        prop_assert_eq!(lambda(t - 1, k, t).unwrap(), 0.01);
        for epoch in 1..t {
            prop_assert!(lambda(epoch, k, t).unwrap() < lambda(epoch - 1, k, t).unwrap());
        }
    }

    /// Metric matrices are always accepted by the validator.
    #[test]
    fn pairwise_is_valid(
        points in proptest::collection::vec(proptest::collection::vec(-1e3f64..1e3, 3), 1..12),
    ) {
        prop_assert!(check_dissimilarity_matrix(&pairwise(&points, &Euclidean)).is_ok());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    })]

    /// Whatever the data, training ends with valid convex combinations and
    /// one error per epoch plus the final one.
    #[test]
    fn training_keeps_coefficients_convex(
        points in proptest::collection::vec(proptest::collection::vec(-5.0f64..5.0, 2), 1..15),
        k in 1usize..6,
        t in 1usize..8,
        seed in any::<u64>(),
    ) {
        use rand::SeedableRng;

        let d = pairwise(&points, &Euclidean);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let model = train(&d, k, t, &mut rng).unwrap();

        prop_assert!(check_convex_coefficients(points.len(), k, model.convex_coefficients()).is_ok());
        prop_assert_eq!(model.history().unwrap().quantization_errors().len(), t + 1);
        prop_assert_eq!(model.assignments().len(), points.len());
        prop_assert!(model.assignments().iter().all(|&a| a < k));
    }
}

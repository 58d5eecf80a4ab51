//! End-to-end tests: training on clustered data and querying fixed models.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use relgas::{
    cross, distances_to_prototypes, normalization_terms, pairwise, train, Euclidean, Model,
    NeuralGas,
};

const X: [f64; 5] = [1.0, 1.1, 3.0, 3.1, 3.2];

fn points_1d(x: &[f64]) -> Vec<Vec<f64>> {
    x.iter().map(|&v| vec![v]).collect()
}

/// Two prototypes with means ≈1.04 and ≈3.07 over five points on a line.
fn two_cluster_model() -> Model {
    let d = pairwise(&points_1d(&X), &Euclidean);
    let alpha = vec![vec![0.6, 0.4, 0.0, 0.0, 0.0], vec![0.0, 0.0, 0.5, 0.3, 0.2]];
    let z = normalization_terms(&d, &alpha).unwrap();
    let dp = distances_to_prototypes(&d, &alpha, &z).unwrap();
    Model::new(alpha, dp, z).unwrap()
}

#[test]
fn test_fixed_model_assignments() {
    assert_eq!(two_cluster_model().assignments(), vec![0, 0, 1, 1, 1]);
}

#[test]
fn test_fixed_model_cluster_members() {
    let model = two_cluster_model();
    assert_eq!(model.all_cluster_members(), vec![vec![0, 1], vec![2, 3, 4]]);
    assert_eq!(model.cluster_members(1), vec![2, 3, 4]);

    let assignments = model.assignments();
    assert_eq!(model.cluster_members_from(0, &assignments).unwrap(), vec![0, 1]);
}

#[test]
fn test_fixed_model_exemplars() {
    assert_eq!(two_cluster_model().exemplars(), vec![0, 3]);
}

#[test]
fn test_fixed_model_classify() {
    let model = two_cluster_model();
    let queries = [1.0, -5.0, 1.5, 2.5, 3.0, 1000.0];
    let d = cross(&points_1d(&queries), &points_1d(&X), &Euclidean);

    let labels = model.classify(&d).unwrap();
    for (&q, &label) in queries.iter().zip(&labels) {
        let expected = if q < 2.0 { 0 } else { 1 };
        assert_eq!(label, expected, "query {q}");
    }

    for (row, &label) in d.iter().zip(&labels) {
        assert_eq!(model.classify_one(row).unwrap(), label);
    }
}

#[test]
fn test_fixed_model_distances_are_euclidean() {
    let model = two_cluster_model();
    let means = [0.6 * 1.0 + 0.4 * 1.1, 0.5 * 3.0 + 0.3 * 3.1 + 0.2 * 3.2];
    for (i, row) in model.distances_to_prototypes().iter().enumerate() {
        for (k, &dp) in row.iter().enumerate() {
            let expected = (X[i] - means[k]).powi(2);
            assert!((dp - expected).abs() < 1e-9, "Dp[{i}][{k}] = {dp}, expected {expected}");
        }
    }
}

/// 90 points in three Gaussian blobs centred at (0, 0), (1, 0), (2, 0).
fn gaussian_blobs(sigma: f64, seed: u64) -> Vec<Vec<f64>> {
    let m = 90;
    let k = 3;
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sigma).unwrap();
    (0..m)
        .map(|i| {
            let cluster = (i * k / m) as f64;
            vec![cluster + noise.sample(&mut rng), noise.sample(&mut rng)]
        })
        .collect()
}

#[test]
fn test_training_recovers_gaussian_clusters() {
    let sigma = 0.1;
    let data = gaussian_blobs(sigma, 2024);
    let d = pairwise(&data, &Euclidean);

    let model = NeuralGas::new(3)
        .with_epochs(10)
        .with_seed(17)
        .fit(&d)
        .unwrap();

    // Even split, and every cluster is one contiguous block of generated points.
    for members in model.all_cluster_members() {
        assert_eq!(members.len(), 30);
        assert_eq!(members[0] % 30, 0);
        for (j, &i) in members.iter().enumerate() {
            assert_eq!(i, members[0] + j);
        }
    }

    // Prototype means sit near the true centres.
    for alpha in model.convex_coefficients() {
        let mut w = [0.0; 2];
        for (a, point) in alpha.iter().zip(&data) {
            w[0] += a * point[0];
            w[1] += a * point[1];
        }
        assert!((w[0] - w[0].round()).abs() < 2.0 * sigma, "prototype at {w:?}");
        assert!(w[1].abs() < 2.0 * sigma, "prototype at {w:?}");
    }
}

#[test]
fn test_training_history() {
    let data = gaussian_blobs(0.1, 5);
    let d = pairwise(&data, &Euclidean);
    let model = NeuralGas::new(3).with_epochs(12).with_seed(3).fit(&d).unwrap();

    let history = model.history().expect("trained models carry a history");
    assert_eq!(history.n_epochs(), 12);
    assert_eq!(history.quantization_errors().len(), 13);
    assert!(history.quantization_errors().iter().all(|e| e.is_finite()));

    // The last entry is crisp, the others soft: only the last one is
    // recomputable from the final model.
    let crisp: f64 = model
        .distances_to_prototypes()
        .iter()
        .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
        .sum();
    assert!((history.final_error() - crisp).abs() < 1e-9);
}

#[test]
fn test_soft_error_uses_distances_before_update() {
    // K = 1, T = 1: λ = 0.01 and H is all ones, so errors[0] is the summed
    // distance to the random initial prototype, not to the centroid.
    let seed = 31;
    let data = gaussian_blobs(0.1, 8);
    let d = pairwise(&data, &Euclidean);
    let m = d.len();

    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<f64> = (0..m).map(|_| rng.random::<f64>()).collect();
    let total: f64 = raw.iter().sum();
    let initial = vec![raw.into_iter().map(|a| a / total).collect::<Vec<f64>>()];
    let z = normalization_terms(&d, &initial).unwrap();
    let dp = distances_to_prototypes(&d, &initial, &z).unwrap();
    let expected: f64 = dp.iter().map(|row| row[0]).sum();

    let model = train(&d, 1, 1, &mut StdRng::seed_from_u64(seed)).unwrap();
    let history = model.history().unwrap();
    let soft = history.quantization_errors()[0];
    assert!(
        (soft - expected).abs() <= 1e-12 * expected,
        "soft error {soft}, expected {expected}"
    );

    // One crisp step lands on the centroid, which can only do better.
    assert!(history.final_error() < soft);
}

#[test]
fn test_training_on_new_points() {
    let data = gaussian_blobs(0.1, 99);
    let d = pairwise(&data, &Euclidean);
    let model = NeuralGas::new(3).with_epochs(10).with_seed(5).fit(&d).unwrap();

    // A fresh point at each centre lands in the same cluster as the
    // training points generated there.
    let assignments = model.assignments();
    let queries = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]];
    let labels = model.classify(&cross(&queries, &data, &Euclidean)).unwrap();
    assert_eq!(labels, vec![assignments[0], assignments[30], assignments[60]]);
}

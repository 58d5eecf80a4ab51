//! Relational Clustering on a Line
//!
//! Five points, two groups, known only through their pairwise distances.
//!
//! # What the Model Holds
//!
//! | Quantity | Shape | Meaning                                  |
//! |----------|-------|------------------------------------------|
//! | α        | K × m | prototype k as a mix of training points  |
//! | Dp       | m × K | squared distance point → prototype      |
//! | z        | K     | -½ α_k D² α_kᵀ, reused for new points    |
//!
//! New points are classified from their distances to the training points
//! alone, using the stored α and z.
//!
//! ```bash
//! cargo run --example two_clusters --release
//! ```

use relgas::{cross, pairwise, Euclidean, NeuralGas};

fn main() {
    let x = [1.0, 1.1, 3.0, 3.1, 3.2];
    let points: Vec<Vec<f64>> = x.iter().map(|&v| vec![v]).collect();
    let d = pairwise(&points, &Euclidean);

    let model = NeuralGas::new(2)
        .with_epochs(30)
        .with_seed(42)
        .fit(&d)
        .expect("valid dissimilarity matrix");

    for (k, alpha) in model.convex_coefficients().iter().enumerate() {
        let mean: f64 = alpha.iter().zip(&x).map(|(a, v)| a * v).sum();
        println!("prototype {k}: mean {mean:.3}, members {:?}", model.cluster_members(k));
    }
    println!("exemplars: {:?}", model.exemplars());

    if let Some(history) = model.history() {
        let errors = history.quantization_errors();
        println!(
            "soft error epoch 0: {:.4}, crisp error after {} epochs: {:.4}",
            errors[0],
            history.n_epochs(),
            history.final_error()
        );
    }

    let queries = [-5.0, 1.5, 2.5, 1000.0];
    let query_points: Vec<Vec<f64>> = queries.iter().map(|&v| vec![v]).collect();
    let labels = model
        .classify(&cross(&query_points, &points, &Euclidean))
        .expect("one distance per training point");
    for (q, label) in queries.iter().zip(labels) {
        println!("query {q:>7}: cluster {label}");
    }
}

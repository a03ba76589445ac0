//! Bagged regression trees over a single numeric feature.
//!
//! Each tree is grown on a bootstrap sample of the training rows, splitting on
//! the threshold that minimises the summed squared error of the two children.
//! Leaves predict the mean target of their rows; the forest averages its
//! trees. Inputs beyond the training range fall into the outermost leaves, so
//! forecasts past the last observed day are flat.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::regression::{check_training_data, Regressor};
use super::{ForecastError, ForecastResult};

/// Nodes with fewer rows than this become leaves.
const MIN_SAMPLES_SPLIT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf { value: f64 },
    Split { threshold: f64, left: usize, right: usize },
}

/// A regression tree stored as an arena of nodes; index 0 is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow a tree on `(x, y)` samples. The samples need not be sorted.
    pub fn fit(mut samples: Vec<(f64, f64)>, max_depth: Option<usize>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        // (node id, start, end, depth); rows of a node are contiguous once sorted
        let mut pending = vec![(0usize, 0usize, samples.len(), 0usize)];

        while let Some((id, start, end, depth)) = pending.pop() {
            let rows = &samples[start..end];
            let splittable = rows.len() >= MIN_SAMPLES_SPLIT && max_depth.map_or(true, |d| depth < d);

            match splittable.then(|| best_split(rows)).flatten() {
                Some((offset, threshold)) => {
                    let left = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::Leaf { value: 0.0 });
                    nodes.push(Node::Leaf { value: 0.0 });
                    nodes[id] = Node::Split {
                        threshold,
                        left,
                        right,
                    };
                    pending.push((left, start, start + offset, depth + 1));
                    pending.push((right, start + offset, end, depth + 1));
                }
                None => nodes[id] = Node::Leaf { value: mean(rows) },
            }
        }

        Self { nodes }
    }

    pub fn predict_one(&self, x: f64) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    threshold,
                    left,
                    right,
                } => id = if x <= threshold { left } else { right },
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        walk(&self.nodes, 0)
    }
}

fn mean(rows: &[(f64, f64)]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.1).sum::<f64>() / rows.len() as f64
}

/// Best split of x-sorted rows as `(offset of the right child, threshold)`.
///
/// Returns `None` when the rows are pure or share a single x value.
fn best_split(rows: &[(f64, f64)]) -> Option<(usize, f64)> {
    let first_y = rows.first()?.1;
    if rows.iter().all(|r| r.1 == first_y) {
        return None;
    }

    let n = rows.len();
    let total_sum: f64 = rows.iter().map(|r| r.1).sum();
    let total_sq: f64 = rows.iter().map(|r| r.1 * r.1).sum();

    let mut left_sum = 0.0;
    let mut left_sq = 0.0;
    let mut best: Option<(usize, f64, f64)> = None;

    for i in 1..n {
        let (x_prev, y_prev) = rows[i - 1];
        left_sum += y_prev;
        left_sq += y_prev * y_prev;

        let x_next = rows[i].0;
        if x_prev == x_next {
            continue;
        }

        let n_left = i as f64;
        let n_right = (n - i) as f64;
        let right_sum = total_sum - left_sum;
        let right_sq = total_sq - left_sq;
        let sse = (left_sq - left_sum * left_sum / n_left) + (right_sq - right_sum * right_sum / n_right);

        if best.map_or(true, |(_, _, b)| sse < b) {
            best = Some((i, x_prev + (x_next - x_prev) / 2.0, sse));
        }
    }

    best.map(|(offset, threshold, _)| (offset, threshold))
}

/// Random forest of bootstrap-trained [`RegressionTree`]s.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    max_depth: Option<usize>,
    seed: u64,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize, max_depth: Option<usize>, seed: u64) -> Self {
        Self {
            n_estimators,
            max_depth,
            seed,
            trees: Vec::new(),
        }
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, x: &[f64], y: &[f64]) -> ForecastResult<()> {
        check_training_data(x, y)?;
        if self.n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }

        let n = x.len();
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.trees = (0..self.n_estimators)
            .map(|_| {
                let sample: Vec<(f64, f64)> = (0..n)
                    .map(|_| {
                        let i = rng.gen_range(0..n);
                        (x[i], y[i])
                    })
                    .collect();
                RegressionTree::fit(sample, self.max_depth)
            })
            .collect();
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> ForecastResult<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(ForecastError::NotFitted);
        }
        let n_trees = self.trees.len() as f64;
        Ok(x.iter()
            .map(|&xi| self.trees.iter().map(|t| t.predict_one(xi)).sum::<f64>() / n_trees)
            .collect())
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_fits_step_function() {
        let samples = vec![(0.0, 1.0), (1.0, 1.0), (2.0, 5.0), (3.0, 5.0)];
        let tree = RegressionTree::fit(samples, None);

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_one(0.0), 1.0);
        assert_eq!(tree.predict_one(1.4), 1.0);
        assert_eq!(tree.predict_one(1.6), 5.0);
        assert_eq!(tree.predict_one(50.0), 5.0);
    }

    #[test]
    fn test_tree_memorises_distinct_points() {
        let samples: Vec<(f64, f64)> = (0..8).map(|i| (i as f64, (i * i) as f64)).collect();
        let tree = RegressionTree::fit(samples.clone(), None);
        for (x, y) in samples {
            assert_eq!(tree.predict_one(x), y);
        }
    }

    #[test]
    fn test_tree_depth_limit() {
        let samples: Vec<(f64, f64)> = (0..16).map(|i| (i as f64, i as f64)).collect();
        let tree = RegressionTree::fit(samples, Some(2));
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_tree_duplicate_x_averages() {
        let samples = vec![(1.0, 2.0), (1.0, 4.0), (1.0, 6.0)];
        let tree = RegressionTree::fit(samples, None);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.predict_one(1.0), 4.0);
    }

    #[test]
    fn test_forest_constant_target() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y = vec![3.0; 20];
        let mut forest = RandomForestRegressor::new(10, None, 42);
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.trees().len(), 10);
        for p in forest.predict(&[0.0, 5.0, 100.0]).unwrap() {
            assert!((p - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_forest_is_deterministic_for_a_seed() {
        let x: Vec<f64> = (0..30).map(f64::from).collect();
        let y: Vec<f64> = (0..30).map(|i| ((i * 7) % 5) as f64).collect();

        let mut a = RandomForestRegressor::new(25, None, 42);
        let mut b = RandomForestRegressor::new(25, None, 42);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        let probe: Vec<f64> = (0..40).map(f64::from).collect();
        assert_eq!(a.predict(&probe).unwrap(), b.predict(&probe).unwrap());
    }

    #[test]
    fn test_forest_extrapolates_flat() {
        let x: Vec<f64> = (0..30).map(f64::from).collect();
        let y: Vec<f64> = (0..30).map(|i| (i % 4) as f64).collect();
        let mut forest = RandomForestRegressor::new(20, None, 1);
        forest.fit(&x, &y).unwrap();

        let p = forest.predict(&[29.0, 30.0, 45.0]).unwrap();
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_forest_errors() {
        let forest = RandomForestRegressor::new(5, None, 42);
        assert!(matches!(forest.predict(&[1.0]), Err(ForecastError::NotFitted)));

        let mut empty = RandomForestRegressor::new(0, None, 42);
        assert!(empty.fit(&[1.0], &[1.0]).is_err());
    }
}

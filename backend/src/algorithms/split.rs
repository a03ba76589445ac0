//! Seeded train/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{ForecastError, ForecastResult};

/// Row indices of the training and held-out partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    /// Gather the values at the training indices.
    pub fn take_train<T: Copy>(&self, values: &[T]) -> Vec<T> {
        self.train.iter().map(|&i| values[i]).collect()
    }

    /// Gather the values at the held-out indices.
    pub fn take_test<T: Copy>(&self, values: &[T]) -> Vec<T> {
        self.test.iter().map(|&i| values[i]).collect()
    }
}

/// Shuffle `0..n` with a seeded generator and cut off the held-out tail.
///
/// The held-out partition gets `ceil(n * test_fraction)` rows, the training
/// partition the rest. Both partitions must end up non-empty.
///
/// # Arguments
///
/// * `n` - Number of rows to partition
/// * `test_fraction` - Share of rows held out, strictly between 0 and 1
/// * `seed` - Seed of the shuffle; equal seeds give equal partitions
///
/// # Errors
///
/// * [`ForecastError::InvalidParameter`] for a fraction outside (0, 1)
/// * [`ForecastError::InsufficientData`] when either partition would be empty
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> ForecastResult<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "test fraction must be between 0 and 1, got {}",
            test_fraction
        )));
    }

    let n_test = (n as f64 * test_fraction).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(ForecastError::InsufficientData {
            required: 2,
            available: n,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}

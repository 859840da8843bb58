//! Batch orchestration for Monte Carlo runs.
//!
//! A run of `n` paths is cut into batches of `batch_size` paths (the last
//! one possibly shorter). Each batch produces its own [`PairAccumulator`];
//! the accumulators are merged in batch order. With `parallel` enabled the
//! batches run on the rayon pool via `into_par_iter().map().collect()`,
//! which preserves that order, so parallel and sequential runs return
//! bit-identical estimates.

use rayon::prelude::*;
use tracing::trace;

use super::config::MonteCarloConfig;
use super::estimator::PairAccumulator;

/// One batch of a Monte Carlo run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSpec {
    /// Batch number, also the random stream index.
    pub index: u64,
    /// Global index of the first path in the batch.
    pub start: u64,
    /// Number of paths in the batch.
    pub len: usize,
}

impl BatchSpec {
    /// Batches covering `n_paths` in groups of `batch_size`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::mc::BatchSpec;
    ///
    /// let batches = BatchSpec::split(10, 4);
    /// let lens: Vec<usize> = batches.iter().map(|b| b.len).collect();
    /// assert_eq!(lens, vec![4, 4, 2]);
    /// assert_eq!(batches[2].start, 8);
    /// ```
    pub fn split(n_paths: usize, batch_size: usize) -> Vec<BatchSpec> {
        let batch_size = batch_size.max(1);
        (0..n_paths.div_ceil(batch_size))
            .map(|b| {
                let start = b * batch_size;
                BatchSpec {
                    index: b as u64,
                    start: start as u64,
                    len: batch_size.min(n_paths - start),
                }
            })
            .collect()
    }
}

/// Runs `simulate` over every batch of `n_paths` and merges the results.
///
/// `simulate` must depend only on the [`BatchSpec`] it is given.
pub fn run_batches<F>(config: &MonteCarloConfig, n_paths: usize, simulate: F) -> PairAccumulator
where
    F: Fn(BatchSpec) -> PairAccumulator + Send + Sync,
{
    let batches = BatchSpec::split(n_paths, config.batch_size());
    trace!(
        batches = batches.len(),
        parallel = config.parallel(),
        "dispatching batches"
    );

    let partials: Vec<PairAccumulator> = if config.parallel() && batches.len() > 1 {
        batches.into_par_iter().map(&simulate).collect()
    } else {
        batches.into_iter().map(&simulate).collect()
    };

    partials
        .iter()
        .fold(PairAccumulator::new(), |mut total, partial| {
            total.merge(partial);
            total
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PricerRng;

    fn config(parallel: bool, batch_size: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .seed(17)
            .batch_size(batch_size)
            .parallel(parallel)
            .build()
            .unwrap()
    }

    fn noisy(config: MonteCarloConfig) -> impl Fn(BatchSpec) -> PairAccumulator + Send + Sync {
        move |batch| {
            let mut rng = PricerRng::for_stream(config.seed(), batch.index);
            let mut acc = PairAccumulator::new();
            for _ in 0..batch.len {
                let z = rng.gen_normal();
                acc.push(z.exp(), z);
            }
            acc
        }
    }

    #[test]
    fn test_split_covers_all_paths() {
        let batches = BatchSpec::split(10_001, 1000);
        assert_eq!(batches.len(), 11);
        assert_eq!(batches.iter().map(|b| b.len).sum::<usize>(), 10_001);
        assert_eq!(batches.last().map(|b| b.len), Some(1));
        for (i, b) in batches.iter().enumerate() {
            assert_eq!(b.index, i as u64);
            assert_eq!(b.start, (i * 1000) as u64);
        }
    }

    #[test]
    fn test_split_empty() {
        assert!(BatchSpec::split(0, 16).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let par = config(true, 128);
        let seq = config(false, 128);
        let a = run_batches(&par, 5_000, noisy(par));
        let b = run_batches(&seq, 5_000, noisy(seq));
        assert_eq!(a, b);
        assert_eq!(a.count(), 5_000);
    }

    #[test]
    fn test_repeat_runs_identical() {
        let cfg = config(true, 256);
        let first = run_batches(&cfg, 3_000, noisy(cfg));
        let second = run_batches(&cfg, 3_000, noisy(cfg));
        assert_eq!(first.mean_x().to_bits(), second.mean_x().to_bits());
    }
}

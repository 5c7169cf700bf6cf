//! Single-stream path generator.

use tracing::debug;

use super::matrix::PathMatrix;
use super::paths::GbmStep;
use crate::rng::PricerRng;

/// Fills `matrix` from one random stream, path-major and step-minor.
///
/// Path `i` consumes draws `i*M .. (i+1)*M` of the stream seeded with `seed`,
/// so a pinned seed reproduces the matrix exactly.
pub fn generate_sequential(step: &GbmStep, seed: u64, matrix: &mut PathMatrix) {
    let (num_steps, num_paths) = matrix.shape();
    debug!(num_paths, num_steps, seed, "sequential generation started");

    let mut rng = PricerRng::from_seed(seed);
    for path in matrix.paths_mut() {
        step.evolve_path(&mut rng, path);
    }
}

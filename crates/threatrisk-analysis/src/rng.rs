//! Injectable random sources.
//!
//! Every estimator takes `&mut R: Rng`. The helpers here build the ChaCha
//! generator the engine uses: seeded for reproducible runs, OS entropy
//! otherwise.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator used by the engine and the simulators.
pub type RiskRng = ChaCha8Rng;

/// Build a generator from an optional seed.
pub fn rng_from_seed(seed: Option<u64>) -> RiskRng {
    match seed {
        Some(seed) => RiskRng::seed_from_u64(seed),
        None => RiskRng::from_entropy(),
    }
}

/// Independent stream `stream` of the generator seeded with `seed`.
///
/// Streams share the key but never overlap, so parallel workers can each own
/// one without sharing mutable state.
pub fn stream_rng(seed: u64, stream: u64) -> RiskRng {
    let mut rng = RiskRng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

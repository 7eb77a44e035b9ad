//! Run-seed resolution and the explicit pseudo-random stream threaded through generation.

use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Configured(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Configured(seed) | Self::Generated(seed) => seed,
        }
    }
}

/// Positive configured seeds are used as-is; anything else asks the clock.
pub fn resolve_seed(configured: i64) -> SeedChoice {
    if configured > 0 {
        SeedChoice::Configured(configured as u64)
    } else {
        SeedChoice::Generated(generate_runtime_seed())
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Clock-derived seed, kept inside `1..=i64::MAX` so it can be pinned back into a config.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    (mix_seed(entropy) >> 1).max(1)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Seeded stream owned by one generation run.
///
/// [`RandomStream::reseed`] rewinds to the run seed; the pipeline calls it at the
/// start of every floor's room seeding so layouts do not depend on earlier draws.
#[derive(Clone)]
pub struct RandomStream {
    seed: u64,
    rng: ChaCha8Rng,
}

impl fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomStream").field("seed", &self.seed).finish_non_exhaustive()
    }
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reseed(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Uniform draw from `min..=max`.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + (self.rng.next_u64() % span) as i64) as i32
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        debug_assert!(!items.is_empty());
        items[(self.rng.next_u64() % items.len() as u64) as usize]
    }
}

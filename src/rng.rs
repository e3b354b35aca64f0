//! Deterministic random streams keyed by string seeds.
//!
//! Every stream is a pure function of its seed string: the string is hashed
//! with a stable 64-bit hash and seeds a ChaCha-based [`StdRng`]. Two kinds of
//! seeds are in use:
//!
//! - the world seed, one per game, which drives global placement;
//! - location seeds, `"{world}-{location}-{claim_count}"`, which drive the
//!   guardians and loot of one location for one claim cycle.
//!
//! Location streams never depend on the order in which the world was built.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

use crate::ids::{GameId, LocationId};

/// A reproducible pseudo-random stream.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Create a stream from a seed string.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self {
            inner: StdRng::seed_from_u64(hash_seed(seed)),
        }
    }

    /// Stream for the world-level placement decisions of a game.
    #[must_use]
    pub fn for_world(world_seed: &GameId) -> Self {
        Self::from_seed_str(world_seed.as_str())
    }

    /// Stream for one claim cycle of one location.
    #[must_use]
    pub fn for_location(world_seed: &GameId, location: LocationId, claim_count: u32) -> Self {
        Self::from_seed_str(&location_seed(world_seed, location, claim_count))
    }

    /// Stream for cosmetic choices of a location that must survive reclaims.
    #[must_use]
    pub fn for_terrain(world_seed: &GameId, location: LocationId) -> Self {
        Self::from_seed_str(&format!("{world_seed}-{location}-terrain"))
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.inner.gen_range(0..n)
    }

    /// Uniform integer in `[min, max]`. Reversed bounds are swapped.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.gen_range(lo..=hi)
    }

    /// Uniform choice from a slice. `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.inner.gen_range(0..items.len());
        items.get(idx)
    }

    /// Weighted choice. `None` if the slice is empty or all weights are zero.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return None;
        }

        let mut roll = self.inner.gen_range(0..total);
        for (item, weight) in items {
            let weight = u64::from(*weight);
            if roll < weight {
                return Some(item);
            }
            roll -= weight;
        }
        None
    }

    /// Opaque identifier drawn from this stream.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Seed string for one claim cycle of a location.
#[must_use]
pub fn location_seed(world_seed: &GameId, location: LocationId, claim_count: u32) -> String {
    format!("{world_seed}-{location}-{claim_count}")
}

/// A fresh world seed for games started without an explicit one.
#[must_use]
pub fn random_world_seed() -> GameId {
    GameId::new(Uuid::new_v4().to_string())
}

/// Stable 64-bit hash of a seed string.
///
/// FNV-1a over the bytes followed by a splitmix64 finalizer so that short,
/// similar seeds still land far apart.
#[must_use]
pub fn hash_seed(seed: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    let mut x = seed.bytes().fold(FNV_OFFSET, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    });
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

//! Reproducible seeding of plate generation.
//!
//! Plate layout can be pinned to a fixed seed (or offset from the host's current one) without
//! shifting the random sequence that later pipeline stages consume: the host RNG is borrowed
//! through a [`SeedScope`] and put back exactly as found when the scope drops.

use crate::config::{PlateConfig, SeedMode};
use crate::rng::HostRng;
use glam::Vec2;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed location of one plate, recorded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedLocation {
    pub id: usize,
    pub x: f32,
    pub y: f32,
}

/// Immutable record of how a generation was seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSnapshot {
    pub width: u32,
    pub height: u32,
    pub seed_mode: SeedMode,
    /// Seed actually applied to the host RNG, if any.
    pub seed: Option<u32>,
    pub fixed_seed: Option<i64>,
    pub seed_offset: i64,
    /// Milliseconds since the Unix epoch at capture time.
    pub timestamp: Option<u64>,
    /// State word of the host RNG right after seeding.
    pub rng_state: Option<u32>,
    pub config: Option<PlateConfig>,
    pub seed_locations: Vec<SeedLocation>,
}

/// Compute the effective seed for a generation.
///
/// Fixed mode uses `fixed_seed`; engine mode uses the host's current state word. Either way the
/// offset is added and the result wrapped to 32 bits. `None` means there is nothing to apply.
pub fn derive_seed(
    state_word: Option<u32>,
    mode: SeedMode,
    fixed_seed: Option<i64>,
    offset: i64,
) -> Option<u32> {
    let base = match (mode, fixed_seed) {
        (SeedMode::Fixed, Some(fixed)) => fixed,
        _ => state_word? as i64,
    };
    Some(base.wrapping_add(offset) as u32)
}

/// Exclusive borrow of the host RNG for the duration of one generation.
///
/// Dropping the scope restores the pre-capture state, including on early return.
pub struct SeedScope<'a, R: HostRng> {
    rng: &'a mut R,
    original: Option<R::State>,
    snapshot: SeedSnapshot,
}

impl<R: HostRng> SeedScope<'_, R> {
    pub fn rng(&mut self) -> &mut R {
        self.rng
    }

    pub fn snapshot(&self) -> &SeedSnapshot {
        &self.snapshot
    }

    /// Whether the host state will be restored on drop.
    pub fn restores(&self) -> bool {
        self.original.is_some()
    }
}

impl<R: HostRng> Drop for SeedScope<'_, R> {
    fn drop(&mut self) {
        if let Some(state) = self.original.take() {
            self.rng.set_state(&state);
        }
    }
}

/// Snapshot the host RNG, apply the configured seed and return a scope that undoes it.
pub fn capture<'a, R: HostRng>(
    rng: &'a mut R,
    width: u32,
    height: u32,
    config: &PlateConfig,
) -> SeedScope<'a, R> {
    let mut snapshot = SeedSnapshot {
        width,
        height,
        seed_mode: config.seed_mode,
        seed: None,
        fixed_seed: config.fixed_seed,
        seed_offset: config.seed_offset,
        timestamp: timestamp_millis(),
        rng_state: None,
        config: None,
        seed_locations: Vec::new(),
    };

    let Some(original) = rng.state() else {
        log::debug!("host RNG exposes no state; plate generation runs unseeded");
        return SeedScope {
            rng,
            original: None,
            snapshot,
        };
    };

    let state_word = R::state_word(&original);
    let seed = derive_seed(state_word, config.seed_mode, config.fixed_seed, config.seed_offset);
    if let Some(seed) = seed {
        if rng.reseed(seed) {
            snapshot.seed = Some(seed);
            snapshot.rng_state = rng.state().as_ref().and_then(R::state_word);
        } else {
            log::debug!("host RNG cannot be reseeded; keeping its current stream");
            snapshot.rng_state = state_word;
        }
    } else {
        snapshot.rng_state = state_word;
    }
    log::debug!(
        "captured plate seed: mode={:?} seed={:?} offset={}",
        snapshot.seed_mode,
        snapshot.seed,
        snapshot.seed_offset
    );

    SeedScope {
        rng,
        original: Some(original),
        snapshot,
    }
}

/// Freeze the final diagnostic record: the captured snapshot plus config and plate seeds.
pub fn finalize(base: &SeedSnapshot, config: &PlateConfig, seeds: &[Vec2]) -> SeedSnapshot {
    SeedSnapshot {
        config: Some(config.clone()),
        seed_locations: seeds
            .iter()
            .enumerate()
            .map(|(id, p)| SeedLocation { id, x: p.x, y: p.y })
            .collect(),
        ..base.clone()
    }
}

fn timestamp_millis() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as u64)
}

//! Host random-number service.
//!
//! Generation only ever asks for "an integer below N". Hosts that can also expose and restore
//! their internal state let the seed manager borrow the stream and hand it back untouched.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait HostRng {
    /// Opaque snapshot of the generator's internal state.
    type State: Clone + std::fmt::Debug;

    /// Uniform integer in `0..max`. `max == 0` yields 0.
    fn next_below(&mut self, max: u32, label: &str) -> u32;

    /// Current internal state, or `None` when the host does not support introspection.
    fn state(&self) -> Option<Self::State> {
        None
    }

    fn set_state(&mut self, _state: &Self::State) {}

    /// Reseed in place. Returns `false` when unsupported.
    fn reseed(&mut self, _seed: u32) -> bool {
        false
    }

    /// 32-bit word of `state` used to derive an engine-mode seed.
    fn state_word(_state: &Self::State) -> Option<u32> {
        None
    }
}

/// Full-featured host RNG backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct EngineRng {
    inner: ChaCha8Rng,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaChaState {
    pub seed: [u8; 32],
    pub stream: u64,
    pub word_pos: u128,
}

impl EngineRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            inner: ChaCha8Rng::from_os_rng(),
        }
    }
}

impl HostRng for EngineRng {
    type State = ChaChaState;

    fn next_below(&mut self, max: u32, _label: &str) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.random_range(0..max)
    }

    fn state(&self) -> Option<ChaChaState> {
        Some(ChaChaState {
            seed: self.inner.get_seed(),
            stream: self.inner.get_stream(),
            word_pos: self.inner.get_word_pos(),
        })
    }

    fn set_state(&mut self, state: &ChaChaState) {
        let mut inner = ChaCha8Rng::from_seed(state.seed);
        inner.set_stream(state.stream);
        inner.set_word_pos(state.word_pos);
        self.inner = inner;
    }

    fn reseed(&mut self, seed: u32) -> bool {
        self.inner = ChaCha8Rng::seed_from_u64(seed as u64);
        true
    }

    fn state_word(state: &ChaChaState) -> Option<u32> {
        let head = u32::from_le_bytes([state.seed[0], state.seed[1], state.seed[2], state.seed[3]]);
        Some(head.wrapping_add(state.word_pos as u32))
    }
}

/// Wraps any `rand` generator without exposing its state.
///
/// Seed capture degrades to a no-op with this host; generation still works, just unseeded.
#[derive(Debug, Clone)]
pub struct OpaqueRng<R>(pub R);

impl<R: RngCore> HostRng for OpaqueRng<R> {
    type State = ();

    fn next_below(&mut self, max: u32, _label: &str) -> u32 {
        if max == 0 {
            return 0;
        }
        self.0.random_range(0..max)
    }
}

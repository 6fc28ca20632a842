//! Seeded generator for deterministic randomness.
//!
//! Every random decision in a battle (hit chances, freeze breaks, paralysis,
//! summon targets, decision tie-breaks) draws from a [`SeededRng`]. Given the
//! same seed the generator produces the same sequence, which is what makes a
//! battle replayable from its seed and command list alone.
//!
//! # Streams
//!
//! Unrelated concerns never share one generator. Each round derives its own
//! sub-streams with [`SeededRng::derive`], so adding a draw to the decision
//! engine cannot shift the combat rolls of the same round.

/// Sub-stream offsets combined with the battle seed and round number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Hit chances, summon targets and other action resolution rolls.
    Combat,
    /// Start-of-turn status rolls (freeze break, paralysis).
    Status,
    /// Opposing-side decision tie-breaks and random targeting.
    Decision,
}

impl Stream {
    pub const fn offset(self) -> u32 {
        match self {
            Stream::Combat => 1,
            Stream::Status => 2,
            Stream::Decision => 3,
        }
    }
}

/// Serializable generator position for exact resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngSnapshot {
    pub state: u32,
    pub initial_seed: u32,
    pub draws: u64,
}

/// 32-bit xorshift generator.
///
/// # Properties
///
/// - **Deterministic**: same seed always produces the same output
/// - **Small state**: 32 bits plus bookkeeping for snapshots
/// - **Clonable**: a clone continues the stream independently, so look-ahead
///   computations never disturb the caller's draw sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
    initial_seed: u32,
    draws: u64,
}

impl SeededRng {
    /// Draws discarded at construction; early xorshift output is weak for small seeds.
    const WARM_UP: usize = 10;

    /// Round multiplier used when deriving sub-streams.
    pub const TURN_STRIDE: u32 = 1_000_000;

    /// Creates a generator. A zero seed is coerced to 1 (xorshift has no zero state).
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        let mut rng = Self {
            state: seed,
            initial_seed: seed,
            draws: 0,
        };
        for _ in 0..Self::WARM_UP {
            rng.next_u32();
        }
        rng
    }

    /// Derives the generator for `stream` in `turn`: `seed + turn × 1_000_000 + offset`.
    pub fn derive(seed: u32, turn: u32, stream: Stream) -> Self {
        Self::new(
            seed.wrapping_add(turn.wrapping_mul(Self::TURN_STRIDE))
                .wrapping_add(stream.offset()),
        )
    }

    /// Advances the generator and returns the raw 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.draws += 1;
        x
    }

    /// Returns a value in [0, 1).
    pub fn next(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Returns true with probability `p` (clamped to [0, 1]).
    ///
    /// Certain outcomes (p ≤ 0 or p ≥ 1) still consume a draw so the
    /// stream position does not depend on the probability value.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next() < p.clamp(0.0, 1.0)
    }

    /// Uniform integer in [min, max] inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.next() * span as f64) as u32
    }

    /// Picks a uniformly random element of `items`.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = (self.next() * items.len() as f64) as usize;
        items.get(index.min(items.len() - 1))
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn initial_seed(&self) -> u32 {
        self.initial_seed
    }

    pub fn snapshot(&self) -> RngSnapshot {
        RngSnapshot {
            state: self.state,
            initial_seed: self.initial_seed,
            draws: self.draws,
        }
    }

    /// Rebuilds a generator at the exact position captured by `snapshot`.
    pub fn restore(snapshot: RngSnapshot) -> Self {
        Self {
            state: if snapshot.state == 0 { 1 } else { snapshot.state },
            initial_seed: snapshot.initial_seed,
            draws: snapshot.draws,
        }
    }
}

//! Deterministic random number generation for replay.
//!
//! Every rule that needs randomness (deck shuffles, coin flips, shuffled
//! reaction order) draws from the `GameRng` owned by the game state. There is
//! no ambient generator: the handle is threaded explicitly, and its seed is
//! recorded so a session can be replayed bit for bit.
//!
//! ```
//! use ccg_dispatch::core::GameRng;
//!
//! let deck: Vec<u32> = (0..30).collect();
//! let shuffled = |rng: &mut GameRng| {
//!     let mut cards = deck.clone();
//!     rng.shuffle(&mut cards);
//!     cards
//! };
//!
//! let mut a = GameRng::create(Some(42));
//! let mut b = GameRng::create(Some(42));
//! assert_eq!(shuffled(&mut a), shuffled(&mut b));
//!
//! // Without a seed the generator draws one from system entropy,
//! // and still reports it for the session record.
//! let mut fresh = GameRng::create(None);
//! let mut again = GameRng::create(Some(fresh.seed()));
//! assert_eq!(shuffled(&mut fresh), shuffled(&mut again));
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded, reproducible RNG.
///
/// ChaCha8 keeps generation fast while giving a stable, platform-independent
/// stream for a given seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Factory: use `seed` when given, otherwise draw a seed from system
    /// entropy.
    #[must_use]
    pub fn create(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Where the generator stands in its stream. Two sessions that made the
    /// same draws from the same seed report equal states.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

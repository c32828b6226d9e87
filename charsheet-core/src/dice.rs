//! Dice rolling.
//!
//! Checks draw their d20 from a [`DiceSource`] so callers can swap the
//! thread RNG for a seeded generator or a scripted sequence.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Number of faces on the check die.
pub const D20_SIDES: u32 = 20;

/// Something that can roll a d20.
pub trait DiceSource {
    /// A uniformly random value in `1..=20`.
    fn roll_d20(&mut self) -> u32;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_d20(&mut self) -> u32 {
        (**self).roll_d20()
    }
}

/// Adapts any `rand` generator into a [`DiceSource`].
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ThreadRng> {
    /// Dice backed by the thread-local RNG.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl Default for RngDice<ThreadRng> {
    fn default() -> Self {
        Self::thread()
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn roll_d20(&mut self) -> u32 {
        self.rng.gen_range(1..=D20_SIDES)
    }
}

/// Roll a d20 on the thread RNG.
pub fn roll_d20() -> u32 {
    RngDice::thread().roll_d20()
}

//! Random sources and die rolling.
//!
//! The rules never call a global random function: every roll and shuffle goes
//! through a `RandomSource`, so tests can replay a fixed sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::{Element, DICE_FACES};

/// Supplies uniform indices.
pub trait RandomSource {
    /// Returns an index in `0..bound`. `bound` is always > 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Production source backed by `SmallRng`.
pub struct SeededRng {
    rng: SmallRng,
}

impl SeededRng {
    /// Seeds deterministically; a seed of 0 draws from entropy instead.
    pub fn new(seed: u64) -> Self {
        if seed == 0 {
            SeededRng::from_entropy()
        } else {
            SeededRng { rng: SmallRng::seed_from_u64(seed) }
        }
    }

    pub fn from_entropy() -> Self {
        SeededRng { rng: SmallRng::from_entropy() }
    }
}

impl RandomSource for SeededRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of values, wrapping around, each reduced modulo the bound.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<usize>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<usize>) -> Self {
        ScriptedRng { values, pos: 0 }
    }

    /// A script that rolls exactly these die faces (and repeats them).
    pub fn faces(faces: &[Element]) -> Self {
        let values = faces
            .iter()
            .map(|f| DICE_FACES.iter().position(|d| d == f).unwrap_or(0))
            .collect();
        ScriptedRng::new(values)
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}

/// Draws `count` independent faces from the 8-face die.
pub fn roll_dice(count: usize, rng: &mut dyn RandomSource) -> Vec<Element> {
    (0..count)
        .map(|_| DICE_FACES[rng.next_index(DICE_FACES.len())])
        .collect()
}

/// Rerolls the dice at `indices`, leaving every other position unchanged.
/// Indices out of range are ignored; each listed position is rolled once.
pub fn reroll_selected(
    dice: &[Element],
    indices: &[usize],
    rng: &mut dyn RandomSource,
) -> Vec<Element> {
    let mut out = dice.to_vec();
    for (i, die) in out.iter_mut().enumerate() {
        if indices.contains(&i) {
            *die = DICE_FACES[rng.next_index(DICE_FACES.len())];
        }
    }
    out
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

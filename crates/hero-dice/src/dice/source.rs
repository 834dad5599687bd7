//! Random sources for six-sided dice.
//!
//! The engine never rolls dice itself. It asks a [`DieSource`] for faces,
//! which lets hosts plug in their own dice executor and lets tests script
//! every face.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces faces (1-6) for six-sided dice.
///
/// Implementations are treated as infallible. A source that cannot produce
/// a face should panic rather than invent one.
pub trait DieSource {
    /// Roll one d6.
    fn roll_d6(&mut self) -> u32;

    /// Roll `count` d6 at once, in order.
    fn roll_d6s(&mut self, count: usize) -> Vec<u32> {
        (0..count).map(|_| self.roll_d6()).collect()
    }
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn roll_d6(&mut self) -> u32 {
        (**self).roll_d6()
    }

    fn roll_d6s(&mut self, count: usize) -> Vec<u32> {
        (**self).roll_d6s(count)
    }
}

/// A source backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// A reproducible source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DieSource for RngSource<R> {
    fn roll_d6(&mut self) -> u32 {
        self.rng.random_range(1..=6)
    }
}

/// Every die shows the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSource(pub u32);

impl DieSource for FixedSource {
    fn roll_d6(&mut self) -> u32 {
        self.0
    }
}

/// Faces cycle 1, 2, ..., 6, 1, ...
#[derive(Debug, Clone, Default)]
pub struct CyclicSource {
    next: u32,
}

impl CyclicSource {
    /// Start the cycle at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the cycle at `face` (clamped to 1-6).
    pub fn starting_at(face: u32) -> Self {
        Self {
            next: face.clamp(1, 6) - 1,
        }
    }
}

impl DieSource for CyclicSource {
    fn roll_d6(&mut self) -> u32 {
        let face = self.next + 1;
        self.next = (self.next + 1) % 6;
        face
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<u32>,
    queue: VecDeque<u32>,
}

impl ScriptedSource {
    /// Replay `faces` in order. An empty script always rolls 1.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        let script: Vec<u32> = faces.into_iter().collect();
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }
}

impl DieSource for ScriptedSource {
    fn roll_d6(&mut self) -> u32 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(1)
    }
}

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseRoundSeedError, PlacedPiece, Template};

/// Seed for deterministic synthetic drawings.
///
/// Serialized as a 32 character big-endian hex string, so a seed printed by one
/// run can be passed back on the command line to reproduce it.
///
/// # Example
///
/// ```
/// use tablecraft_core::{RoundSeed, Scribbler, TableTemplate};
/// use rand::Rng as _;
///
/// let seed: RoundSeed = rand::rng().random();
/// let template = TableTemplate::default().build();
///
/// let a = Scribbler::with_seed(seed).traced(&template, 10, 5, 20);
/// let b = Scribbler::with_seed(seed).traced(&template, 10, 5, 20);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSeed([u8; 16]);

impl fmt::Display for RoundSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RoundSeed {
    type Err = ParseRoundSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRoundSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RoundSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoundSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<RoundSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RoundSeed(seed)
    }
}

/// Drawing surface of the game, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Generates synthetic drawings for calibrating scoring constants.
///
/// Two kinds of drawing are supported:
///
/// - [`Scribbler::traced`]: a player tracing the template with a shaky hand
/// - [`Scribbler::scattered`]: a player stamping pieces anywhere on the canvas
#[derive(Debug, Clone)]
pub struct Scribbler {
    seed: RoundSeed,
    rng: Pcg32,
}

impl Default for Scribbler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scribbler {
    /// Creates a scribbler with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: RoundSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> RoundSeed {
        self.seed
    }

    /// Places `count` pieces centred on randomly chosen template points, each
    /// shifted by up to `jitter` pixels on both axes.
    ///
    /// Returns no pieces for an empty template.
    pub fn traced(
        &mut self,
        template: &Template,
        count: usize,
        jitter: i32,
        piece_size: i32,
    ) -> Vec<PlacedPiece> {
        let points = template.points();
        if points.is_empty() {
            return vec![];
        }
        let jitter = jitter.max(0);
        (0..count)
            .map(|_| {
                let target = points[self.rng.random_range(0..points.len())];
                let dx = self.rng.random_range(-jitter..=jitter);
                let dy = self.rng.random_range(-jitter..=jitter);
                PlacedPiece::centered_at(target.x + dx, target.y + dy, piece_size)
            })
            .collect()
    }

    /// Places `count` pieces with centres uniformly distributed over the canvas.
    ///
    /// Returns no pieces for an empty canvas.
    pub fn scattered(&mut self, canvas: Canvas, count: usize, piece_size: i32) -> Vec<PlacedPiece> {
        if canvas.width <= 0 || canvas.height <= 0 {
            return vec![];
        }
        (0..count)
            .map(|_| {
                let x = self.rng.random_range(0..canvas.width);
                let y = self.rng.random_range(0..canvas.height);
                PlacedPiece::centered_at(x, y, piece_size)
            })
            .collect()
    }
}

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Shape;

/// Seed for deterministic piece generation.
///
/// A 128-bit seed, written as 32 hexadecimal digits. Two engines built from
/// the same seed and configuration draw the same shapes and spawn columns.
///
/// # Example
///
/// ```
/// use stackfall_engine::PieceSeed;
///
/// let seed: PieceSeed = "000000000000000000000000000000ff".parse().unwrap();
/// assert_eq!(seed.to_string(), "000000000000000000000000000000ff");
/// assert!("ff".parse::<PieceSeed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error returned when a [`PieceSeed`] string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Random source for the shapes and spawn columns of a game.
#[derive(Debug, Clone)]
pub(crate) struct PieceSource {
    rng: Pcg32,
}

impl PieceSource {
    pub(crate) fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a shape with kind and rotation chosen independently.
    pub(crate) fn draw_shape(&mut self) -> Shape {
        self.rng.random()
    }

    /// Draws a spawn column in `0..=max_col`.
    pub(crate) fn draw_column(&mut self, max_col: usize) -> usize {
        self.rng.random_range(0..=max_col)
    }
}

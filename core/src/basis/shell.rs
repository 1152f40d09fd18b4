use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Angular;

/// Angular momentum label of a shell as it appears in a basis set library.
///
/// `SP` is a combined label that only exists in library files, parsed shells never
/// carry it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShellType {
    S,
    P,
    D,
    F,
    G,
    H,
    I,
    K,
    L,
    M,
    SP,
}

impl ShellType {
    const SIMPLE: [ShellType; 10] = [
        ShellType::S,
        ShellType::P,
        ShellType::D,
        ShellType::F,
        ShellType::G,
        ShellType::H,
        ShellType::I,
        ShellType::K,
        ShellType::L,
        ShellType::M,
    ];

    /// Total angular momentum l, or `None` for the combined `SP` label.
    pub fn angular_momentum(self) -> Option<u32> {
        Self::SIMPLE
            .iter()
            .position(|&shell_type| shell_type == self)
            .map(|l| l as u32)
    }

    pub fn from_angular_momentum(l: u32) -> Option<Self> {
        Self::SIMPLE.get(l as usize).copied()
    }

    /// The shell type a set of cartesian powers belongs to.
    pub fn from_powers((i, j, k): Angular) -> Option<Self> {
        Self::from_angular_momentum(i + j + k)
    }

    /// All cartesian powers (i, j, k) with i + j + k = l, x-major in descending order.
    /// `SP` yields the s component followed by the three p components.
    pub fn cartesian_powers(self) -> Vec<Angular> {
        match self.angular_momentum() {
            Some(l) => generate_angular_vectors(l),
            None => {
                let mut powers = generate_angular_vectors(0);
                powers.extend(generate_angular_vectors(1));
                powers
            }
        }
    }
}

// generate all (i, j, k) such that i + j + k = angular
fn generate_angular_vectors(angular_magnitude: u32) -> Vec<Angular> {
    let l = angular_magnitude as usize;
    let mut angular_vectors = Vec::with_capacity((l + 1) * (l + 2) / 2);

    for i in (0..=angular_magnitude).rev() {
        for j in (0..=angular_magnitude - i).rev() {
            angular_vectors.push((i, j, angular_magnitude - i - j));
        }
    }

    angular_vectors
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown shell type '{0}'")]
pub struct UnknownShellType(pub String);

impl FromStr for ShellType {
    type Err = UnknownShellType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "S" => Self::S,
            "P" => Self::P,
            "D" => Self::D,
            "F" => Self::F,
            "G" => Self::G,
            "H" => Self::H,
            "I" => Self::I,
            "K" => Self::K,
            "L" => Self::L,
            "M" => Self::M,
            "SP" => Self::SP,
            _ => return Err(UnknownShellType(s.to_owned())),
        })
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Primitives of one contraction, sharing an angular momentum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shell {
    pub shell_type: ShellType,
    /// (exponent, contraction coefficient) pairs in library order
    pub primitives: Vec<(f64, f64)>,
}

impl Shell {
    pub fn exponents(&self) -> impl Iterator<Item = f64> + '_ {
        self.primitives.iter().map(|&(exponent, _)| exponent)
    }

    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.primitives.iter().map(|&(_, coefficient)| coefficient)
    }
}

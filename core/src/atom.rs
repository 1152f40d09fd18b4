use nalgebra::Vector3;

use crate::periodic_table;

/// Represents an atom in a molecule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Atom {
    pub(crate) position: Vector3<f64>,
    pub(crate) atomic_number: u32,
}

impl Atom {
    pub fn new(atomic_number: u32, position: Vector3<f64>) -> Self {
        Self {
            position,
            atomic_number,
        }
    }

    /// Returns `None` if the symbol is not in the periodic table
    pub fn from_symbol(symbol: &str, position: Vector3<f64>) -> Option<Self> {
        periodic_table::atomic_number(symbol)
            .map(|atomic_number| Self::new(atomic_number, position))
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }
}

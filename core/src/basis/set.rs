use std::collections::BTreeMap;

use nalgebra::Vector3;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{atom::Atom, library::ElementEntry, periodic_table};

use super::{ContractedGaussian, ContractionError, Shell};

/// Shells of every element of one basis set library, keyed by atomic number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasisTable {
    shells: BTreeMap<u32, Vec<Shell>>,
}

impl BasisTable {
    /// Create a new basis table given mappings from atomic number to the shells of that element
    pub fn new(shells: BTreeMap<u32, Vec<Shell>>) -> Self {
        Self { shells }
    }

    /// Folds parsed library entries in file order. A later entry for the same element
    /// replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = ElementEntry>) -> Self {
        let mut shells = BTreeMap::new();

        for entry in entries {
            if shells.insert(entry.atomic_number, entry.shells).is_some() {
                log::warn!(
                    "duplicate basis entry for {} ('{}') replaces the previous one",
                    periodic_table::symbol(entry.atomic_number).unwrap_or("?"),
                    entry.label
                );
            }
        }

        Self { shells }
    }

    /// Returns the shells of a given element, if it exists.
    pub fn shells(&self, atomic_number: u32) -> Option<&[Shell]> {
        self.shells.get(&atomic_number).map(Vec::as_slice)
    }

    /// Atomic numbers covered by this table, in ascending order
    pub fn elements(&self) -> impl Iterator<Item = u32> + '_ {
        self.shells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Shell])> + '_ {
        self.shells
            .iter()
            .map(|(&atomic_number, shells)| (atomic_number, shells.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// Normalized contracted gaussians for one element placed at `origin`: one function
    /// per cartesian component of every shell, in shell order.
    ///
    /// Returns `Ok(None)` if the table has no entry for the element.
    pub fn contracted_functions(
        &self,
        atomic_number: u32,
        origin: Vector3<f64>,
    ) -> Result<Option<Vec<ContractedGaussian>>, ContractionError> {
        let Some(shells) = self.shells(atomic_number) else {
            return Ok(None);
        };

        let components = shells
            .iter()
            .flat_map(|shell| {
                shell
                    .shell_type
                    .cartesian_powers()
                    .into_iter()
                    .map(move |angular| (shell, angular))
            })
            .collect::<Vec<_>>();

        #[cfg(feature = "rayon")]
        let components = components.into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let components = components.into_iter();

        components
            .map(|(shell, angular)| {
                let exponents = shell.exponents().collect::<Vec<_>>();
                let coefficients = shell.coefficients().collect::<Vec<_>>();
                ContractedGaussian::new(origin, angular, &exponents, &coefficients)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Normalized contracted gaussians centered on an atom
    pub fn basis_for(
        &self,
        atom: &Atom,
    ) -> Result<Option<Vec<ContractedGaussian>>, ContractionError> {
        self.contracted_functions(atom.atomic_number(), *atom.position())
    }
}

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::integrals::{AsContraction, Contraction, DefaultIntegrator, Integrator};

use super::{Angular, PrimitiveGaussian};

type Primitives<T> = SmallVec<[T; 6]>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ContractionError {
    /// The self overlap of the contraction is zero, negative or not a number, so it
    /// cannot be scaled to one. The coefficients are left untouched.
    #[error("self overlap {overlap} of the contraction is not positive")]
    DegenerateNormalization { overlap: f64 },

    #[error("got {exponents} exponents but {coefficients} contraction coefficients")]
    LengthMismatch {
        exponents: usize,
        coefficients: usize,
    },
}

/// A contracted gaussian that is still being assembled.
///
/// Primitives are appended one at a time. The coefficients only describe a normalized
/// function after [`normalize`](Self::normalize) has run on the final set of primitives,
/// which [`finish`](Self::finish) guarantees.
#[derive(Clone, Debug)]
pub struct ContractedGaussianBuilder {
    origin: Vector3<f64>,
    angular: Angular,
    primitives: Primitives<PrimitiveGaussian>,
    coefficients: Primitives<f64>,
    norms: Primitives<f64>,
    exponents: Primitives<f64>,
    normalized: bool,
}

impl ContractedGaussianBuilder {
    pub fn new(origin: Vector3<f64>, angular: Angular) -> Self {
        Self {
            origin,
            angular,
            primitives: SmallVec::new(),
            coefficients: SmallVec::new(),
            norms: SmallVec::new(),
            exponents: SmallVec::new(),
            normalized: false,
        }
    }

    /// Appends a primitive sharing the origin and angular part of this contraction.
    /// With `renormalize` set, the whole contraction is normalized right away.
    pub fn add_primitive(
        &mut self,
        exponent: f64,
        coefficient: f64,
        renormalize: bool,
    ) -> Result<(), ContractionError> {
        let primitive = PrimitiveGaussian::new(exponent, self.origin, self.angular);

        self.coefficients.push(coefficient);
        self.norms.push(primitive.norm());
        self.exponents.push(primitive.exponent());
        self.primitives.push(primitive);
        self.normalized = false;

        debug_assert_eq!(self.coefficients.len(), self.primitives.len());
        debug_assert_eq!(self.norms.len(), self.primitives.len());
        debug_assert_eq!(self.exponents.len(), self.primitives.len());

        if renormalize {
            self.normalize()?;
        }

        Ok(())
    }

    /// Scales the contraction coefficients so that the self overlap becomes one.
    /// Returns the self overlap before scaling.
    pub fn normalize(&mut self) -> Result<f64, ContractionError> {
        let overlap = self.self_overlap();

        if !(overlap > 0.0 && overlap.is_finite()) {
            return Err(ContractionError::DegenerateNormalization { overlap });
        }

        let overlap_sqrt = overlap.sqrt();
        for coefficient in &mut self.coefficients {
            *coefficient /= overlap_sqrt;
        }
        self.normalized = true;

        log::trace!(
            "normalized contraction of {} primitives, self overlap was {overlap}",
            self.len()
        );

        Ok(overlap)
    }

    /// Overlap integral of this contraction with itself, using the current coefficients
    pub fn self_overlap(&self) -> f64 {
        DefaultIntegrator::default().overlap((self.contraction(), self.contraction()))
    }

    /// Returns the coefficients, normalization constants and exponents of the primitives
    pub fn cne_list(&self) -> (&[f64], &[f64], &[f64]) {
        (
            self.coefficients.as_slice(),
            self.norms.as_slice(),
            self.exponents.as_slice(),
        )
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Normalizes the contraction, unless that already happened after the last primitive
    /// was added, and freezes it.
    pub fn finish(mut self) -> Result<ContractedGaussian, ContractionError> {
        if !self.is_empty() && !self.normalized {
            self.normalize()?;
        }

        Ok(ContractedGaussian {
            origin: self.origin,
            angular: self.angular,
            primitives: self.primitives,
            coefficients: self.coefficients,
            norms: self.norms,
            exponents: self.exponents,
        })
    }
}

impl AsContraction for ContractedGaussianBuilder {
    fn contraction(&self) -> Contraction<'_> {
        Contraction {
            origin: &self.origin,
            angular: self.angular,
            exponents: &self.exponents,
            coefficients: &self.coefficients,
            norms: &self.norms,
        }
    }
}

/// Normalized linear combination of [`PrimitiveGaussian`]s sharing an origin and
/// angular part.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractedGaussian {
    origin: Vector3<f64>,
    angular: Angular,
    primitives: Primitives<PrimitiveGaussian>,
    coefficients: Primitives<f64>,
    norms: Primitives<f64>,
    exponents: Primitives<f64>,
}

impl ContractedGaussian {
    /// Builds a normalized contraction from paired exponents and raw coefficients.
    pub fn new(
        origin: Vector3<f64>,
        angular: Angular,
        exponents: &[f64],
        coefficients: &[f64],
    ) -> Result<Self, ContractionError> {
        if exponents.len() != coefficients.len() {
            return Err(ContractionError::LengthMismatch {
                exponents: exponents.len(),
                coefficients: coefficients.len(),
            });
        }

        let mut builder = ContractedGaussianBuilder::new(origin, angular);
        for (&exponent, &coefficient) in exponents.iter().zip(coefficients) {
            builder.add_primitive(exponent, coefficient, false)?;
        }
        builder.finish()
    }

    /// Evaluate this basis function at a given position
    pub fn evaluate(&self, at: &Vector3<f64>) -> f64 {
        self.primitives()
            .map(|(coefficient, primitive)| coefficient * primitive.evaluate(at))
            .sum()
    }

    /// Evaluate this basis function on every point of a mesh
    pub fn mesh(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        let mut values = vec![0.0; points.len()];
        for (coefficient, primitive) in self.primitives() {
            for (value, primitive_value) in values.iter_mut().zip(primitive.mesh(points)) {
                *value += coefficient * primitive_value;
            }
        }
        values
    }

    /// Iterates (coefficient, primitive) pairs
    pub fn primitives(&self) -> impl Iterator<Item = (f64, &PrimitiveGaussian)> + '_ {
        self.coefficients.iter().copied().zip(&self.primitives)
    }

    /// Returns the coefficients, normalization constants and exponents of the primitives
    pub fn cne_list(&self) -> (&[f64], &[f64], &[f64]) {
        (
            self.coefficients.as_slice(),
            self.norms.as_slice(),
            self.exponents.as_slice(),
        )
    }

    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    pub fn angular(&self) -> Angular {
        self.angular
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl AsContraction for ContractedGaussian {
    fn contraction(&self) -> Contraction<'_> {
        Contraction {
            origin: &self.origin,
            angular: self.angular,
            exponents: &self.exponents,
            coefficients: &self.coefficients,
            norms: &self.norms,
        }
    }
}

impl fmt::Display for ContractedGaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = (self.origin.x, self.origin.y, self.origin.z);
        write!(
            f,
            "cgbf(({x:?}, {y:?}, {z:?}), {:?}, {:?}, {:?})",
            self.angular,
            self.exponents.as_slice(),
            self.coefficients.as_slice()
        )
    }
}

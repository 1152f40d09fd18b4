use nalgebra::Vector3;

use crate::basis::{Angular, PrimitiveGaussian};

pub mod mmd;

pub type DefaultIntegrator = mmd::McMurchieDavidson;

/// Borrowed view of the data that defines a contracted gaussian: a shared origin and
/// angular part, and parallel slices of exponents, contraction coefficients and
/// primitive normalization constants.
#[derive(Copy, Clone, Debug)]
pub struct Contraction<'a> {
    pub origin: &'a Vector3<f64>,
    pub angular: Angular,
    pub exponents: &'a [f64],
    pub coefficients: &'a [f64],
    pub norms: &'a [f64],
}

impl Contraction<'_> {
    /// Iterates (exponent, coefficient * norm) pairs
    pub(crate) fn weighted(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.exponents
            .iter()
            .zip(self.coefficients)
            .zip(self.norms)
            .map(|((&exponent, &coefficient), &norm)| (exponent, coefficient * norm))
    }
}

/// Anything that can be integrated as a (possibly single-term) contraction.
pub trait AsContraction {
    fn contraction(&self) -> Contraction<'_>;
}

const UNIT_COEFFICIENT: [f64; 1] = [1.0];

impl AsContraction for PrimitiveGaussian {
    fn contraction(&self) -> Contraction<'_> {
        Contraction {
            origin: self.origin(),
            angular: self.angular(),
            exponents: std::slice::from_ref(&self.exponent),
            coefficients: &UNIT_COEFFICIENT,
            norms: std::slice::from_ref(&self.norm),
        }
    }
}

pub trait Integrator {
    /// Calculate the overlap integral between two basis functions.
    fn overlap(&self, functions: (Contraction<'_>, Contraction<'_>)) -> f64;
}

/// Overlap integral S(a, b) between two basis functions, primitive or contracted.
pub fn overlap(a: &impl AsContraction, b: &impl AsContraction) -> f64 {
    DefaultIntegrator::default().overlap((a.contraction(), b.contraction()))
}

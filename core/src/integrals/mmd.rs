//! McMurchie Davidon integration scheme.
//! Reference:
//!
//! [1] Goings, J. Integrals. https://joshuagoings.com/2017/04/28/integrals/
use nalgebra::Vector3;

use crate::basis::Angular;

use super::{Contraction, Integrator};

#[derive(Default)]
pub struct McMurchieDavidson;

impl Integrator for McMurchieDavidson {
    fn overlap(&self, functions: (Contraction<'_>, Contraction<'_>)) -> f64 {
        let (basis_a, basis_b) = functions;
        let diff = basis_a.origin - basis_b.origin;

        let mut output = 0.0;
        for ((exp_a, weight_a), (exp_b, weight_b)) in
            itertools::iproduct!(basis_a.weighted(), basis_b.weighted())
        {
            output += weight_a
                * weight_b
                * primitive_overlap((exp_a, basis_a.angular), (exp_b, basis_b.angular), diff);
        }
        output
    }
}

/// Overlap of two unnormalized primitives. `diff` is the origin of `a` minus the origin of `b`.
fn primitive_overlap(
    (exp_a, (l1, m1, n1)): (f64, Angular),
    (exp_b, (l2, m2, n2)): (f64, Angular),
    diff: Vector3<f64>,
) -> f64 {
    hermite_expansion([l1 as i32, l2 as i32, 0], diff.x, exp_a, exp_b)
        * hermite_expansion([m1 as i32, m2 as i32, 0], diff.y, exp_a, exp_b)
        * hermite_expansion([n1 as i32, n2 as i32, 0], diff.z, exp_a, exp_b)
        * (std::f64::consts::PI / (exp_a + exp_b)).powi(3).sqrt()
}

/// Hermite gaussian expansion coefficient E^{ij}_t along one cartesian axis.
pub(crate) fn hermite_expansion([i, j, t]: [i32; 3], diff: f64, a: f64, b: f64) -> f64 {
    let p = a + b;
    let q = a * b / p;

    if t < 0 || t > i + j || i < 0 || j < 0 {
        0.0
    } else if i == 0 && j == 0 {
        // t == 0 here
        (-q * diff * diff).exp()
    } else if j == 0 {
        (2.0 * p).recip() * hermite_expansion([i - 1, j, t - 1], diff, a, b)
            - (q * diff / a) * hermite_expansion([i - 1, j, t], diff, a, b)
            + (t + 1) as f64 * hermite_expansion([i - 1, j, t + 1], diff, a, b)
    } else {
        (2.0 * p).recip() * hermite_expansion([i, j - 1, t - 1], diff, a, b)
            + (q * diff / b) * hermite_expansion([i, j - 1, t], diff, a, b)
            + (t + 1) as f64 * hermite_expansion([i, j - 1, t + 1], diff, a, b)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::{basis::PrimitiveGaussian, integrals::overlap};

    #[test]
    fn test_primitive_overlap() {
        let diff = Vector3::new(1.0, 0.0, 0.);

        assert_relative_eq!(
            super::primitive_overlap((1.0, (0, 0, 0)), (1.0, (0, 0, 0)), diff),
            1.194077663824459,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            super::primitive_overlap((1.0, (1, 0, 0)), (1.0, (1, 0, 0)), diff),
            0.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            super::primitive_overlap((1.0, (0, 1, 0)), (1.0, (0, 1, 0)), diff),
            0.29851941595611475,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            super::primitive_overlap((1.0, (0, 0, 1)), (1.0, (0, 0, 1)), diff),
            0.29851941595611475,
            max_relative = 1e-12
        );
    }

    #[test]
    fn normalized_primitives_have_unit_self_overlap() {
        for angular in [(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 0, 0), (1, 1, 1), (0, 0, 3)] {
            let primitive = PrimitiveGaussian::new(0.7, Vector3::new(0.3, -1.0, 2.0), angular);
            assert_relative_eq!(overlap(&primitive, &primitive), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let s = PrimitiveGaussian::new(1.3, Vector3::new(0.0, 0.0, 0.0), (0, 0, 0));
        let p = PrimitiveGaussian::new(0.4, Vector3::new(0.5, 0.2, -0.1), (1, 0, 0));

        let sp = overlap(&s, &p);
        assert!(sp.abs() > 1e-3);
        assert_relative_eq!(sp, overlap(&p, &s), max_relative = 1e-12);
    }

    #[test]
    fn s_with_p_on_the_same_center_vanishes() {
        let s = PrimitiveGaussian::new(1.0, Vector3::zeros(), (0, 0, 0));
        let p = PrimitiveGaussian::new(2.0, Vector3::zeros(), (0, 1, 0));
        assert_relative_eq!(overlap(&s, &p), 0.0, epsilon = 1e-15);
    }
}

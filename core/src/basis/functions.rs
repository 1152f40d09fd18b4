use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// (i, j, k) exponents of the polynomial terms of a cartesian gaussian
pub type Angular = (u32, u32, u32);

/// Normalized function of the form N*x^i*y^j*z^k*exp(-alpha*r^2), centered at `origin`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveGaussian {
    pub(crate) exponent: f64,
    /// Normalization constant, such that the self overlap of this function is one
    pub(crate) norm: f64,
    pub(crate) origin: Vector3<f64>,
    pub(crate) angular: Angular,
}

impl PrimitiveGaussian {
    pub fn new(exponent: f64, origin: Vector3<f64>, angular: Angular) -> Self {
        Self {
            exponent,
            norm: Self::norm_for(exponent, angular),
            origin,
            angular,
        }
    }

    pub fn norm_for(exponent: f64, angular: Angular) -> f64 {
        let (i, j, k) = angular;

        (std::f64::consts::FRAC_2_PI * exponent)
            .powi(3)
            .sqrt()
            .sqrt()
            * f64::sqrt(
                (8.0 * exponent).powi((i + j + k) as i32)
                    / (half_factorial_ratio(i) * half_factorial_ratio(j) * half_factorial_ratio(k)),
            )
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    pub fn angular(&self) -> Angular {
        self.angular
    }

    /// Evaluate this primitive at a given position
    pub fn evaluate(&self, at: &Vector3<f64>) -> f64 {
        let (i, j, k) = self.angular;
        let d = at - self.origin;

        self.norm
            * d.x.powi(i as i32)
            * d.y.powi(j as i32)
            * d.z.powi(k as i32)
            * (-self.exponent * d.norm_squared()).exp()
    }

    /// Evaluate this primitive on every point of a mesh
    pub fn mesh(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        points.iter().map(|point| self.evaluate(point)).collect()
    }
}

// (2n)! / n!
fn half_factorial_ratio(n: u32) -> f64 {
    (n + 1..=2 * n).map(f64::from).product()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::PrimitiveGaussian;

    #[test]
    fn s_norm() {
        let s = PrimitiveGaussian::new(1.0, Vector3::zeros(), (0, 0, 0));
        assert_relative_eq!(s.norm(), 0.712705, epsilon = 1e-6);
        assert_relative_eq!(
            s.norm(),
            std::f64::consts::FRAC_2_PI.powf(0.75),
            max_relative = 1e-12
        );
        assert_relative_eq!(s.evaluate(&Vector3::zeros()), s.norm());
    }

    #[test]
    fn p_vanishes_on_its_nodal_plane() {
        let p_x = PrimitiveGaussian::new(0.5, Vector3::new(1.0, 0.0, 0.0), (1, 0, 0));
        assert_eq!(p_x.evaluate(&Vector3::new(1.0, 2.0, -3.0)), 0.0);
        assert!(p_x.evaluate(&Vector3::new(2.0, 0.0, 0.0)) > 0.0);
        assert!(p_x.evaluate(&Vector3::new(0.0, 0.0, 0.0)) < 0.0);
    }

    #[test]
    fn mesh_matches_pointwise_evaluation() {
        let d = PrimitiveGaussian::new(0.8, Vector3::new(0.1, -0.2, 0.3), (1, 1, 0));
        let points = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.5, -0.5),
            Vector3::new(-0.3, 0.7, 2.0),
        ];

        let mesh = d.mesh(&points);
        for (value, point) in mesh.iter().zip(&points) {
            assert_eq!(*value, d.evaluate(point));
        }
    }
}

use std::f32::consts::PI;

use glam::Vec3;

use crate::random::UnitSampler;

/// Static cloud of points scattered through a spherical shell.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
}

impl PointCloud {
    /// Directions are uniform on the sphere (inverse-CDF polar angle, uniform
    /// azimuth). Radii are uniform in `[min_radius, max_radius]` with no
    /// volume correction, so points bunch toward the inner shell.
    pub fn shell(count: usize, min_radius: f32, max_radius: f32, rng: &mut impl UnitSampler) -> Self {
        let span = max_radius - min_radius;
        let positions = (0..count)
            .map(|_| {
                let radius = min_radius + rng.next_unit() * span;
                let theta = rng.next_unit() * 2.0 * PI;
                let phi = (2.0 * rng.next_unit() - 1.0).clamp(-1.0, 1.0).acos();

                let (sin_phi, cos_phi) = phi.sin_cos();
                let (sin_theta, cos_theta) = theta.sin_cos();
                Vec3::new(
                    radius * sin_phi * cos_theta,
                    radius * sin_phi * sin_theta,
                    radius * cos_phi,
                )
            })
            .collect();

        Self { positions }
    }

    pub fn as_arrays(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShift64;

    struct Fixed(Vec<f32>, usize);

    impl UnitSampler for Fixed {
        fn next_unit(&mut self) -> f32 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn cloud_has_320_points_inside_shell() {
        let cloud = PointCloud::shell(320, 5.0, 9.0, &mut XorShift64::new(0xC0FFEE));
        assert_eq!(cloud.positions.len(), 320);
        for p in &cloud.positions {
            let r = p.length();
            assert!((5.0 - 1e-4..=9.0 + 1e-4).contains(&r), "radius {r} outside shell");
        }
    }

    #[test]
    fn zero_samples_land_on_inner_south_pole() {
        // radius u=0 -> 5, theta u=0 -> 0, phi u=0 -> acos(-1) = pi
        let cloud = PointCloud::shell(1, 5.0, 9.0, &mut Fixed(vec![0.0], 0));
        let p = cloud.positions[0];
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!((p.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn directions_cover_both_hemispheres() {
        let cloud = PointCloud::shell(320, 5.0, 9.0, &mut XorShift64::new(99));
        let north = cloud.positions.iter().filter(|p| p.z > 0.0).count();
        assert!(north > 100 && north < 220, "north hemisphere got {north}");
    }
}

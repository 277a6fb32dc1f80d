pub mod camera;
pub mod geometry;
pub mod particles;
pub mod renderer;
pub mod shaders;

use glam::{EulerRot, Mat4, Vec3};

use crate::config::{linear_rgba, SceneConfig};
use crate::random::UnitSampler;

pub use camera::{PerspectiveCamera, Viewport};
pub use geometry::Polyhedron;
pub use particles::PointCloud;
pub use renderer::HeroRenderer;

/// Euler rotation (XYZ order) of a scene object, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation(pub Vec3);

impl Rotation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.0.x, self.0.y, self.0.z)
    }
}

/// Everything the hero canvas draws, independent of any GPU state.
pub struct HeroScene {
    pub camera: PerspectiveCamera,
    pub wireframe: Polyhedron,
    pub wireframe_edges: Vec<[u32; 2]>,
    pub wireframe_rotation: Rotation,
    pub wireframe_color: [f32; 4],
    pub particles: PointCloud,
    pub particle_rotation: Rotation,
    pub particle_color: [f32; 4],
    pub particle_size: f32,
    wireframe_spin: (f32, f32),
    particle_spin: f32,
    frame_count: u64,
}

impl HeroScene {
    pub fn new(config: &SceneConfig, aspect: f32, rng: &mut impl UnitSampler) -> Self {
        let camera = PerspectiveCamera::new(
            config.camera_fov,
            aspect,
            config.camera_near,
            config.camera_far,
            Vec3::new(0.0, 0.0, config.camera_distance),
        );

        let wireframe = Polyhedron::icosahedron(config.icosahedron_radius, config.icosahedron_detail);
        let wireframe_edges = wireframe.edges();
        let particles = PointCloud::shell(
            config.particle_count,
            config.particle_min_radius,
            config.particle_max_radius,
            rng,
        );

        // Point sprites are sized in pixels as size * (height / 2) / depth;
        // the same footprint as a world-space quad is size * tan(fov / 2).
        let particle_size = config.particle_size * (config.camera_fov.to_radians() * 0.5).tan();

        log::info!(
            "Hero scene: {} wireframe vertices, {} edges, {} particles",
            wireframe.vertices.len(),
            wireframe_edges.len(),
            particles.positions.len()
        );

        Self {
            camera,
            wireframe,
            wireframe_edges,
            wireframe_rotation: Rotation::default(),
            wireframe_color: linear_rgba(config.wireframe_color, config.wireframe_opacity),
            particles,
            particle_rotation: Rotation::default(),
            particle_color: linear_rgba(config.particle_color, config.particle_opacity),
            particle_size,
            wireframe_spin: config.wireframe_spin,
            particle_spin: config.particle_spin,
            frame_count: 0,
        }
    }

    /// One animation tick: fixed increments, no time scaling.
    pub fn advance_frame(&mut self) {
        self.wireframe_rotation.0.x += self.wireframe_spin.0;
        self.wireframe_rotation.0.y += self.wireframe_spin.1;
        self.particle_rotation.0.y += self.particle_spin;
        self.frame_count += 1;
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShift64;

    fn scene() -> HeroScene {
        HeroScene::new(&SceneConfig::default(), 16.0 / 9.0, &mut XorShift64::new(1))
    }

    #[test]
    fn builds_default_objects() {
        let scene = scene();
        assert_eq!(scene.wireframe.vertices.len(), 42);
        assert_eq!(scene.wireframe_edges.len(), 120);
        assert_eq!(scene.particles.positions.len(), 320);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(scene.wireframe_color[3], 0.4);
        assert_eq!(scene.particle_color[3], 0.55);
    }

    #[test]
    fn frames_accumulate_fixed_steps() {
        let mut scene = scene();
        for _ in 0..1000 {
            scene.advance_frame();
        }
        let wire = scene.wireframe_rotation.0;
        assert!((wire.x - 1.5).abs() < 1e-3);
        assert!((wire.y - 1.8).abs() < 1e-3);
        assert_eq!(wire.z, 0.0);
        assert!((scene.particle_rotation.0.y + 0.5).abs() < 1e-3);
        assert_eq!(scene.particle_rotation.0.x, 0.0);
        assert_eq!(scene.frame_count(), 1000);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut scene = scene();
        scene.resize(&Viewport::new(1000.0, 500.0, 1.0, 2.0));
        assert_eq!(scene.camera.aspect, 2.0);
    }

    #[test]
    fn rotation_matrix_preserves_radius() {
        let rotation = Rotation(Vec3::new(0.3, 1.2, 0.0));
        let p = rotation.matrix().transform_point3(Vec3::new(0.0, 2.8, 0.0));
        assert!((p.length() - 2.8).abs() < 1e-5);
    }
}

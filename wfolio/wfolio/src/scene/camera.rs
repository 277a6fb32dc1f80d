use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    proj_matrix: Mat4,
    view_matrix: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32, position: Vec3) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position,
            proj_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
        };
        camera.rebuild_matrices();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_matrices();
    }

    pub fn rebuild_matrices(&mut self) {
        self.proj_matrix = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.view_matrix = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
    }

    pub fn projection(&self) -> Mat4 {
        self.proj_matrix
    }

    pub fn view(&self) -> Mat4 {
        self.view_matrix
    }
}

/// Canvas sizing for one resize: CSS pixels plus the capped device ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64, max_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            pixel_ratio: device_pixel_ratio.min(max_ratio),
        }
    }

    /// Backing-store size in device pixels, floored and never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let width = (self.css_width * self.pixel_ratio).floor().max(1.0) as u32;
        let height = (self.css_height * self.pixel_ratio).floor().max(1.0) as u32;
        (width, height)
    }

    pub fn aspect(&self) -> f32 {
        if self.css_height <= 0.0 {
            return 1.0;
        }
        (self.css_width / self.css_height) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.physical_size(), (1600, 1200));
    }

    #[test]
    fn fractional_sizes_floor_and_never_hit_zero() {
        let viewport = Viewport::new(333.3, 0.2, 1.5, 2.0);
        assert_eq!(viewport.physical_size(), (499, 1));
    }

    #[test]
    fn aspect_follows_css_size() {
        let viewport = Viewport::new(1200.0, 600.0, 1.0, 2.0);
        assert_eq!(viewport.aspect(), 2.0);
        assert_eq!(Viewport::new(10.0, 0.0, 1.0, 2.0).aspect(), 1.0);
    }

    #[test]
    fn set_aspect_rebuilds_projection() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0, Vec3::new(0.0, 0.0, 6.0));
        let before = camera.projection();
        camera.set_aspect(2.0);
        assert_ne!(before, camera.projection());
        assert_eq!(camera.projection(), Mat4::perspective_rh(45f32.to_radians(), 2.0, 0.1, 100.0));
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let camera = PerspectiveCamera::new(45.0, 1.5, 0.1, 100.0, Vec3::new(0.0, 0.0, 6.0));
        let clip = camera.projection() * camera.view() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..1.0).contains(&ndc.z));
    }
}

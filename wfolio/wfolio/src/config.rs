// === CONSTANTS ===
pub const THEME_STORAGE_KEY: &str = "parth-portfolio-theme";
pub const SPY_ROOT_MARGIN: &str = "-35% 0px -55% 0px";
pub const SPY_THRESHOLD: f64 = 0.2;
pub const TILT_MAX_DEGREES: f64 = 5.0;

pub const ICOSAHEDRON_RADIUS: f32 = 2.8;
pub const ICOSAHEDRON_DETAIL: u32 = 1;
pub const PARTICLE_COUNT: usize = 320;
pub const PARTICLE_MIN_RADIUS: f32 = 5.0;
pub const PARTICLE_MAX_RADIUS: f32 = 9.0;
pub const PARTICLE_SIZE: f32 = 0.06;
pub const CAMERA_FOV: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_DISTANCE: f32 = 6.0;
pub const WIREFRAME_COLOR: u32 = 0x38bdf8;
pub const WIREFRAME_OPACITY: f32 = 0.4;
pub const PARTICLE_COLOR: u32 = 0xffffff;
pub const PARTICLE_OPACITY: f32 = 0.55;
// Per-frame rotation increments in radians.
pub const WIREFRAME_SPIN_X: f32 = 0.0015;
pub const WIREFRAME_SPIN_Y: f32 = 0.0018;
pub const PARTICLE_SPIN_Y: f32 = -0.0005;
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const MSAA_SAMPLES: u32 = 4;

/// Options handed to the section intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpyOptions {
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for SpyOptions {
    fn default() -> Self {
        Self {
            root_margin: SPY_ROOT_MARGIN.to_string(),
            threshold: SPY_THRESHOLD,
        }
    }
}

/// Fixed page contract: where each feature finds its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub theme_storage_key: String,
    pub theme_toggle: String,
    pub mode_label: String,
    pub menu_toggle: String,
    pub site_nav: String,
    pub nav_links: String,
    pub sections: String,
    pub anchors: String,
    pub hero_image: String,
    pub canvas_id: String,
    pub spy: SpyOptions,
    pub tilt_max_degrees: f64,
    pub scene: SceneConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: THEME_STORAGE_KEY.to_string(),
            theme_toggle: ".theme-toggle".to_string(),
            mode_label: ".mode-label".to_string(),
            menu_toggle: ".menu-toggle".to_string(),
            site_nav: ".site-nav".to_string(),
            nav_links: ".nav-link".to_string(),
            sections: "main section[id]".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            hero_image: ".hero-image".to_string(),
            canvas_id: "hero-canvas".to_string(),
            spy: SpyOptions::default(),
            tilt_max_degrees: TILT_MAX_DEGREES,
            scene: SceneConfig::default(),
        }
    }
}

/// Everything the hero animation needs to build and drive its scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub icosahedron_radius: f32,
    pub icosahedron_detail: u32,
    pub particle_count: usize,
    pub particle_min_radius: f32,
    pub particle_max_radius: f32,
    pub particle_size: f32,
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_distance: f32,
    pub wireframe_color: u32,
    pub wireframe_opacity: f32,
    pub particle_color: u32,
    pub particle_opacity: f32,
    pub wireframe_spin: (f32, f32),
    pub particle_spin: f32,
    pub max_pixel_ratio: f64,
    /// Requested antialiasing samples; lowered to what the surface supports.
    pub msaa_samples: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            icosahedron_radius: ICOSAHEDRON_RADIUS,
            icosahedron_detail: ICOSAHEDRON_DETAIL,
            particle_count: PARTICLE_COUNT,
            particle_min_radius: PARTICLE_MIN_RADIUS,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            particle_size: PARTICLE_SIZE,
            camera_fov: CAMERA_FOV,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            camera_distance: CAMERA_DISTANCE,
            wireframe_color: WIREFRAME_COLOR,
            wireframe_opacity: WIREFRAME_OPACITY,
            particle_color: PARTICLE_COLOR,
            particle_opacity: PARTICLE_OPACITY,
            wireframe_spin: (WIREFRAME_SPIN_X, WIREFRAME_SPIN_Y),
            particle_spin: PARTICLE_SPIN_Y,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            msaa_samples: MSAA_SAMPLES,
        }
    }
}

/// Linear RGBA from a 0xRRGGBB sRGB hex colour and an opacity.
pub fn linear_rgba(hex: u32, opacity: f32) -> [f32; 4] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0), opacity]
}

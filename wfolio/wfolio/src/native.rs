//! Desktop preview of the hero animation, for working on the scene without a
//! browser.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::random::XorShift64;
use crate::scene::{HeroRenderer, HeroScene, Viewport};
use crate::{PageError, Result};

const DIMX: u32 = 1080;
const DIMY: u32 = 720;

struct Preview {
    window: Arc<Window>,
    scene: HeroScene,
    renderer: HeroRenderer,
}

impl Preview {
    fn new(window: Arc<Window>, config: &SceneConfig) -> Result<Self> {
        let size = window.inner_size();
        let viewport = Viewport::new(size.width as f64, size.height as f64, 1.0, config.max_pixel_ratio);
        let scene = HeroScene::new(config, viewport.aspect(), &mut XorShift64::from_clock());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let (width, height) = viewport.physical_size();
        let renderer = pollster::block_on(HeroRenderer::new(
            &instance,
            surface,
            width,
            height,
            config.msaa_samples,
            &scene,
        ))?;

        Ok(Self {
            window,
            scene,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width as f64, height as f64, 1.0, 1.0);
        let (width, height) = viewport.physical_size();
        self.renderer.resize(width, height);
        self.scene.resize(&viewport);
    }
}

#[derive(Default)]
struct PreviewApp {
    config: SceneConfig,
    preview: Option<Preview>,
}

impl ApplicationHandler for PreviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.preview.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("wfolio hero preview")
            .with_inner_size(winit::dpi::PhysicalSize::new(DIMX, DIMY))
            .with_resizable(true);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Couldn't create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match Preview::new(window.clone(), &self.config) {
            Ok(preview) => {
                self.preview = Some(preview);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("Couldn't start preview: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(preview) = &mut self.preview else {
            return;
        };
        if preview.window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Preview closed after {} frames", preview.scene.frame_count());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => preview.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                preview.scene.advance_frame();
                if let Err(e) = preview.renderer.render(&preview.scene) {
                    if !preview.renderer.recover(e) {
                        event_loop.exit();
                        return;
                    }
                }
                preview.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Opens a window and spins the hero scene until it is closed.
pub fn run_preview() -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| PageError::Gpu(format!("event loop: {}", e)))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PreviewApp::default();
    event_loop
        .run_app(&mut app)
        .map_err(|e| PageError::Gpu(format!("event loop: {}", e)))
}

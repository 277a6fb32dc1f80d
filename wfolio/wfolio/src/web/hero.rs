use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

use super::{dom_err, install_hero_loop, listen, window, AnimationLoop};
use crate::config::{PageConfig, SceneConfig};
use crate::random::BrowserRandom;
use crate::scene::{HeroRenderer, HeroScene, Viewport};
use crate::{PageError, Result};

struct HeroState {
    scene: HeroScene,
    renderer: HeroRenderer,
    canvas: HtmlCanvasElement,
}

impl HeroState {
    fn resize(&mut self, viewport: &Viewport) -> Result<()> {
        let (width, height) = viewport.physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", viewport.css_width))
            .map_err(|e| dom_err("canvas width", e))?;
        style
            .set_property("height", &format!("{}px", viewport.css_height))
            .map_err(|e| dom_err("canvas height", e))?;

        self.renderer.resize(width, height);
        self.scene.resize(viewport);
        Ok(())
    }
}

/// Looks up the hero canvas and starts the renderer in the background.
/// GPU setup is asynchronous, so failures past this point are only logged.
pub fn init_hero_canvas(document: &Document, config: &PageConfig) -> Result<bool> {
    let Some(element) = document.get_element_by_id(&config.canvas_id) else {
        return Ok(false);
    };
    let canvas = element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| PageError::Dom(format!("#{} is not a canvas", config.canvas_id)))?;

    // Installed before GPU setup so an early stop request is not lost.
    let hero_loop = AnimationLoop::new();
    install_hero_loop(hero_loop.clone());

    let scene_config = config.scene.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match start_hero(canvas, scene_config, &hero_loop).await {
            Ok(true) => log::info!("Hero animation running"),
            Ok(false) => log::info!("Hero animation stopped before its first frame"),
            Err(e) => {
                hero_loop.stop();
                log::error!("Hero animation unavailable: {}", e);
            }
        }
    });

    Ok(true)
}

fn js_number(value: std::result::Result<JsValue, JsValue>, name: &str) -> Result<f64> {
    value
        .map_err(|e| dom_err(name, e))?
        .as_f64()
        .ok_or_else(|| PageError::Dom(format!("{} is not a number", name)))
}

fn viewport(window: &Window, config: &SceneConfig) -> Result<Viewport> {
    Ok(Viewport::new(
        js_number(window.inner_width(), "innerWidth")?,
        js_number(window.inner_height(), "innerHeight")?,
        window.device_pixel_ratio(),
        config.max_pixel_ratio,
    ))
}

async fn start_hero(
    canvas: HtmlCanvasElement,
    config: SceneConfig,
    hero_loop: &AnimationLoop,
) -> Result<bool> {
    let window = window()?;
    let initial = viewport(&window, &config)?;
    let scene = HeroScene::new(&config, initial.aspect(), &mut BrowserRandom);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let (width, height) = initial.physical_size();
    let renderer =
        HeroRenderer::new(&instance, surface, width, height, config.msaa_samples, &scene).await?;

    let state = Rc::new(RefCell::new(HeroState {
        scene,
        renderer,
        canvas,
    }));
    state.borrow_mut().resize(&initial)?;

    {
        let state = state.clone();
        let source = window.clone();
        listen(&window, "resize", move |_| {
            let result = viewport(&source, &config).and_then(|vp| state.borrow_mut().resize(&vp));
            if let Err(e) = result {
                log::warn!("Hero resize failed: {}", e);
            }
        })?;
    }

    hero_loop.start(move || {
        let mut state = state.borrow_mut();
        let HeroState { scene, renderer, .. } = &mut *state;
        scene.advance_frame();
        match renderer.render(scene) {
            Ok(()) => true,
            Err(e) => renderer.recover(e),
        }
    })
}

//! hyperscope - headless 4D scene driver
//!
//! Builds a scene, then runs the per-frame work an interactive viewer
//! would: advance rotations, position every node relative to the camera,
//! and assemble vertex/index buffers. Frame statistics go to the log.

use std::process::ExitCode;
use std::time::Instant;

use hyperscope::config::AppConfig;
use hyperscope::scenes;
use hyperscope_core::{make_skybox, Scene, SceneTemplate, Vec5};
use hyperscope_render::{process_scene, FrameBuffers};

/// Everything the frame loop needs
struct App {
    config: AppConfig,
    scene: Scene,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, String> {
        let mut scene = build_scene(&config)?;

        config.camera.apply(&mut scene.camera);
        if let Some(color_max) = config.scene.color_max {
            scene.color_max = color_max;
        }

        log::info!(
            "Scene '{}': {} shapes, color_max {}",
            scene.name,
            scene.shape_count(),
            scene.color_max
        );
        Ok(Self { config, scene })
    }

    /// Run the configured number of frames
    fn run(&mut self) {
        let frames = self.config.simulation.frames;
        let report_every = self.config.simulation.report_every.max(1);
        let opacity = self.config.rendering.shape_opacity;
        let start = Instant::now();

        for frame in 0..frames {
            self.scene.tick();
            let positioned = process_scene(&self.scene, opacity);
            let buffers = FrameBuffers::build(&self.scene, &positioned);

            if frame % report_every == 0 {
                log::info!(
                    "Frame {}: {} nodes, {} vertices, {} triangles, {} lines, {} bytes",
                    frame,
                    positioned.len(),
                    buffers.vertex_count(),
                    buffers.triangle_count(),
                    buffers.line_count(),
                    buffers.vertex_bytes().len()
                );
            }
        }

        let elapsed = start.elapsed();
        if frames > 0 {
            log::info!(
                "Ran {} frames in {:.2?} ({:.2?} per frame)",
                frames,
                elapsed,
                elapsed / frames
            );
        }
    }
}

/// Scene from the configured RON file, or the configured preset
fn build_scene(config: &AppConfig) -> Result<Scene, String> {
    let template = match &config.scene.path {
        Some(path) => {
            let mut template = SceneTemplate::load(path)
                .map_err(|e| format!("Failed to load scene '{}': {}", path, e))?;
            if config.scene.skybox && template.skybox.is_none() {
                template.skybox = Some(template.camera.far / 2.0);
            }
            template
        }
        None => scenes::preset(&config.scene.preset, config.scene.seed).ok_or_else(|| {
            format!(
                "Unknown preset '{}' (expected one of: {})",
                config.scene.preset,
                scenes::NAMES.join(", ")
            )
        })?,
    };

    let mut scene = Scene::from_template(&template)
        .map_err(|e| format!("Failed to build scene '{}': {}", template.name, e))?;

    if !config.scene.skybox {
        if let Some(id) = scene.skybox.take() {
            scene.remove_shape(id);
        }
    } else if scene.skybox.is_none() {
        let sky = make_skybox(scene.camera.far / 2.0, Vec5::ORIGIN)
            .map_err(|e| format!("Failed to build skybox: {}", e))?;
        scene.set_skybox(sky);
    }

    Ok(scene)
}

fn main() -> ExitCode {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    app.run();
    ExitCode::SUCCESS
}

//! Water Surface Demo
//!
//! Runs one frame of the water pipeline against a logging host:
//! - loads a RON/TOML water config (or the defaults)
//! - uploads the generated wave field
//! - prepares the planar reflection for a game camera and a preview camera
//! - places the surface mesh in front of the camera
//!
//! Usage: `water_demo [config.ron|config.toml]`

use water_surface::foundation::logging;
use water_surface::prelude::*;

/// Host stand-in that logs everything it is asked to do
#[derive(Default)]
struct LoggingHost {
    next_texture: u32,
}

impl RenderTargetAllocator for LoggingHost {
    type Handle = u32;

    fn acquire_render_target(&mut self, width: u32, height: u32) -> u32 {
        self.next_texture += 1;
        log::info!("Host: allocated texture #{} ({}x{})", self.next_texture, width, height);
        self.next_texture
    }
}

/// Shader parameter sink that logs uploads
struct LoggingSink;

impl ShaderParameterSink for LoggingSink {
    type Texture = u32;

    fn set_global_texture(&mut self, name: &str, texture: &u32) {
        log::info!("Shader: {} = texture #{}", name, texture);
    }

    fn set_global_float(&mut self, name: &str, value: f32) {
        log::info!("Shader: {} = {:.4}", name, value);
    }

    fn set_global_int(&mut self, name: &str, value: i32) {
        log::info!("Shader: {} = {}", name, value);
    }

    fn set_global_matrix(&mut self, name: &str, value: &Mat4) {
        log::debug!("Shader: {} = {}", name, value);
    }

    fn set_global_vector_array(&mut self, name: &str, values: &[Vec4]) {
        for (i, v) in values.iter().enumerate() {
            log::debug!("Shader: {}[{}] = ({:.3}, {:.3}, {:.3}, {:.3})", name, i, v.x, v.y, v.z, v.w);
        }
    }
}

fn load_config() -> Result<WaterConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading water config from {}", path);
            Ok(WaterConfig::load_from_file(&path)?)
        }
        None => {
            log::info!("No config given, using defaults");
            Ok(WaterConfig::default())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let config = load_config()?;
    config.validate()?;

    let mut host = LoggingHost::default();
    let mut sink = LoggingSink;

    let generator = WaveFieldGenerator::new();
    let shader_state = WaterShaderState::from_config(&config, &generator)?;
    shader_state.upload(&mut sink);

    let camera = CameraState::perspective(
        Vec3::new(0.0, 5.0, -10.0),
        Vec3::new(0.0, 3.0, 10.0),
        60.0,
        0.3,
        1000.0,
        1920,
        1080,
    );

    let mut pass = PlanarReflectionPass::new(config.reflection.clone());
    for kind in [CameraKind::Game, CameraKind::Preview] {
        match pass.prepare(kind, &camera, 1.0, &mut host, &mut sink)? {
            Some(reflection) => {
                log::info!(
                    "{:?} camera: mirror at {:?}, forward {:?}, target {}x{}",
                    kind,
                    reflection.position,
                    reflection.forward,
                    reflection.target_resolution.0,
                    reflection.target_resolution.1
                );
            }
            None => log::info!("{:?} camera: no reflection", kind),
        }
    }

    let model = surface_transform(&camera, &config.transform);
    let origin = Vec3::new(model[(0, 3)], model[(1, 3)], model[(2, 3)]);
    log::info!("Surface mesh origin: {:?}", origin);

    if let Some(texture) = pass.release_target() {
        log::info!("Host: released texture #{}", texture);
    }

    Ok(())
}

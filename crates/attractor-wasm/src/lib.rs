use attractor_core::camera::{pointer_to_ndc, screen_to_world, CameraBasis};
use attractor_core::scene::SceneDesc;
use attractor_core::{ForceMode, Simulation, SimulationConfig, TargetSource, TickInput};
use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ParticleWorld {
    sim: Simulation,
    camera: CameraBasis,
    pointer_ndc: Option<Vec2>,
    pointer_target: Vec3,
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl ParticleWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(grid: u32, seed: u32) -> Result<ParticleWorld, JsValue> {
        // Ignored if a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Info);

        let config = SimulationConfig {
            seed: u64::from(seed),
            ..Default::default()
        };
        let sim = Simulation::new(&SceneDesc::grid(grid), config).map_err(to_js)?;
        web_sys::console::log_1(
            &format!("WASM ParticleWorld created: {} particles", sim.field().len()).into(),
        );

        Ok(ParticleWorld {
            sim,
            camera: CameraBasis::default(),
            pointer_ndc: None,
            pointer_target: Vec3::ZERO,
        })
    }

    /// Advance one tick. Returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.sim.tick(&TickInput::new(dt, self.pointer_target));
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.sim.field().len()
    }

    #[wasm_bindgen]
    pub fn positions_ptr(&self) -> *const f32 {
        self.sim.positions().as_ptr()
    }

    #[wasm_bindgen]
    pub fn positions_len(&self) -> usize {
        self.sim.positions().len()
    }

    #[wasm_bindgen]
    pub fn colors_ptr(&self) -> *const f32 {
        self.sim.colors().as_ptr()
    }

    #[wasm_bindgen]
    pub fn colors_len(&self) -> usize {
        self.sim.colors().len()
    }

    /// 0 = attract, 1 = repel, anything else = idle.
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: u32) {
        self.sim.set_mode(match mode {
            0 => ForceMode::Attract,
            1 => ForceMode::Repel,
            _ => ForceMode::Idle,
        });
    }

    /// Pointer position in pixels, relative to a `width × height` viewport.
    #[wasm_bindgen]
    pub fn set_pointer(&mut self, px: f32, py: f32, width: f32, height: f32) {
        self.pointer_ndc = Some(pointer_to_ndc(px, py, width, height));
        self.update_pointer_target();
    }

    #[wasm_bindgen]
    pub fn clear_pointer(&mut self) {
        self.pointer_ndc = None;
        self.update_pointer_target();
    }

    #[wasm_bindgen]
    pub fn set_camera(
        &mut self,
        pos_x: f32, pos_y: f32, pos_z: f32,
        target_x: f32, target_y: f32, target_z: f32,
        up_x: f32, up_y: f32, up_z: f32,
        fovy: f32,
        aspect_ratio: f32,
    ) {
        self.camera = CameraBasis::look_at(
            Vec3::new(pos_x, pos_y, pos_z),
            Vec3::new(target_x, target_y, target_z),
            Vec3::new(up_x, up_y, up_z),
            fovy,
            aspect_ratio,
        );
        self.update_pointer_target();
    }

    /// Flat `[x, y, z, w, ...]` vertex positions.
    #[wasm_bindgen]
    pub fn load_mesh(&mut self, vertices: &[f32]) -> Result<(), JsValue> {
        self.sim.load_mesh(vertices).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn clear_mesh(&mut self) {
        self.sim.clear_mesh();
    }

    #[wasm_bindgen]
    pub fn set_mesh_attract(&mut self, enabled: bool) -> Result<(), JsValue> {
        let source = if enabled {
            TargetSource::Mesh
        } else {
            TargetSource::Pointer
        };
        self.sim.set_target_source(source).map_err(to_js)
    }

    /// Replace the simulation config with a JSON document. Missing fields
    /// take their default values.
    #[wasm_bindgen]
    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config: SimulationConfig = serde_json::from_str(json).map_err(to_js)?;
        self.sim.set_config(config).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.sim.config()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reinitialize(&mut self) {
        self.sim.reinitialize();
    }
}

impl ParticleWorld {
    fn update_pointer_target(&mut self) {
        self.pointer_target = screen_to_world(self.pointer_ndc, &self.camera);
    }
}

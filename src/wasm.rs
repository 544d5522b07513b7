//! `wasm-bindgen` surface for the JavaScript host.
//!
//! Arguments are plain numbers and strings; results come back as JSON
//! strings the host can `JSON.parse`. Errors surface as thrown `Error`s.

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::config::{EditorConfig, WanderConfig};
use crate::engine::{Action, EditorCore};
use crate::input::{Button, Key, Tool, WheelDelta};
use crate::rect::Rect;
use crate::vec::Vec2;
use crate::wander::Herd;

fn encode(actions: &[Action]) -> Result<String, JsError> {
    Ok(serde_json::to_string(actions)?)
}

fn load_config(config_json: Option<String>) -> Result<EditorConfig, JsError> {
    Ok(match config_json {
        Some(raw) => EditorConfig::from_json(&raw)?,
        None => EditorConfig::default(),
    })
}

/// Browser handle for one map-editor session.
#[wasm_bindgen]
pub struct MapEditor {
    core: EditorCore,
}

#[wasm_bindgen]
impl MapEditor {
    /// Create a session from an optional JSON config (defaults when absent).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MapEditor, JsError> {
        let core = EditorCore::new(load_config(config_json)?)?;
        Ok(Self { core })
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.core.set_viewport(width, height);
    }

    /// Place the first palette asset centred in the viewport.
    pub fn seed_initial_piece(&mut self) -> Result<String, JsError> {
        let action = self.core.seed_initial_piece()?;
        encode(&[action])
    }

    pub fn select_asset(&mut self, index: usize) -> Result<String, JsError> {
        let actions = self.core.select_asset(index)?;
        encode(&actions)
    }

    /// `tool` is `"select"` or `"pan"`.
    pub fn set_tool(&mut self, tool: &str) -> Result<String, JsError> {
        let tool: Tool = serde_json::from_value(serde_json::Value::String(tool.to_owned()))?;
        encode(&self.core.set_tool(tool))
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsError> {
        let Some(button) = Button::from_dom(button) else {
            return encode(&[]);
        };
        encode(&self.core.on_pointer_down(Vec2::new(x, y), button))
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsError> {
        encode(&self.core.on_pointer_move(Vec2::new(x, y)))
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsError> {
        let button = Button::from_dom(button).unwrap_or(Button::Primary);
        encode(&self.core.on_pointer_up(Vec2::new(x, y), button))
    }

    pub fn on_wheel(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> Result<String, JsError> {
        encode(&self.core.on_wheel(Vec2::new(x, y), WheelDelta { dx, dy }))
    }

    /// `key` is `KeyboardEvent.key`.
    pub fn on_key_down(&mut self, key: String) -> Result<String, JsError> {
        encode(&self.core.on_key_down(&Key(key)))
    }

    pub fn is_colliding(&self, x: f64, y: f64, w: f64, h: f64) -> Result<bool, JsError> {
        let rect = Rect::try_new(x, y, w, h)?;
        Ok(self.core.is_colliding(&rect, None))
    }

    /// `{ pan_x, pan_y, scale }` for the current view.
    pub fn camera_json(&self) -> String {
        let camera = self.core.camera();
        serde_json::json!({
            "pan_x": camera.pan_x,
            "pan_y": camera.pan_y,
            "scale": camera.scale(),
        })
        .to_string()
    }

    /// Placed pieces in draw order.
    pub fn pieces_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.placed())?)
    }

    /// The floating piece, or `null`.
    pub fn floating_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.floating)?)
    }

    pub fn palette_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.config.palette)?)
    }
}

/// Browser handle for the wandering animals.
#[wasm_bindgen]
pub struct AnimalLayer {
    herd: Herd,
    rng: StdRng,
    viewport: Vec2,
}

#[wasm_bindgen]
impl AnimalLayer {
    /// `seed` drives every random choice the herd makes.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, config_json: Option<String>) -> Result<AnimalLayer, JsError> {
        let wander: WanderConfig = load_config(config_json)?.wander;
        Ok(Self { herd: Herd::new(wander), rng: StdRng::seed_from_u64(u64::from(seed)), viewport: Vec2::ZERO })
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Vec2::new(width, height);
    }

    /// Send animal `index` to a screen point at the faster speed.
    pub fn go_to(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.herd.animals_mut().get_mut(index) {
            Some(animal) => {
                animal.go_to(Vec2::new(x, y));
                true
            }
            None => false,
        }
    }

    /// Advance one animation frame and return every animal as JSON.
    pub fn tick(&mut self, delta_ms: f64) -> Result<String, JsError> {
        self.herd.tick(delta_ms, self.viewport, &mut self.rng);
        Ok(serde_json::to_string(self.herd.animals())?)
    }
}

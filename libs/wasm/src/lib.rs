//! WASM-facing entry points for the yurt viewers.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. JavaScript drives [`YurtViewer`] from its animation loop
//! and DOM inputs, then reads the last frame back as typed arrays.
//!
//! Methods that can fail have an `_internal` twin returning Rust errors so
//! native tests do not need a JS host.
//!
//! ```
//! let mut viewer = yurt_wasm::YurtViewer::yurt3d().unwrap();
//! viewer.resize(800, 600);
//! assert!(viewer.frame(1.0 / 60.0));
//! assert!(viewer.drawable_count() > 0);
//! ```

mod frame_buffers;
mod host;
mod mesh_handle;

pub use frame_buffers::FrameBuffers;
pub use host::BrowserHost;
pub use mesh_handle::MeshHandle;

use config::constants::{COLOR_PICKERS, PART_NAMES};
use glam::DVec3;
use wasm_bindgen::prelude::*;
use yurt_csg::Transform;
use yurt_scene::models::{ger, yurt3d};
use yurt_scene::{
    HostEvent, Lighting, LoadOutcome, LoadTicket, SceneError, Viewer, ViewerConfig,
};

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "yurt-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Installs the `tracing` subscriber used by the viewers.
#[wasm_bindgen]
pub fn init_logging() {
    yurt_scene::logging::init_logging();
}

/// Parts the visibility checkboxes control.
#[wasm_bindgen]
pub fn part_names() -> Vec<String> {
    PART_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Ids of the colour inputs, in panel order.
#[wasm_bindgen]
pub fn color_picker_ids() -> Vec<String> {
    COLOR_PICKERS.iter().map(|(id, _, _)| id.to_string()).collect()
}

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn outcome_name(outcome: LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Applied => "applied",
        LoadOutcome::Failed => "failed",
        LoadOutcome::Discarded => "discarded",
    }
    .to_string()
}

/// A mounted viewer plus the buffers of its last frame.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const viewer = YurtViewer.yurt3d();
/// viewer.resize(innerWidth, innerHeight);
///
/// let last = performance.now();
/// const loop = (now) => {
///   if (!viewer.is_mounted()) return;
///   if (viewer.frame((now - last) / 1000)) upload(viewer);
///   last = now;
///   requestAnimationFrame(loop);
/// };
/// requestAnimationFrame(loop);
/// ```
#[wasm_bindgen]
pub struct YurtViewer {
    viewer: Viewer,
    host: BrowserHost,
    surface: FrameBuffers,
}

#[wasm_bindgen]
impl YurtViewer {
    /// The CSG ger with a draggable door.
    pub fn ger() -> Result<YurtViewer, JsValue> {
        ger::viewer().map(Self::mounted).map_err(to_js)
    }

    /// The parts yurt with visibility toggles and colour pickers.
    pub fn yurt3d() -> Result<YurtViewer, JsValue> {
        yurt3d::viewer().map(Self::mounted).map_err(to_js)
    }

    /// An empty viewer waiting for glTF bytes.
    pub fn asset() -> Result<YurtViewer, JsValue> {
        Viewer::asset(Vec::new(), ViewerConfig::default(), Lighting::standard())
            .map(Self::mounted)
            .map_err(to_js)
    }

    /// Runs one animation frame. Returns true if new buffers are ready.
    pub fn frame(&mut self, dt: f64) -> bool {
        self.viewer.tick(dt, &mut self.surface)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.viewer.resize(width, height, &mut self.surface)
    }

    pub fn toggle(&mut self, part: &str) {
        self.viewer.panel_mut().toggle(part);
    }

    pub fn set_visible(&mut self, part: &str, visible: bool) {
        self.viewer.panel_mut().set_visible(part, visible);
    }

    /// Sets a colour picker from its `<input type="color">` value.
    pub fn set_color(&mut self, picker: &str, hex: &str) -> Result<(), JsValue> {
        self.set_color_internal(picker, hex).map_err(to_js)
    }

    pub fn orbit(&mut self, azimuth: f64, polar: f64) {
        self.viewer.orbit(azimuth, polar);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewer.pan(dx, dy);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.viewer.zoom(delta);
    }

    /// Moves the ger door and recomputes the model.
    pub fn drag_door(&mut self, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.drag_door_internal(DVec3::new(x, y, z)).map_err(to_js)
    }

    /// Starts an asset load; pass the ticket back with the fetched bytes.
    pub fn begin_load(&mut self) -> Option<u64> {
        self.viewer.begin_load().map(|ticket| ticket.id())
    }

    /// Returns `"applied"`, `"failed"` or `"discarded"`.
    pub fn finish_load(&mut self, ticket: u64, bytes: &[u8]) -> String {
        outcome_name(self.viewer.finish_load(LoadTicket::from_id(ticket), bytes))
    }

    /// Returns `"failed"` or `"discarded"`.
    pub fn fail_load(&mut self, ticket: u64, message: &str) -> String {
        outcome_name(self.viewer.fail_load(LoadTicket::from_id(ticket), message))
    }

    pub fn unmount(&mut self) {
        self.viewer.unmount(&mut self.host);
    }

    pub fn is_mounted(&self) -> bool {
        self.host.wants(HostEvent::AnimationFrame)
    }

    #[wasm_bindgen(getter)]
    pub fn drawable_count(&self) -> usize {
        self.surface.drawables.len()
    }

    pub fn drawable(&self, index: usize) -> Option<MeshHandle> {
        self.surface.drawables.get(index).cloned()
    }

    pub fn view_matrix(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.surface.view[..])
    }

    pub fn projection_matrix(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.surface.projection[..])
    }

    /// Background as `0xRRGGBB`.
    #[wasm_bindgen(getter)]
    pub fn background(&self) -> u32 {
        self.surface.background
    }

    /// Error message while a failed asset is shown as a placeholder.
    #[wasm_bindgen(getter)]
    pub fn placeholder(&self) -> Option<String> {
        self.surface.placeholder.clone()
    }
}

impl YurtViewer {
    /// Wraps and mounts a viewer.
    pub fn mounted(mut viewer: Viewer) -> Self {
        let mut host = BrowserHost::default();
        viewer.mount(&mut host);
        Self {
            viewer,
            host,
            surface: FrameBuffers::default(),
        }
    }

    pub fn set_color_internal(&mut self, picker: &str, hex: &str) -> Result<(), SceneError> {
        self.viewer.panel_mut().set_color(picker, hex)
    }

    pub fn drag_door_internal(&mut self, position: DVec3) -> Result<(), SceneError> {
        let transform: Transform = ger::door_transform().with_position(position);
        self.viewer.drag_node(ger::DOOR, transform)
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn surface(&self) -> &FrameBuffers {
        &self.surface
    }
}

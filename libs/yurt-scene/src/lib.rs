//! # Yurt Scene
//!
//! Assembles yurt models into drawable frames and drives them from host
//! events.
//!
//! ## Architecture
//!
//! ```text
//! Host events ─┐
//!              ▼
//!          Viewer ── strategy ──► SceneGraph ──► Frame ──► RenderSurface
//!          │  ├─ PerspectiveCamera + OrbitControls
//!          │  ├─ Lighting
//!          │  └─ ControlPanel (visibility, colours)
//!          └─ Procedural (CompositionTree) | Asset (glTF) | Parts
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use yurt_scene::{models, Host, HostEvent, RecordingSurface, Subscription};
//!
//! struct Window(u64);
//!
//! impl Host for Window {
//!     fn subscribe(&mut self, event: HostEvent) -> Subscription {
//!         self.0 += 1;
//!         Subscription { event, id: self.0 }
//!     }
//!     fn unsubscribe(&mut self, _: Subscription) {}
//! }
//!
//! let mut viewer = models::yurt3d::viewer().unwrap();
//! let mut window = Window(0);
//! let mut surface = RecordingSurface::new();
//!
//! viewer.mount(&mut window);
//! viewer.resize(1280, 720, &mut surface);
//! viewer.panel_mut().toggle("lattice");
//! assert!(viewer.tick(1.0 / 60.0, &mut surface));
//! viewer.unmount(&mut window);
//! ```

pub mod asset;
pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod graph;
pub mod host;
pub mod lighting;
pub mod logging;
pub mod models;
pub mod panel;
pub mod surface;
pub mod viewer;

pub use asset::load_gltf;
pub use camera::PerspectiveCamera;
pub use crate::config::ViewerConfig;
pub use controls::OrbitControls;
pub use error::SceneError;
pub use graph::{Drawable, MaterialId, NodeId, SceneGraph, SceneNode};
pub use host::{Host, HostEvent, Subscription};
pub use lighting::{AmbientLight, DirectionalLight, Lighting};
pub use panel::{ColorPicker, ColorState, ControlPanel, VisibilityState};
pub use surface::{Frame, FrameStatus, RecordingSurface, RenderSurface};
pub use viewer::{LoadOutcome, LoadTicket, NodeOverride, Viewer};

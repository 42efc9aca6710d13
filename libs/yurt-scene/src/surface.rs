//! # Render Surface
//!
//! What a viewer hands to the renderer. Rasterisation lives behind
//! [`RenderSurface`]; a [`Frame`] carries everything needed to draw one
//! image.

use crate::graph::Drawable;
use crate::lighting::Lighting;
use glam::{DMat4, DVec3};
use yurt_csg::Color;

/// Whether a frame shows the scene or stands in for it.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    Ready,
    /// Asset loading failed; draw a placeholder carrying `message`.
    Placeholder { message: String },
}

/// One frame worth of camera, lights and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: DMat4,
    pub projection: DMat4,
    pub camera_position: DVec3,
    pub background: Color,
    pub lighting: Lighting,
    pub drawables: Vec<Drawable>,
    pub status: FrameStatus,
    /// Seconds since the viewer was created, summed over ticks.
    pub time: f64,
}

impl Frame {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.status, FrameStatus::Placeholder { .. })
    }

    pub fn triangle_count(&self) -> usize {
        self.drawables.iter().map(|d| d.mesh.triangle_count()).sum()
    }
}

/// Renderer a viewer draws into.
pub trait RenderSurface {
    /// Resizes the drawing buffer.
    fn set_viewport(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: &Frame);
}

/// Surface that keeps the last frame and counts draws.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub viewport: Option<(u32, u32)>,
    pub frames_drawn: usize,
    pub last_frame: Option<Frame>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn draw(&mut self, frame: &Frame) {
        self.frames_drawn += 1;
        self.last_frame = Some(frame.clone());
    }
}

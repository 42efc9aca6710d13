//! # Frame Buffers
//!
//! Render surface that flattens each frame into [`MeshHandle`]s for the
//! JavaScript renderer to upload.

use crate::mesh_handle::MeshHandle;
use yurt_scene::{Frame, FrameStatus, RenderSurface};

#[derive(Debug, Default)]
pub struct FrameBuffers {
    pub viewport: Option<(u32, u32)>,
    pub view: Vec<f32>,
    pub projection: Vec<f32>,
    pub background: u32,
    pub placeholder: Option<String>,
    pub drawables: Vec<MeshHandle>,
    pub frames: u64,
}

impl RenderSurface for FrameBuffers {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn draw(&mut self, frame: &Frame) {
        self.view = frame.view.to_cols_array().map(|v| v as f32).to_vec();
        self.projection = frame.projection.to_cols_array().map(|v| v as f32).to_vec();
        self.background = frame.background.to_u32();
        self.placeholder = match &frame.status {
            FrameStatus::Ready => None,
            FrameStatus::Placeholder { message } => Some(message.clone()),
        };
        self.drawables = frame.drawables.iter().map(MeshHandle::from_drawable).collect();
        self.frames += 1;
    }
}

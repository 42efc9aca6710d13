//! # Scene Assembler
//!
//! [`Viewer`] owns the camera, orbit controls, lights, control panel and one
//! scene strategy, and turns host events into [`Frame`]s.
//!
//! ## Strategies
//!
//! | Strategy | Geometry | Changes |
//! |----------|----------|---------|
//! | Procedural | one mesh evaluated from a [`CompositionTree`] | [`Viewer::drag_node`] recomputes |
//! | Asset | glTF scene graph, loaded through [`LoadTicket`]s | overrides applied on load |
//! | Parts | prebuilt [`SceneGraph`] | panel only |
//!
//! ## Lifecycle
//!
//! ```text
//! new → mount(host) → tick / resize / load completions … → unmount(host)
//! ```
//!
//! Ticks, resizes and load completions delivered while unmounted are
//! ignored. While an asset is loading nothing is drawn; a failed load
//! draws placeholder frames and the loop keeps running.

use crate::asset::load_gltf;
use crate::camera::PerspectiveCamera;
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::SceneError;
use crate::graph::{SceneGraph, SceneNode};
use crate::host::{Host, HostEvent, Subscription};
use crate::lighting::Lighting;
use crate::panel::ControlPanel;
use crate::surface::{Frame, FrameStatus, RenderSurface};
use glam::DVec3;
use std::sync::Arc;
use tracing::{debug, info, warn};
use yurt_csg::{CompositionTree, Evaluated, Transform};

// =============================================================================
// LOADING
// =============================================================================

/// Identifies one asset load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn from_id(id: u64) -> Self {
        Self(id)
    }
}

/// What happened to a load completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The asset replaced the scene.
    Applied,
    /// The viewer now shows a placeholder.
    Failed,
    /// Stale ticket or unmounted viewer; nothing changed.
    Discarded,
}

/// Name-keyed adjustment applied to a freshly loaded asset.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOverride {
    pub name: String,
    pub visible: Option<bool>,
    pub position: Option<DVec3>,
}

impl NodeOverride {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: None,
            position: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    pub fn at(mut self, position: DVec3) -> Self {
        self.position = Some(position);
        self
    }

    fn apply(&self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        if let Some(visible) = self.visible {
            graph.set_visible(&self.name, visible)?;
        }
        if let Some(position) = self.position {
            graph.set_position(&self.name, position)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum AssetState {
    Idle,
    Loading(LoadTicket),
    Ready(SceneGraph),
    Failed(String),
}

// =============================================================================
// STRATEGY
// =============================================================================

#[derive(Debug)]
enum Strategy {
    Procedural {
        tree: CompositionTree,
        graph: SceneGraph,
    },
    Asset {
        overrides: Vec<NodeOverride>,
        state: AssetState,
    },
    Parts(SceneGraph),
}

/// Wraps an evaluated composition as a one-node graph named `name`.
fn procedural_graph(name: &str, evaluated: &Evaluated) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let mut node = SceneNode::new().named(name);
    node.materials = evaluated
        .materials
        .iter()
        .map(|material| graph.add_material(material.clone()))
        .collect();
    node.mesh = Some(Arc::new(evaluated.mesh.clone()));
    graph.add_node(node, None);
    graph
}

fn recompute(tree: &mut CompositionTree, graph: &mut SceneGraph) -> Result<(), SceneError> {
    let name = tree.name().to_string();
    let evaluated = tree.update()?;
    *graph = procedural_graph(&name, evaluated);
    Ok(())
}

// =============================================================================
// VIEWER
// =============================================================================

/// Scene assembler.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    lighting: Lighting,
    panel: ControlPanel,
    strategy: Strategy,
    subscriptions: Vec<Subscription>,
    next_ticket: u64,
    viewport: Option<(u32, u32)>,
    time: f64,
}

impl Viewer {
    /// Viewer for a CSG composition, evaluated once up front.
    ///
    /// # Errors
    ///
    /// Invalid configuration or a composition that fails to evaluate.
    pub fn procedural(
        mut tree: CompositionTree,
        config: ViewerConfig,
        lighting: Lighting,
    ) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        recompute(&mut tree, &mut graph)?;
        Self::with_strategy(Strategy::Procedural { tree, graph }, config, lighting)
    }

    /// Viewer for a glTF asset delivered later through
    /// [`begin_load`](Self::begin_load) / [`finish_load`](Self::finish_load).
    pub fn asset(
        overrides: Vec<NodeOverride>,
        config: ViewerConfig,
        lighting: Lighting,
    ) -> Result<Self, SceneError> {
        let state = AssetState::Idle;
        Self::with_strategy(Strategy::Asset { overrides, state }, config, lighting)
    }

    /// Viewer for a prebuilt scene graph.
    pub fn parts(
        graph: SceneGraph,
        config: ViewerConfig,
        lighting: Lighting,
    ) -> Result<Self, SceneError> {
        Self::with_strategy(Strategy::Parts(graph), config, lighting)
    }

    fn with_strategy(
        strategy: Strategy,
        config: ViewerConfig,
        lighting: Lighting,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let camera = PerspectiveCamera::from_config(&config);
        let controls = OrbitControls::new(&camera, config.damping_factor);

        Ok(Self {
            config,
            camera,
            controls,
            lighting,
            panel: ControlPanel::new(),
            strategy,
            subscriptions: Vec::new(),
            next_ticket: 0,
            viewport: None,
            time: 0.0,
        })
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Subscribes to animation frames and resizes.
    pub fn mount(&mut self, host: &mut impl Host) {
        if self.is_mounted() {
            debug!("Viewer already mounted");
            return;
        }
        self.subscriptions = vec![
            host.subscribe(HostEvent::AnimationFrame),
            host.subscribe(HostEvent::Resize),
        ];
        info!("Viewer mounted");
    }

    /// Releases every subscription. A pending load is abandoned.
    pub fn unmount(&mut self, host: &mut impl Host) {
        if !self.is_mounted() {
            return;
        }
        for subscription in self.subscriptions.drain(..) {
            host.unsubscribe(subscription);
        }
        if let Strategy::Asset { state, .. } = &mut self.strategy {
            if matches!(state, AssetState::Loading(_)) {
                *state = AssetState::Idle;
            }
        }
        info!("Viewer unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Runs one animation frame: damps the controls, applies panel changes
    /// and draws.
    ///
    /// Returns true if a frame was drawn.
    pub fn tick(&mut self, dt: f64, surface: &mut impl RenderSurface) -> bool {
        if !self.is_mounted() {
            debug!("Tick after unmount ignored");
            return false;
        }

        self.time += dt;
        self.controls.update(&mut self.camera);

        let (graph, status) = match &mut self.strategy {
            Strategy::Procedural { graph, .. } | Strategy::Parts(graph) => {
                (Some(graph), FrameStatus::Ready)
            }
            Strategy::Asset { state, .. } => match state {
                AssetState::Ready(graph) => (Some(graph), FrameStatus::Ready),
                AssetState::Failed(message) => (
                    None,
                    FrameStatus::Placeholder {
                        message: message.clone(),
                    },
                ),
                AssetState::Idle | AssetState::Loading(_) => return false,
            },
        };

        let drawables = match graph {
            Some(graph) => {
                if self.panel.is_dirty() {
                    self.panel.apply(graph);
                }
                graph.drawables()
            }
            None => Vec::new(),
        };

        let frame = Frame {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            camera_position: self.camera.position,
            background: self.config.background,
            lighting: self.lighting,
            drawables,
            status,
            time: self.time,
        };
        surface.draw(&frame);
        true
    }

    /// Matches the camera aspect and the surface to a new size.
    ///
    /// Ignored while unmounted or for a zero width or height.
    pub fn resize(&mut self, width: u32, height: u32, surface: &mut impl RenderSurface) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if !self.camera.set_viewport(width, height) {
            debug!(width, height, "Zero-size resize ignored");
            return false;
        }
        self.viewport = Some((width, height));
        surface.set_viewport(width, height);
        true
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    pub fn orbit(&mut self, azimuth: f64, polar: f64) {
        self.controls.rotate(azimuth, polar);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.controls.pan(dx, dy);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.controls.zoom(delta);
    }

    /// Moves a named composition node and recomputes the mesh.
    ///
    /// # Errors
    ///
    /// `UnresolvedNamedNode` for unknown names or a non-procedural viewer;
    /// composition errors from the recompute.
    pub fn drag_node(&mut self, name: &str, transform: Transform) -> Result<(), SceneError> {
        let Strategy::Procedural { tree, graph } = &mut self.strategy else {
            return Err(SceneError::unresolved(name));
        };
        tree.set_transform(name, transform)?;
        if tree.is_dirty() {
            recompute(tree, graph)?;
            self.panel.mark_dirty();
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Asset loading
    // -------------------------------------------------------------------------

    /// Starts a load and returns its ticket. Any earlier ticket goes stale.
    ///
    /// `None` for non-asset viewers and while unmounted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.is_mounted() {
            return None;
        }
        let Strategy::Asset { state, .. } = &mut self.strategy else {
            return None;
        };

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        *state = AssetState::Loading(ticket);
        info!(ticket = ticket.0, "Asset load started");
        Some(ticket)
    }

    /// Delivers the asset bytes for `ticket`.
    pub fn finish_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> LoadOutcome {
        if !self.accepts(ticket) {
            return LoadOutcome::Discarded;
        }
        match load_gltf(bytes) {
            Ok(graph) => self.install(graph),
            Err(err) => self.fail(err),
        }
    }

    /// Reports that fetching the asset for `ticket` failed.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: &str) -> LoadOutcome {
        if !self.accepts(ticket) {
            return LoadOutcome::Discarded;
        }
        self.fail(SceneError::asset(message))
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        let current = match &self.strategy {
            Strategy::Asset {
                state: AssetState::Loading(current),
                ..
            } => Some(*current),
            _ => None,
        };

        let accepted = self.is_mounted() && current == Some(ticket);
        if !accepted {
            debug!(ticket = ticket.0, "Load completion discarded");
        }
        accepted
    }

    fn install(&mut self, mut graph: SceneGraph) -> LoadOutcome {
        let Strategy::Asset { overrides, state } = &mut self.strategy else {
            return LoadOutcome::Discarded;
        };

        for node_override in overrides.iter() {
            if let Err(err) = node_override.apply(&mut graph) {
                debug!(%err, "Asset override skipped");
            }
            // The panel re-applies every part it controls; seed it so the
            // override survives the next tick.
            if let Some(visible) = node_override.visible {
                if self.panel.visibility().get(&node_override.name).is_some() {
                    self.panel.set_visible(&node_override.name, visible);
                }
            }
        }
        info!(nodes = graph.node_count(), "Asset loaded");
        *state = AssetState::Ready(graph);
        self.panel.mark_dirty();
        LoadOutcome::Applied
    }

    fn fail(&mut self, err: SceneError) -> LoadOutcome {
        let Strategy::Asset { state, .. } = &mut self.strategy else {
            return LoadOutcome::Discarded;
        };
        warn!(%err, "Asset load failed");
        *state = AssetState::Failed(err.to_string());
        LoadOutcome::Failed
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.panel
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    /// True while an asset load is pending.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.strategy,
            Strategy::Asset {
                state: AssetState::Loading(_),
                ..
            }
        )
    }

    /// Scene currently shown, if any.
    pub fn scene(&self) -> Option<&SceneGraph> {
        match &self.strategy {
            Strategy::Procedural { graph, .. } | Strategy::Parts(graph) => Some(graph),
            Strategy::Asset {
                state: AssetState::Ready(graph),
                ..
            } => Some(graph),
            Strategy::Asset { .. } => None,
        }
    }

    /// Composition tree of a procedural viewer.
    pub fn composition(&self) -> Option<&CompositionTree> {
        match &self.strategy {
            Strategy::Procedural { tree, .. } => Some(tree),
            _ => None,
        }
    }
}

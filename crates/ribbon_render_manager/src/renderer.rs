use std::{collections::HashMap, sync::Arc};

use ribbon_render_models::{messages::MessageToRenderer, trail::TrailVertex};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, trace, warn};

use crate::surface::GeometryBacklog;

#[derive(Debug, Clone)]
pub struct RenderedTrail {
    pub indices: Arc<[u32]>,
    pub vertices: Arc<[TrailVertex]>,
    pub visible: bool,
}

impl Default for RenderedTrail {
    fn default() -> Self {
        Self {
            indices: Arc::from(Vec::new()),
            vertices: Arc::from(Vec::new()),
            visible: false,
        }
    }
}

impl RenderedTrail {
    /// a trail is drawn once it has both its topology and a geometry covering it
    pub fn is_drawable(&self) -> bool {
        self.visible
            && !self.indices.is_empty()
            && self
                .indices
                .iter()
                .all(|&index| (index as usize) < self.vertices.len())
    }
}

/// Consumer side of [`crate::ChannelSurface`], built by [`crate::trail_channel`].
///
/// Messages land in a work in progress set of trails, which only becomes the displayed set on
/// [`TrailRenderer::flush`], so a frame never mixes geometry of two updates.
pub struct TrailRenderer {
    pub trails: HashMap<u64, RenderedTrail>,
    pub trails_wip: HashMap<u64, RenderedTrail>, //work in progress: this is where the messages are applied
    receiver: UnboundedReceiver<MessageToRenderer>,
    backlog: GeometryBacklog,
}

impl TrailRenderer {
    pub fn new(receiver: UnboundedReceiver<MessageToRenderer>, backlog: GeometryBacklog) -> Self {
        Self {
            trails: Default::default(),
            trails_wip: Default::default(),
            receiver,
            backlog,
        }
    }

    /// Applies every pending message, returns how many were handled.
    pub fn receive_all(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    pub fn handle_message(&mut self, message: MessageToRenderer) {
        match message {
            MessageToRenderer::TrailIndices { trail, indices } => {
                debug!(trail, indices = indices.len(), "trail topology received");
                self.trails_wip.entry(trail).or_default().indices = indices;
            }
            MessageToRenderer::TrailGeometry(object) => {
                self.backlog.complete();
                trace!(trail = object.trail, vertices = object.vertices.len(), "trail geometry received");
                self.trails_wip.entry(object.trail).or_default().vertices = object.vertices;
            }
            MessageToRenderer::TrailVisibility { trail, visible } => {
                self.trails_wip.entry(trail).or_default().visible = visible;
            }
            MessageToRenderer::TrailReleased(trail) => {
                if self.trails_wip.remove(&trail).is_none() {
                    warn!(trail, "release of an unknown trail");
                }
            }
        }
    }

    pub fn flush(&mut self) {
        trace!("Flush to display {} trails", self.trails_wip.len());
        self.trails.clone_from(&self.trails_wip);
    }

    pub fn drawable_trails(&self) -> impl Iterator<Item = (&u64, &RenderedTrail)> {
        self.trails.iter().filter(|(_, trail)| trail.is_drawable())
    }

    pub fn triangle_count(&self) -> usize {
        self.drawable_trails()
            .map(|(_, trail)| trail.indices.len() / 3)
            .sum()
    }

    /// size of the vertex data that would be uploaded this frame
    pub fn vertex_bytes(&self) -> usize {
        self.drawable_trails()
            .map(|(_, trail)| bytemuck::cast_slice::<TrailVertex, u8>(&trail.vertices).len())
            .sum()
    }
}

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ribbon_render_models::{
    messages::MessageToRenderer,
    surface::TrailSurface,
    trail::{TrailObject, TrailVertex},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{trace, warn};

use crate::TrailRenderer;

/// Count of geometry frames sent but not yet handled by the renderer, shared by both ends.
#[derive(Debug, Clone)]
pub struct GeometryBacklog {
    pending: Arc<AtomicUsize>,
    capacity: usize,
}

impl GeometryBacklog {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Default::default(),
            capacity,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    fn try_reserve(&self) -> bool {
        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |pending| {
                (pending < self.capacity).then_some(pending + 1)
            })
            .is_ok()
    }

    pub(crate) fn complete(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |pending| {
                pending.checked_sub(1)
            });
    }
}

/// Creates the renderer and the sending side its trails are built from.
/// At most `geometry_backlog` geometry frames wait in the channel, later ones are dropped.
pub fn trail_channel(geometry_backlog: usize) -> (TrailSender, TrailRenderer) {
    let (sender, receiver) = unbounded_channel();
    let backlog = GeometryBacklog::new(geometry_backlog);
    (
        TrailSender {
            sender,
            backlog: backlog.clone(),
        },
        TrailRenderer::new(receiver, backlog),
    )
}

#[derive(Debug, Clone)]
pub struct TrailSender {
    sender: UnboundedSender<MessageToRenderer>,
    backlog: GeometryBacklog,
}

impl TrailSender {
    pub fn surface(&self, trail: u64) -> ChannelSurface {
        ChannelSurface {
            trail,
            sender: self.clone(),
        }
    }
}

/// Forwards every upload of a trail to the renderer thread.
///
/// Sending never blocks the update loop. Topology, visibility and release always reach the
/// renderer, in order. Geometry is dropped while the renderer lags behind by a full backlog, the
/// renderer keeps drawing the previous frame meanwhile.
pub struct ChannelSurface {
    trail: u64,
    sender: TrailSender,
}

impl ChannelSurface {
    pub fn trail(&self) -> u64 {
        self.trail
    }

    fn send(&self, message: MessageToRenderer) {
        if self.sender.sender.send(message).is_err() {
            warn!(trail = self.trail, "renderer is gone, trail message lost");
        }
    }
}

impl TrailSurface for ChannelSurface {
    fn upload_indices(&mut self, indices: &[u32]) {
        self.send(MessageToRenderer::TrailIndices {
            trail: self.trail,
            indices: Arc::from(indices),
        });
    }

    fn upload_geometry(&mut self, positions: &[glam::Vec3], uvs: &[glam::Vec2], colors: &[[u8; 4]]) {
        if !self.sender.backlog.try_reserve() {
            trace!(trail = self.trail, "renderer is busy, dropping trail geometry");
            return;
        }
        let vertices = TrailVertex::interleave(positions, uvs, colors);
        self.send(MessageToRenderer::TrailGeometry(Box::new(TrailObject {
            trail: self.trail,
            vertices: vertices.into(),
        })));
    }

    fn set_visible(&mut self, visible: bool) {
        self.send(MessageToRenderer::TrailVisibility {
            trail: self.trail,
            visible,
        });
    }

    fn release(&mut self) {
        self.send(MessageToRenderer::TrailReleased(self.trail));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_frame(surface: &mut ChannelSurface) {
        surface.upload_geometry(
            &[glam::Vec3::ZERO, glam::Vec3::X, glam::Vec3::Z, glam::Vec3::ONE],
            &[glam::Vec2::ZERO; 4],
            &[[255; 4]; 4],
        );
    }

    #[test]
    fn uploads_become_messages_in_order() {
        let (sender, mut renderer) = trail_channel(8);
        let mut surface = sender.surface(7);
        surface.upload_indices(&[0, 2, 3, 0, 3, 1]);
        upload_frame(&mut surface);
        surface.set_visible(true);

        assert_eq!(renderer.receive_all(), 3);
        renderer.flush();
        let trail = &renderer.trails[&7];
        assert_eq!(trail.indices.len(), 6);
        assert_eq!(trail.vertices.len(), 4);
        assert!(trail.visible);
        assert_eq!(surface.sender.backlog.pending(), 0);
    }

    #[test]
    fn lagging_renderer_only_loses_geometry() {
        let (sender, mut renderer) = trail_channel(2);
        let mut surface = sender.surface(1);
        surface.upload_indices(&[0, 2, 3, 0, 3, 1]);
        surface.set_visible(true);
        upload_frame(&mut surface);
        renderer.receive_all();
        renderer.flush();
        assert_eq!(renderer.drawable_trails().count(), 1);

        // the renderer falls behind by a full backlog
        upload_frame(&mut surface);
        upload_frame(&mut surface);
        upload_frame(&mut surface);
        assert_eq!(surface.sender.backlog.pending(), 2);
        surface.set_visible(false);
        surface.release();

        assert_eq!(renderer.receive_all(), 4);
        renderer.flush();
        assert!(renderer.trails.is_empty());
        assert_eq!(renderer.drawable_trails().count(), 0);
    }

    #[test]
    fn topology_survives_a_full_backlog() {
        let (sender, mut renderer) = trail_channel(1);
        let mut surface = sender.surface(2);
        upload_frame(&mut surface);
        surface.set_visible(true);
        surface.upload_indices(&[0, 2, 3, 0, 3, 1]);
        upload_frame(&mut surface);

        renderer.receive_all();
        renderer.flush();
        assert_eq!(renderer.drawable_trails().count(), 1);
        assert_eq!(renderer.triangle_count(), 2);
    }

    #[test]
    fn closed_renderer_does_not_stall_the_trail() {
        let (sender, renderer) = trail_channel(4);
        drop(renderer);
        let mut surface = sender.surface(3);
        surface.set_visible(true);
        upload_frame(&mut surface);
        surface.release();
    }
}

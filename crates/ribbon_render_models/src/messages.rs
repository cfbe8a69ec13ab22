use std::sync::Arc;

use crate::trail::TrailObject;

#[derive(Debug, Clone)]
pub enum MessageToRenderer {
    /// sent once when the trail is created, the topology never changes afterward
    TrailIndices { trail: u64, indices: Arc<[u32]> },
    TrailGeometry(Box<TrailObject>),
    TrailVisibility { trail: u64, visible: bool },
    /// the trail is gone, its buffers can be dropped
    TrailReleased(u64),
}

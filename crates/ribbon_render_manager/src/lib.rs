pub mod renderer;
pub mod surface;

pub use renderer::TrailRenderer;
pub use surface::{trail_channel, ChannelSurface, GeometryBacklog, TrailSender};

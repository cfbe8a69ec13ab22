pub mod configuration;
pub mod error;
pub mod layout;
pub mod state;

pub use configuration::{HeadInterpolation, ShiftCadence, SplineKind, TrailConfiguration};
pub use error::TrailError;
pub use layout::GridLayout;
pub use state::TrailState;

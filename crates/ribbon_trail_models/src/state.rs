use serde::{Deserialize, Serialize};

/// Lifecycle of a trail, driven by the host.
///
/// `Frozen` keeps the last geometry on screen without following the anchors anymore,
/// until `deadline` (same clock as the `latest_time` given to ticks) is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum TrailState {
    #[default]
    Inactive,
    Active,
    Frozen {
        deadline: f64,
    },
}

impl TrailState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, TrailState::Inactive)
    }
}

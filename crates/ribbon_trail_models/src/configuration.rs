use serde::{Deserialize, Serialize};

use crate::{GridLayout, TrailError};

/// Curve used to place the subdivision vertices between two history columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplineKind {
    #[default]
    CatmullRom,
    /// `tension` tightens the curve (0 behaves like catmull-rom, 1 collapses the tangents),
    /// `bias` leans the tangents toward the incoming (positive) or outgoing (negative) chord.
    Hermite { tension: f32, bias: f32 },
}

/// When the history moves one column toward the tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftCadence {
    /// fixed rate, independent of the frame rate
    Timer { updates_per_second: f32 },
    /// as soon as the head segment of any rail grows longer than `threshold`.
    /// The length measured on the previous frame is used, so the shift lands one frame late.
    Distance { threshold: f32 },
}

impl Default for ShiftCadence {
    fn default() -> Self {
        ShiftCadence::Timer {
            updates_per_second: 30.0,
        }
    }
}

/// How the vertices between the live head and the first history column are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadInterpolation {
    #[default]
    Linear,
    Spline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfiguration {
    pub segments: usize,
    pub subdivisions: usize,
    pub spline: SplineKind,
    pub head_interpolation: HeadInterpolation,
    pub cadence: ShiftCadence,
    /// rgba, copied as is on every vertex
    pub color: [u8; 4],
    /// seconds a trail stays frozen on screen before a host deactivates it
    pub freeze_duration: f32,
}

impl Default for TrailConfiguration {
    fn default() -> Self {
        Self {
            segments: 12,
            subdivisions: 4,
            spline: SplineKind::default(),
            head_interpolation: HeadInterpolation::default(),
            cadence: ShiftCadence::default(),
            color: [255, 255, 255, 255],
            freeze_duration: 0.25,
        }
    }
}

impl TrailConfiguration {
    /// Checks every parameter and returns the grid a trail following `node_count` anchors uses.
    pub fn layout(&self, node_count: usize) -> Result<GridLayout, TrailError> {
        if let SplineKind::Hermite { tension, bias } = self.spline {
            if !(-1.0..=1.0).contains(&tension) {
                return Err(TrailError::TensionOutOfRange(tension));
            }
            if !(-1.0..=1.0).contains(&bias) {
                return Err(TrailError::BiasOutOfRange(bias));
            }
        }
        match self.cadence {
            ShiftCadence::Timer { updates_per_second } => {
                if !updates_per_second.is_finite() || updates_per_second <= 0.0 {
                    return Err(TrailError::InvalidUpdateRate(updates_per_second));
                }
            }
            ShiftCadence::Distance { threshold } => {
                if !threshold.is_finite() || threshold < 0.0 {
                    return Err(TrailError::InvalidDistanceThreshold(threshold));
                }
            }
        }
        GridLayout::new(node_count, self.segments, self.subdivisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_document_gives_defaults() {
        let configuration: TrailConfiguration = toml::from_str("").unwrap();
        assert_eq!(configuration, TrailConfiguration::default());
    }

    #[test]
    fn reads_every_policy() {
        let configuration: TrailConfiguration = toml::from_str(
            r#"
            segments = 6
            subdivisions = 2
            head_interpolation = "spline"
            color = [255, 128, 0, 200]
            spline = { kind = "hermite", tension = 0.25, bias = -0.5 }
            cadence = { kind = "distance", threshold = 0.1 }
            "#,
        )
        .unwrap();
        assert_eq!(configuration.segments, 6);
        assert_eq!(configuration.subdivisions, 2);
        assert_eq!(configuration.head_interpolation, HeadInterpolation::Spline);
        assert_eq!(configuration.color, [255, 128, 0, 200]);
        assert_eq!(
            configuration.spline,
            SplineKind::Hermite {
                tension: 0.25,
                bias: -0.5
            }
        );
        assert_eq!(
            configuration.cadence,
            ShiftCadence::Distance { threshold: 0.1 }
        );
    }

    #[test]
    fn valid_configuration_gives_its_layout() {
        let configuration = TrailConfiguration {
            segments: 4,
            subdivisions: 1,
            ..Default::default()
        };
        let layout = configuration.layout(2).unwrap();
        assert_eq!(layout.vertex_count(), 18);
    }

    #[rstest]
    #[case(SplineKind::Hermite { tension: 1.5, bias: 0.0 }, ShiftCadence::default(), TrailError::TensionOutOfRange(1.5))]
    #[case(SplineKind::Hermite { tension: 0.0, bias: -2.0 }, ShiftCadence::default(), TrailError::BiasOutOfRange(-2.0))]
    #[case(SplineKind::CatmullRom, ShiftCadence::Timer { updates_per_second: 0.0 }, TrailError::InvalidUpdateRate(0.0))]
    #[case(SplineKind::CatmullRom, ShiftCadence::Distance { threshold: -1.0 }, TrailError::InvalidDistanceThreshold(-1.0))]
    fn invalid_parameters_are_not_clamped(
        #[case] spline: SplineKind,
        #[case] cadence: ShiftCadence,
        #[case] expected: TrailError,
    ) {
        let configuration = TrailConfiguration {
            spline,
            cadence,
            ..Default::default()
        };
        assert_eq!(configuration.layout(2), Err(expected));
    }

    #[test]
    fn single_anchor_is_rejected() {
        assert_eq!(
            TrailConfiguration::default().layout(1),
            Err(TrailError::NotEnoughNodes(1))
        );
    }
}

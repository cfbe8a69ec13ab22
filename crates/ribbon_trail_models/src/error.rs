use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum TrailError {
    #[error("a trail needs at least two anchors, got {0}")]
    #[diagnostic(
        code(ribbon::trail::node_count),
        help("every rail of the ribbon follows one anchor, a single rail has no surface")
    )]
    NotEnoughNodes(usize),

    #[error("a trail needs at least one history segment")]
    #[diagnostic(code(ribbon::trail::segments))]
    NoSegments,

    #[error("a trail of {0} vertices cannot be indexed with u32 indices")]
    #[diagnostic(
        code(ribbon::trail::vertex_count),
        help("lower `segments` or `subdivisions`")
    )]
    TooManyVertices(usize),

    #[error("hermite tension must be within [-1, 1], got {0}")]
    #[diagnostic(code(ribbon::trail::tension))]
    TensionOutOfRange(f32),

    #[error("hermite bias must be within [-1, 1], got {0}")]
    #[diagnostic(code(ribbon::trail::bias))]
    BiasOutOfRange(f32),

    #[error("history updates per second must be a positive number, got {0}")]
    #[diagnostic(code(ribbon::trail::cadence))]
    InvalidUpdateRate(f32),

    #[error("history distance threshold must be a non negative number, got {0}")]
    #[diagnostic(code(ribbon::trail::cadence))]
    InvalidDistanceThreshold(f32),

    #[error("expected {expected} anchors, got {actual}")]
    #[diagnostic(
        code(ribbon::trail::anchor_count),
        help("the anchor set of a trail cannot change after initialization")
    )]
    AnchorCountMismatch { expected: usize, actual: usize },

    #[error("anchor {rail} is at a non finite position {position}")]
    #[diagnostic(code(ribbon::trail::anchor_position))]
    NonFiniteAnchor { rail: usize, position: glam::Vec3 },
}

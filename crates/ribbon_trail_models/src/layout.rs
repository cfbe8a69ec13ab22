use crate::TrailError;

/// Shape of the trail vertex grid.
///
/// The grid is stored row major, one row per vertex along the rails, `node_count` vertices per row.
/// Rows are grouped by history column: a column owns its own row followed by the
/// `subdivisions` rows leading to the next column, so the row of `(column, subdivision)` is
/// `column * (subdivisions + 1) + subdivision`. The tail column has no subdivision rows.
///
/// ```text
/// row 0                      column 0 (head)
/// row 1..=subdivisions       interpolated
/// row subdivisions + 1       column 1
/// ...
/// row line_vertex_count - 1  column segments (tail)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    node_count: usize,
    segments: usize,
    subdivisions: usize,
}

impl GridLayout {
    pub fn new(node_count: usize, segments: usize, subdivisions: usize) -> Result<Self, TrailError> {
        if node_count < 2 {
            return Err(TrailError::NotEnoughNodes(node_count));
        }
        if segments < 1 {
            return Err(TrailError::NoSegments);
        }
        let layout = Self {
            node_count,
            segments,
            subdivisions,
        };
        let vertex_count = segments
            .checked_mul(subdivisions + 1)
            .and_then(|rows| rows.checked_add(1))
            .and_then(|rows| rows.checked_mul(node_count))
            .ok_or(TrailError::TooManyVertices(usize::MAX))?;
        if u32::try_from(vertex_count).is_err() {
            return Err(TrailError::TooManyVertices(vertex_count));
        }
        Ok(layout)
    }

    /// number of rails, one per anchor
    pub fn node_count(&self) -> usize {
        self.node_count
    }
    /// number of history segments between the head and the tail columns
    pub fn segments(&self) -> usize {
        self.segments
    }
    /// interpolated rows between two adjacent columns
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }
    /// distance in rows between two adjacent columns
    pub fn stride(&self) -> usize {
        self.subdivisions + 1
    }
    /// vertices along one rail, head and tail included
    pub fn line_vertex_count(&self) -> usize {
        self.segments * self.stride() + 1
    }
    /// vertices of one column and its subdivisions, across all rails
    pub fn segment_vertex_count(&self) -> usize {
        self.stride() * self.node_count
    }
    pub fn vertex_count(&self) -> usize {
        self.node_count * self.line_vertex_count()
    }
    /// two triangles per quad, one quad per pair of adjacent rails and rows
    pub fn index_count(&self) -> usize {
        6 * (self.node_count - 1) * (self.line_vertex_count() - 1)
    }
    pub fn tail_row(&self) -> usize {
        self.line_vertex_count() - 1
    }

    pub fn row(&self, column: usize, subdivision: usize) -> usize {
        debug_assert!(column <= self.segments, "column {column} out of grid");
        debug_assert!(
            subdivision <= self.subdivisions && (column < self.segments || subdivision == 0),
            "subdivision {subdivision} out of column {column}"
        );
        column * self.stride() + subdivision
    }

    pub fn row_offset(&self, row: usize, rail: usize) -> usize {
        debug_assert!(row < self.line_vertex_count(), "row {row} out of grid");
        debug_assert!(rail < self.node_count, "rail {rail} out of grid");
        row * self.node_count + rail
    }

    /// Flat index of a vertex: `column * segment_vertex_count + subdivision * node_count + rail`
    pub fn offset(&self, column: usize, subdivision: usize, rail: usize) -> usize {
        self.row_offset(self.row(column, subdivision), rail)
    }

    /// Flat index of the length of history segment `column` (between `column` and `column + 1`) on `rail`
    pub fn segment_offset(&self, column: usize, rail: usize) -> usize {
        debug_assert!(column < self.segments, "segment {column} out of grid");
        debug_assert!(rail < self.node_count, "rail {rail} out of grid");
        column * self.node_count + rail
    }

    pub fn segment_length_count(&self) -> usize {
        self.segments * self.node_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn counts_of_a_two_rail_grid() {
        let layout = GridLayout::new(2, 4, 1).unwrap();
        assert_eq!(layout.line_vertex_count(), 9);
        assert_eq!(layout.segment_vertex_count(), 4);
        assert_eq!(layout.vertex_count(), 18);
        assert_eq!(layout.index_count(), 6 * 8);
        assert_eq!(layout.tail_row(), 8);
    }

    #[test]
    fn offsets_follow_column_subdivision_rail_order() {
        let layout = GridLayout::new(3, 2, 2).unwrap();
        assert_eq!(layout.offset(0, 0, 0), 0);
        assert_eq!(layout.offset(0, 0, 2), 2);
        assert_eq!(layout.offset(0, 1, 0), 3);
        assert_eq!(layout.offset(1, 0, 1), layout.segment_vertex_count() + 1);
        assert_eq!(layout.offset(2, 0, 2), layout.vertex_count() - 1);
    }

    #[rstest]
    #[case(2, 1, 0)]
    #[case(2, 4, 1)]
    #[case(5, 3, 4)]
    #[case(3, 16, 0)]
    fn every_offset_is_distinct_and_in_range(
        #[case] nodes: usize,
        #[case] segments: usize,
        #[case] subdivisions: usize,
    ) {
        let layout = GridLayout::new(nodes, segments, subdivisions).unwrap();
        let mut seen = vec![false; layout.vertex_count()];
        for column in 0..=segments {
            let last_subdivision = if column == segments { 0 } else { subdivisions };
            for subdivision in 0..=last_subdivision {
                for rail in 0..nodes {
                    let offset = layout.offset(column, subdivision, rail);
                    assert!(!seen[offset], "offset {offset} visited twice");
                    seen[offset] = true;
                }
            }
        }
        assert!(seen.into_iter().all(|visited| visited));
    }

    #[rstest]
    #[case(0, 4, TrailError::NotEnoughNodes(0))]
    #[case(1, 4, TrailError::NotEnoughNodes(1))]
    #[case(2, 0, TrailError::NoSegments)]
    fn degenerate_grids_are_rejected(
        #[case] nodes: usize,
        #[case] segments: usize,
        #[case] expected: TrailError,
    ) {
        assert_eq!(GridLayout::new(nodes, segments, 3), Err(expected));
    }

    #[test]
    fn grids_beyond_u32_indices_are_rejected() {
        assert!(matches!(
            GridLayout::new(1 << 16, 1 << 16, 0),
            Err(TrailError::TooManyVertices(_))
        ));
    }
}

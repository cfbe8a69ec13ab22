use ribbon_trail_models::{GridLayout, HeadInterpolation, SplineKind};

use crate::{
    spline::{self, lerp, reflect},
    topology, uv,
};

/// Vertex data of one trail: positions, texture coordinates and colors of every vertex, the
/// cached length of every history segment, and the fixed index buffer.
///
/// All buffers are sized once from the [`GridLayout`] and only mutated in place.
#[derive(Debug, Clone)]
pub struct TrailGrid {
    layout: GridLayout,
    positions: Vec<glam::Vec3>,
    uvs: Vec<glam::Vec2>,
    colors: Vec<[u8; 4]>,
    /// `segments * node_count` lengths, see [`GridLayout::segment_offset`]
    segment_lengths: Vec<f32>,
    indices: Vec<u32>,
}

impl TrailGrid {
    pub fn new(layout: GridLayout, color: [u8; 4]) -> Self {
        let mut grid = Self {
            layout,
            positions: topology::reference_positions(&layout),
            uvs: vec![glam::Vec2::ZERO; layout.vertex_count()],
            colors: vec![color; layout.vertex_count()],
            segment_lengths: vec![0.0; layout.segment_length_count()],
            indices: topology::build_indices(&layout),
        };
        grid.recompute_uvs();
        grid
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
    pub fn positions(&self) -> &[glam::Vec3] {
        &self.positions
    }
    pub fn uvs(&self) -> &[glam::Vec2] {
        &self.uvs
    }
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn position(&self, column: usize, subdivision: usize, rail: usize) -> glam::Vec3 {
        self.positions[self.layout.offset(column, subdivision, rail)]
    }
    pub fn uv(&self, column: usize, subdivision: usize, rail: usize) -> glam::Vec2 {
        self.uvs[self.layout.offset(column, subdivision, rail)]
    }
    /// history sample `column` of `rail`, column 0 being the live head
    pub fn column_position(&self, column: usize, rail: usize) -> glam::Vec3 {
        self.position(column, 0, rail)
    }
    /// cached distance between columns `column` and `column + 1` on `rail`
    pub fn segment_length(&self, column: usize, rail: usize) -> f32 {
        self.segment_lengths[self.layout.segment_offset(column, rail)]
    }
    /// total arc length of the sampled history of `rail`
    pub fn rail_length(&self, rail: usize) -> f32 {
        (0..self.layout.segments())
            .map(|column| self.segment_length(column, rail))
            .sum()
    }

    /// Collapses every rail onto its anchor, the trail has no length afterward.
    pub(crate) fn reset(&mut self, heads: &[glam::Vec3]) {
        debug_assert_eq!(heads.len(), self.layout.node_count());
        for row in 0..self.layout.line_vertex_count() {
            let start = self.layout.row_offset(row, 0);
            self.positions[start..start + heads.len()].copy_from_slice(heads);
        }
        self.segment_lengths.fill(0.0);
        self.recompute_uvs();
    }

    /// Moves the history one column toward the tail.
    /// The oldest column and its segment length are dropped, column 0 keeps its value until the
    /// next [`TrailGrid::track_head`].
    pub(crate) fn shift(&mut self) {
        let node_count = self.layout.node_count();
        for column in (1..=self.layout.segments()).rev() {
            let source = self.layout.offset(column - 1, 0, 0);
            let destination = self.layout.offset(column, 0, 0);
            self.positions
                .copy_within(source..source + node_count, destination);
        }
        for column in (1..self.layout.segments()).rev() {
            let source = self.layout.segment_offset(column - 1, 0);
            let destination = self.layout.segment_offset(column, 0);
            self.segment_lengths
                .copy_within(source..source + node_count, destination);
        }
    }

    /// Glues column 0 to the anchors and rebuilds the interval between the head and column 1.
    pub(crate) fn track_head(
        &mut self,
        heads: &[glam::Vec3],
        interpolation: HeadInterpolation,
        kind: SplineKind,
    ) {
        debug_assert_eq!(heads.len(), self.layout.node_count());
        for (rail, head) in heads.iter().enumerate() {
            let head_offset = self.layout.offset(0, 0, rail);
            self.positions[head_offset] = *head;
            let length_offset = self.layout.segment_offset(0, rail);
            self.segment_lengths[length_offset] = head.distance(self.column_position(1, rail));
        }
        match interpolation {
            HeadInterpolation::Linear => self.fill_head_interval_linear(),
            HeadInterpolation::Spline => self.fill_interval(0, kind),
        }
    }

    fn fill_head_interval_linear(&mut self) {
        let stride = self.layout.stride();
        for rail in 0..self.layout.node_count() {
            let head = self.column_position(0, rail);
            let first = self.column_position(1, rail);
            for subdivision in 1..stride {
                let t = subdivision as f32 / stride as f32;
                let offset = self.layout.offset(0, subdivision, rail);
                self.positions[offset] = lerp(head, first, t);
            }
        }
    }

    /// Recomputes the subdivision vertices between columns `column` and `column + 1`.
    /// Missing neighbors past the head or the tail are reflected from the interval itself.
    pub(crate) fn fill_interval(&mut self, column: usize, kind: SplineKind) {
        debug_assert!(column < self.layout.segments());
        let stride = self.layout.stride();
        if stride == 1 {
            return;
        }
        let last_column = self.layout.segments();
        for rail in 0..self.layout.node_count() {
            let start = self.column_position(column, rail);
            let end = self.column_position(column + 1, rail);
            let previous = match column {
                0 => reflect(start, end),
                _ => self.column_position(column - 1, rail),
            };
            let next = if column + 1 == last_column {
                reflect(end, start)
            } else {
                self.column_position(column + 2, rail)
            };
            for subdivision in 1..stride {
                let t = subdivision as f32 / stride as f32;
                let offset = self.layout.offset(column, subdivision, rail);
                self.positions[offset] = spline::evaluate(kind, previous, start, end, next, t);
            }
        }
    }

    /// Recomputes every interval behind the head one.
    pub(crate) fn fill_history(&mut self, kind: SplineKind) {
        for column in 1..self.layout.segments() {
            self.fill_interval(column, kind);
        }
    }

    pub(crate) fn recompute_uvs(&mut self) {
        uv::recompute_uvs(&self.layout, &self.segment_lengths, &mut self.uvs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{vec3, Vec3};

    fn grid(nodes: usize, segments: usize, subdivisions: usize) -> TrailGrid {
        TrailGrid::new(
            GridLayout::new(nodes, segments, subdivisions).unwrap(),
            [255; 4],
        )
    }

    fn polyline_length(grid: &TrailGrid, rail: usize) -> f32 {
        (0..grid.layout().segments())
            .map(|column| {
                grid.column_position(column, rail)
                    .distance(grid.column_position(column + 1, rail))
            })
            .sum()
    }

    #[test]
    fn reset_collapses_every_rail() {
        let mut grid = grid(2, 4, 2);
        let heads = [vec3(1.0, 2.0, 3.0), vec3(-1.0, 0.0, 5.0)];
        grid.reset(&heads);
        for row in 0..grid.layout().line_vertex_count() {
            assert_eq!(grid.positions()[grid.layout().row_offset(row, 0)], heads[0]);
            assert_eq!(grid.positions()[grid.layout().row_offset(row, 1)], heads[1]);
        }
        assert_eq!(grid.rail_length(0), 0.0);
        assert_eq!(grid.rail_length(1), 0.0);
    }

    #[test]
    fn shift_moves_columns_and_lengths_toward_the_tail() {
        let mut grid = grid(2, 3, 1);
        grid.reset(&[Vec3::ZERO, Vec3::X]);
        grid.track_head(
            &[vec3(0.0, 0.0, 2.0), vec3(1.0, 0.0, 2.0)],
            HeadInterpolation::Linear,
            SplineKind::CatmullRom,
        );
        assert_eq!(grid.segment_length(0, 0), 2.0);

        grid.shift();
        assert_eq!(grid.column_position(1, 0), vec3(0.0, 0.0, 2.0));
        assert_eq!(grid.column_position(1, 1), vec3(1.0, 0.0, 2.0));
        assert_eq!(grid.segment_length(1, 0), 2.0);
        assert_eq!(grid.segment_length(1, 1), 2.0);
        // the previous first column is now second
        assert_eq!(grid.column_position(2, 0), Vec3::ZERO);
    }

    #[test]
    fn linear_head_interval_lies_on_the_chord() {
        let mut grid = grid(2, 2, 3);
        grid.reset(&[Vec3::ZERO, Vec3::X]);
        grid.track_head(
            &[vec3(0.0, 0.0, 4.0), vec3(1.0, 0.0, 4.0)],
            HeadInterpolation::Linear,
            SplineKind::CatmullRom,
        );
        assert_eq!(grid.position(0, 1, 0), vec3(0.0, 0.0, 3.0));
        assert_eq!(grid.position(0, 2, 0), vec3(0.0, 0.0, 2.0));
        assert_eq!(grid.position(0, 3, 1), vec3(1.0, 0.0, 1.0));
    }

    #[test]
    fn spline_interval_passes_near_history_samples() {
        let mut grid = grid(2, 3, 4);
        grid.reset(&[Vec3::ZERO, Vec3::Y]);
        for step in 1..=3 {
            let z = step as f32;
            grid.shift();
            grid.track_head(
                &[vec3(z * z, 0.0, z), vec3(z * z, 1.0, z)],
                HeadInterpolation::Spline,
                SplineKind::CatmullRom,
            );
            grid.fill_history(SplineKind::CatmullRom);
        }
        // subdivision vertices stay between their columns along z
        for column in 0..3 {
            let start = grid.column_position(column, 0).z;
            let end = grid.column_position(column + 1, 0).z;
            for subdivision in 1..5 {
                let z = grid.position(column, subdivision, 0).z;
                assert!(z <= start.max(end) + 1e-4 && z >= start.min(end) - 1e-4);
            }
        }
    }

    #[test]
    fn lengths_match_the_sampled_polyline() {
        let mut grid = grid(3, 5, 2);
        grid.reset(&[Vec3::ZERO, Vec3::X, Vec3::X * 2.0]);
        for step in 1..=9 {
            let angle = step as f32 * 0.4;
            let direction = vec3(angle.cos(), angle.sin(), 0.0);
            let heads = [direction * 1.0, direction * 2.0, direction * 3.0];
            if step % 2 == 0 {
                grid.shift();
            }
            grid.track_head(&heads, HeadInterpolation::Linear, SplineKind::CatmullRom);
            for rail in 0..3 {
                let expected = polyline_length(&grid, rail);
                assert!(
                    (grid.rail_length(rail) - expected).abs() < 1e-4,
                    "step {step} rail {rail}: {} != {expected}",
                    grid.rail_length(rail)
                );
            }
        }
    }
}

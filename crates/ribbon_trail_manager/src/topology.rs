use ribbon_trail_models::GridLayout;

/// Triangulates the grid, two triangles for every quad between adjacent rails and rows.
///
/// With `k` the vertex at `(row, rail)`, the quad gives `(k, k + n, k + n + 1)` and
/// `(k, k + n + 1, k + 1)` where `n` is the number of rails. The last rail and the last row
/// open the grid, they start no quad.
pub fn build_indices(layout: &GridLayout) -> Vec<u32> {
    let node_count = layout.node_count();
    let mut indices = Vec::with_capacity(layout.index_count());
    for row in 0..layout.tail_row() {
        for rail in 0..node_count - 1 {
            let k = layout.row_offset(row, rail);
            // GridLayout refuses grids that do not fit in u32
            let [k, next_row, next_row_rail, next_rail] =
                [k, k + node_count, k + node_count + 1, k + 1].map(|i| i as u32);
            indices.extend([k, next_row, next_row_rail, k, next_row_rail, next_rail]);
        }
    }
    indices
}

/// Placeholder positions of a grid that never followed its anchors: vertex `(row, rail)` sits at
/// `(rail, 0, row)`.
pub fn reference_positions(layout: &GridLayout) -> Vec<glam::Vec3> {
    let mut positions = Vec::with_capacity(layout.vertex_count());
    for row in 0..layout.line_vertex_count() {
        for rail in 0..layout.node_count() {
            positions.push(glam::vec3(rail as f32, 0.0, row as f32));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 1, 0)]
    #[case(2, 4, 1)]
    #[case(3, 5, 2)]
    #[case(6, 2, 7)]
    fn index_buffer_size_and_range(
        #[case] nodes: usize,
        #[case] segments: usize,
        #[case] subdivisions: usize,
    ) {
        let layout = GridLayout::new(nodes, segments, subdivisions).unwrap();
        let indices = build_indices(&layout);
        assert_eq!(
            indices.len(),
            2 * 3 * (nodes - 1) * (layout.line_vertex_count() - 1)
        );
        assert!(indices
            .iter()
            .all(|&index| (index as usize) < layout.vertex_count()));
    }

    #[test]
    fn first_quad_of_two_rails() {
        let layout = GridLayout::new(2, 1, 0).unwrap();
        assert_eq!(build_indices(&layout), vec![0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn no_quad_wraps_around_the_last_rail() {
        let layout = GridLayout::new(3, 2, 0).unwrap();
        let indices = build_indices(&layout);
        for triangle in indices.chunks(3) {
            let rails: Vec<usize> = triangle.iter().map(|&i| i as usize % 3).collect();
            let spread = rails.iter().max().unwrap() - rails.iter().min().unwrap();
            assert_eq!(spread, 1, "triangle {triangle:?} spans non adjacent rails");
        }
    }

    #[test]
    fn placeholder_grid_is_flat() {
        let layout = GridLayout::new(2, 2, 1).unwrap();
        let positions = reference_positions(&layout);
        assert_eq!(positions.len(), layout.vertex_count());
        assert_eq!(positions[layout.offset(1, 1, 1)], glam::vec3(1.0, 0.0, 3.0));
        assert!(positions.iter().all(|p| p.y == 0.0));
    }
}

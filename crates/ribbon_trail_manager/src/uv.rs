use ribbon_trail_models::GridLayout;

use crate::spline::lerp;

/// Texture coordinates proportional to the distance travelled along each rail.
///
/// U is the rail index spread over `[0, 1]`. V grows from 0 at the tail to 1 at the head,
/// each history column getting the share of the rail length between itself and the tail.
/// A rail without length gets a uniform `1 / line_vertex_count` instead.
pub fn recompute_uvs(layout: &GridLayout, segment_lengths: &[f32], uvs: &mut [glam::Vec2]) {
    debug_assert_eq!(segment_lengths.len(), layout.segment_length_count());
    debug_assert_eq!(uvs.len(), layout.vertex_count());

    let stride = layout.stride();
    let segments = layout.segments();
    for rail in 0..layout.node_count() {
        let u = rail as f32 / (layout.node_count() - 1) as f32;
        let line_length: f32 = (0..segments)
            .map(|column| segment_lengths[layout.segment_offset(column, rail)])
            .sum();

        if line_length == 0.0 {
            let v = 1.0 / layout.line_vertex_count() as f32;
            for row in 0..layout.line_vertex_count() {
                uvs[layout.row_offset(row, rail)] = glam::vec2(u, v);
            }
            continue;
        }

        uvs[layout.offset(segments, 0, rail)] = glam::vec2(u, 0.0);
        let mut progress = 0.0;
        let mut tail_ward_v = 0.0;
        for column in (0..segments).rev() {
            progress += segment_lengths[layout.segment_offset(column, rail)];
            let v = progress / line_length;
            uvs[layout.offset(column, 0, rail)] = glam::vec2(u, v);
            for subdivision in 1..stride {
                let t = subdivision as f32 / stride as f32;
                uvs[layout.offset(column, subdivision, rail)] =
                    glam::vec2(u, lerp(v, tail_ward_v, t));
            }
            tail_ward_v = v;
        }
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ribbon_core::serde_glam::*;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct TrailVertex {
    pub position: Vec3,
    pub texture_coordinates: Vec2,
    pub color: [u8; 4],
}

impl TrailVertex {
    /// Interleaves the separate buffers of a trail. The shortest buffer decides the length.
    pub fn interleave(
        positions: &[glam::Vec3],
        uvs: &[glam::Vec2],
        colors: &[[u8; 4]],
    ) -> Vec<TrailVertex> {
        positions
            .iter()
            .zip(uvs)
            .zip(colors)
            .map(|((position, uv), color)| TrailVertex {
                position: Vec3(*position),
                texture_coordinates: Vec2(*uv),
                color: *color,
            })
            .collect()
    }
}

/// One frame worth of a trail geometry.
#[derive(Debug, Clone)]
pub struct TrailObject {
    /// id of the trail, chosen by the host
    pub trail: u64,
    pub vertices: Arc<[TrailVertex]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<TrailVertex>(), 24);
        let vertices = [TrailVertex {
            position: Vec3(glam::vec3(1.0, 2.0, 3.0)),
            texture_coordinates: Vec2(glam::vec2(0.5, 0.25)),
            color: [1, 2, 3, 4],
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[20..], &[1, 2, 3, 4]);
    }

    #[test]
    fn interleave_keeps_vertex_order() {
        let positions = [glam::Vec3::ZERO, glam::Vec3::X];
        let uvs = [glam::vec2(0.0, 1.0), glam::vec2(1.0, 1.0)];
        let colors = [[255; 4]; 2];
        let vertices = TrailVertex::interleave(&positions, &uvs, &colors);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position.0, glam::Vec3::X);
        assert_eq!(vertices[1].texture_coordinates.0, glam::vec2(1.0, 1.0));
    }
}

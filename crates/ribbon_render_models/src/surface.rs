/// Whatever displays a trail.
///
/// A trail uploads its index buffer once, then its whole vertex data after every update.
/// Buffers only live for the duration of the call, implementors copy what they keep.
pub trait TrailSurface {
    fn upload_indices(&mut self, indices: &[u32]);
    fn upload_geometry(&mut self, positions: &[glam::Vec3], uvs: &[glam::Vec2], colors: &[[u8; 4]]);
    fn set_visible(&mut self, visible: bool);
    /// the trail is torn down, nothing will be uploaded anymore
    fn release(&mut self) {}
}

impl<S: TrailSurface + ?Sized> TrailSurface for Box<S> {
    fn upload_indices(&mut self, indices: &[u32]) {
        (**self).upload_indices(indices)
    }
    fn upload_geometry(&mut self, positions: &[glam::Vec3], uvs: &[glam::Vec2], colors: &[[u8; 4]]) {
        (**self).upload_geometry(positions, uvs, colors)
    }
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }
    fn release(&mut self) {
        (**self).release()
    }
}

use std::{rc::Rc, sync::Arc};

/// Live world space position a rail of the trail follows.
pub trait Anchor {
    fn position(&self) -> glam::Vec3;
}

impl Anchor for glam::Vec3 {
    fn position(&self) -> glam::Vec3 {
        *self
    }
}

impl Anchor for ribbon_core::serde_glam::Vec3 {
    fn position(&self) -> glam::Vec3 {
        self.0
    }
}

impl<A: Anchor + ?Sized> Anchor for &A {
    fn position(&self) -> glam::Vec3 {
        (**self).position()
    }
}

impl<A: Anchor + ?Sized> Anchor for Box<A> {
    fn position(&self) -> glam::Vec3 {
        (**self).position()
    }
}

impl<A: Anchor + ?Sized> Anchor for Rc<A> {
    fn position(&self) -> glam::Vec3 {
        (**self).position()
    }
}

impl<A: Anchor + ?Sized> Anchor for Arc<A> {
    fn position(&self) -> glam::Vec3 {
        (**self).position()
    }
}

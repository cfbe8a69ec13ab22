//! Cubic curves through four control points `(previous, start, end, next)`, evaluated between
//! `start` (t = 0) and `end` (t = 1).

use ribbon_trail_models::SplineKind;

/// Values a spline can blend.
pub trait Interpolatable:
    Copy
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<f32, Output = Self>
{
}

impl Interpolatable for f32 {}
impl Interpolatable for glam::Vec2 {}
impl Interpolatable for glam::Vec3 {}

/// Virtual control point past `edge`, continuing the line coming from `neighbor`.
pub fn reflect<T: Interpolatable>(edge: T, neighbor: T) -> T {
    edge * 2.0 - neighbor
}

pub fn lerp<T: Interpolatable>(a: T, b: T, t: f32) -> T {
    a * (1.0 - t) + b * t
}

pub fn catmull_rom<T: Interpolatable>(previous: T, start: T, end: T, next: T, t: f32) -> T {
    let t2 = t * t;
    let t3 = t2 * t;

    previous * (-0.5 * t3 + t2 - 0.5 * t)
        + start * (1.5 * t3 - 2.5 * t2 + 1.0)
        + end * (-1.5 * t3 + 2.0 * t2 + 0.5 * t)
        + next * (0.5 * t3 - 0.5 * t2)
}

pub fn hermite<T: Interpolatable>(
    previous: T,
    start: T,
    end: T,
    next: T,
    t: f32,
    tension: f32,
    bias: f32,
) -> T {
    let incoming = (1.0 + bias) * (1.0 - tension) / 2.0;
    let outgoing = (1.0 - bias) * (1.0 - tension) / 2.0;
    let m0 = (start - previous) * incoming + (end - start) * outgoing;
    let m1 = (end - start) * incoming + (next - end) * outgoing;

    let t2 = t * t;
    let t3 = t2 * t;
    start * (2.0 * t3 - 3.0 * t2 + 1.0)
        + m0 * (t3 - 2.0 * t2 + t)
        + m1 * (t3 - t2)
        + end * (-2.0 * t3 + 3.0 * t2)
}

pub fn evaluate<T: Interpolatable>(
    kind: SplineKind,
    previous: T,
    start: T,
    end: T,
    next: T,
    t: f32,
) -> T {
    match kind {
        SplineKind::CatmullRom => catmull_rom(previous, start, end, next, t),
        SplineKind::Hermite { tension, bias } => {
            hermite(previous, start, end, next, t, tension, bias)
        }
    }
}

use crate::app::configuration::SimulationParameters;

/// Two anchors on a blade swinging around a pivot: one at the hilt, one at the tip.
pub struct SwingingBlade {
    pivot: glam::Vec3,
    hilt_offset: f32,
    blade_length: f32,
    swing_speed: f32,
    angle: f32,
}

impl SwingingBlade {
    pub fn new(parameters: &SimulationParameters) -> Self {
        Self {
            pivot: parameters.pivot.0,
            hilt_offset: parameters.hilt_offset,
            blade_length: parameters.blade_length,
            swing_speed: parameters.swing_speed,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self, elapsed: f32) {
        self.angle += self.swing_speed * elapsed;
    }

    /// mostly horizontal swing, with the tip rising and falling twice per turn
    fn direction(&self) -> glam::Vec3 {
        glam::vec3(
            self.angle.cos(),
            0.35 * (2.0 * self.angle).sin(),
            self.angle.sin(),
        )
        .normalize()
    }

    pub fn anchors(&self) -> [glam::Vec3; 2] {
        let direction = self.direction();
        let hilt = self.pivot + direction * self.hilt_offset;
        [hilt, hilt + direction * self.blade_length]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_keep_the_blade_length() {
        let mut blade = SwingingBlade::new(&SimulationParameters::default());
        for _ in 0..50 {
            blade.advance(1.0 / 60.0);
            let [hilt, tip] = blade.anchors();
            assert!((hilt.distance(tip) - 1.1).abs() < 1e-5);
        }
    }

    #[test]
    fn blade_moves_when_advanced() {
        let mut blade = SwingingBlade::new(&SimulationParameters::default());
        let before = blade.anchors();
        blade.advance(0.1);
        assert!(before[1].distance(blade.anchors()[1]) > 0.1);
    }
}

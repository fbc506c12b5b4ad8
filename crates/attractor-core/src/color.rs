use glam::{Vec3, Vec4};
use std::f32::consts::TAU;

/// Cosine gradient `a + b * cos(2π(c·t + d))`, evaluated per channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosinePalette {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
}

impl CosinePalette {
    /// Red -> pink -> purple ramp used for particle coloring.
    pub const EMBER: CosinePalette = CosinePalette {
        a: Vec3::new(0.821, 0.328, 0.242),
        b: Vec3::new(0.268, -2.92, 0.896),
        c: Vec3::new(0.768, 1.078, 0.296),
        d: Vec3::new(2.820, 3.026, -0.273),
    };

    /// Raw palette value. Channels may be negative or exceed 1.
    pub fn eval(&self, t: f32) -> Vec3 {
        let phase = (self.c * t + self.d) * TAU;
        let cos = Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos());
        self.a + self.b * cos
    }

    /// Lower and upper bound each channel of [`eval`](Self::eval) can reach.
    pub fn channel_range(&self) -> (Vec3, Vec3) {
        (self.a - self.b.abs(), self.a + self.b.abs())
    }
}

impl Default for CosinePalette {
    fn default() -> Self {
        Self::EMBER
    }
}

/// Evaluate the default particle palette at `t`.
pub fn color_at(t: f32) -> Vec3 {
    CosinePalette::EMBER.eval(t)
}

/// RGB to RGBA, flooring negative channels at zero. Values above 1 pass through.
pub fn to_rgba(rgb: Vec3, alpha: f32) -> Vec4 {
    rgb.max(Vec3::ZERO).extend(alpha)
}

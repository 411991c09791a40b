/// Cubic Bézier easing curve from (0, 0) to (1, 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeFunction {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl TimeFunction {
    /// Fluent "fast out, slow in" curve used for elements entering.
    pub const DECELERATE: Self = Self::cubic_bezier(0.0, 0.0, 0.0, 1.0);
    /// Fluent curve used for elements leaving.
    pub const ACCELERATE: Self = Self::cubic_bezier(1.0, 0.0, 1.0, 1.0);
    pub const STANDARD: Self = Self::cubic_bezier(0.8, 0.0, 0.2, 1.0);

    pub const fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = solve_parameter(|s| bezier_component(self.x1, self.x2, s), t);
        bezier_component(self.y1, self.y2, s)
    }

    /// Input at which [`sample`](Self::sample) reaches `value`. The curves in
    /// use are monotonic, so the answer is unique.
    pub fn invert(self, value: f32) -> f32 {
        let value = value.clamp(0.0, 1.0);
        if value <= 0.0 {
            return 0.0;
        }
        if value >= 1.0 {
            return 1.0;
        }
        solve_parameter(|t| self.sample(t), value)
    }
}

fn bezier_component(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Bisection for f(s) = target on a non-decreasing f over [0, 1].
fn solve_parameter(f: impl Fn(f32) -> f32, target: f32) -> f32 {
    let mut low = 0.0_f32;
    let mut high = 1.0_f32;
    let mut s = target;
    for _ in 0..32 {
        let value = f(s);
        if (value - target).abs() <= 1e-5 {
            break;
        }
        if value < target {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) * 0.5;
    }
    s
}

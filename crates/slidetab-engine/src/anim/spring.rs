/// Time remapping applied before the spring is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out: fast start, gentle arrival.
    #[default]
    EaseOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::EaseOut => 1.0 - (1.0 - u) * (1.0 - u),
        }
    }
}

/// Residual displacement the spring is tuned to reach at `duration`.
const SETTLE_EPSILON: f32 = 1e-3;

/// Damped harmonic spring normalised to move from 0 to 1 in `duration`
/// seconds.
///
/// `initial_velocity` is expressed in distances per second, so `1.0` means
/// "covering the whole distance in one second". The stiffness is derived so
/// the oscillation envelope decays to [`SETTLE_EPSILON`] at `duration`; the
/// curve snaps to exactly `1.0` from there on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCurve {
    pub duration: f32,
    pub damping_ratio: f32,
    pub initial_velocity: f32,
    pub easing: Easing,
}

impl Default for SpringCurve {
    /// 0.5 s, damping ratio 0.8, initial velocity 0.1, ease-out.
    fn default() -> Self {
        Self { duration: 0.5, damping_ratio: 0.8, initial_velocity: 0.1, easing: Easing::EaseOut }
    }
}

impl SpringCurve {
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    /// Progress at `t` seconds after the start. `0.0` at `t <= 0`, exactly
    /// `1.0` at `t >= duration`, and may overshoot in between when the spring
    /// is underdamped.
    pub fn sample(&self, t: f32) -> f32 {
        if !(self.duration > 0.0) || t >= self.duration {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }
        let t = self.easing.apply(t / self.duration) * self.duration;
        1.0 - self.displacement(t)
    }

    /// Remaining displacement (1 at rest start, 0 at target).
    fn displacement(&self, t: f32) -> f32 {
        let zeta = self.damping_ratio.max(0.01);
        // Envelope e^(-zeta * omega * duration) == SETTLE_EPSILON
        let omega = -SETTLE_EPSILON.ln() / (zeta * self.duration);
        let v0 = -self.initial_velocity;
        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + zeta * omega) / omega_d;
            (-zeta * omega * t).exp() * ((omega_d * t).cos() + b * (omega_d * t).sin())
        } else {
            // Critically damped (over-damped ratios are treated the same).
            (1.0 + (omega + v0) * t) * (-omega * t).exp()
        }
    }
}

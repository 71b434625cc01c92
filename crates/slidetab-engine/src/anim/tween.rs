use super::SpringCurve;

/// Identifies one started animation so its owner can cancel it or tell a
/// stale completion from the current one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A scalar animated from `from` to `to` along a [`SpringCurve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    curve: SpringCurve,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, curve: SpringCurve) -> Self {
        Self { from, to, curve, elapsed: 0.0 }
    }

    #[inline]
    pub fn from(&self) -> f32 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Curve progress in `[0, 1]` (may overshoot mid-flight).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.curve.sample(self.elapsed)
    }

    /// Current interpolated value; exactly `to` once finished.
    #[inline]
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.progress()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.curve.duration
    }

    /// Moves the end point without restarting the clock, e.g. after a
    /// relayout changed where the target sits.
    #[inline]
    pub fn retarget(&mut self, to: f32) {
        self.to = to;
    }

    /// Advances by `dt` seconds. Returns `true` once the tween has finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.curve.duration.max(0.0));
        }
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_starts_at_from_and_ends_at_to() {
        let mut t = Tween::new(10.0, 50.0, SpringCurve::default());
        assert_eq!(t.value(), 10.0);
        assert!(!t.advance(0.25));
        assert!(t.advance(0.25));
        assert_eq!(t.value(), 50.0);
    }

    #[test]
    fn elapsed_saturates_at_duration() {
        let mut t = Tween::new(0.0, 1.0, SpringCurve::default());
        t.advance(10.0);
        assert_eq!(t.elapsed(), 0.5);
    }

    #[test]
    fn negative_or_nan_dt_is_ignored() {
        let mut t = Tween::new(0.0, 1.0, SpringCurve::default());
        t.advance(-1.0);
        t.advance(f32::NAN);
        assert_eq!(t.elapsed(), 0.0);
    }

    #[test]
    fn retarget_keeps_progress() {
        let mut t = Tween::new(0.0, 100.0, SpringCurve::default());
        t.advance(0.1);
        let p = t.progress();
        t.retarget(200.0);
        assert_eq!(t.progress(), p);
        assert_eq!(t.value(), 200.0 * p);
    }
}

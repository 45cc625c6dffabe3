use crate::geometry::wrap_degrees;

/// Fraction of the pending drag delta consumed per animation frame.
pub const EASING_FACTOR: f64 = 0.8;

/// Residual (degrees) below which the loop settles and stops rescheduling.
pub const SETTLE_EPSILON: f64 = 0.05;

/// Inertial settle animator for drag rotation.
///
/// Raw angular deltas from the pointer pile up in `pending`; each frame
/// consumes a fixed fraction of them into the published base angle, so a
/// drag release decays smoothly instead of jumping. The `armed` flag
/// guarantees at most one animation-frame request is in flight: `arm`
/// returns whether the caller actually needs to schedule one.
#[derive(Debug, Clone, Default)]
pub struct SpinEasing {
    base: f64,
    pending: f64,
    armed: bool,
}

impl SpinEasing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-sync the base angle with the render target (drag start).
    pub fn set_base(&mut self, degrees: f64) {
        self.base = wrap_degrees(degrees);
    }

    pub fn base_angle(&self) -> f64 {
        self.base
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }

    /// Accumulate a raw angular delta. Non-finite samples (degenerate
    /// center-point angles) contribute nothing.
    pub fn push_delta(&mut self, delta: f64) {
        if delta.is_finite() {
            self.pending += delta;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending.abs() <= SETTLE_EPSILON
    }

    /// Request permission to schedule a frame. Returns `true` exactly once
    /// until the frame is delivered via [`step`]; repeated calls while armed
    /// are no-ops.
    ///
    /// [`step`]: SpinEasing::step
    pub fn arm(&mut self) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        true
    }

    /// One frame of the easing loop: consume a fraction of the pending
    /// delta into the base angle and return the new angle to publish.
    /// Disarms, so the caller may re-arm if the loop has not settled.
    pub fn step(&mut self) -> f64 {
        self.armed = false;
        let consumed = self.pending * EASING_FACTOR;
        self.pending -= consumed;
        self.base = wrap_degrees(self.base + consumed);
        self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(easing: &mut SpinEasing) -> f64 {
        let mut last = easing.base_angle();
        while easing.arm() {
            last = easing.step();
            if easing.is_settled() {
                break;
            }
        }
        last
    }

    #[test]
    fn converges_to_cumulative_delta() {
        let mut easing = SpinEasing::new();
        easing.set_base(10.0);
        easing.push_delta(30.0);
        easing.push_delta(20.0);
        let settled = settle(&mut easing);
        assert!((settled - 60.0).abs() <= SETTLE_EPSILON);
        assert!(easing.pending().abs() <= SETTLE_EPSILON);
    }

    #[test]
    fn opposing_deltas_cancel_before_first_frame() {
        // Pointer-down at 0°, move to 90° (+90), back to 45° (−45): the net
        // pending delta is +45 before any frame runs, and the settled angle
        // moves by +45 from the pre-drag value.
        let mut easing = SpinEasing::new();
        easing.set_base(0.0);
        easing.push_delta(90.0);
        easing.push_delta(-45.0);
        assert!((easing.pending() - 45.0).abs() < 1e-9);

        let settled = settle(&mut easing);
        assert!((settled - 45.0).abs() <= SETTLE_EPSILON);
        assert!(easing.pending().abs() <= SETTLE_EPSILON);
    }

    #[test]
    fn arm_is_idempotent_until_frame_delivery() {
        let mut easing = SpinEasing::new();
        easing.push_delta(90.0);
        assert!(easing.arm());
        assert!(!easing.arm());
        assert!(!easing.arm());
        easing.step();
        assert!(easing.arm());
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut easing = SpinEasing::new();
        easing.push_delta(f64::NAN);
        easing.push_delta(f64::INFINITY);
        assert_eq!(easing.pending(), 0.0);
        assert!(easing.is_settled());
    }

    #[test]
    fn base_angle_stays_wrapped() {
        let mut easing = SpinEasing::new();
        easing.set_base(350.0);
        easing.push_delta(400.0);
        settle(&mut easing);
        assert!(easing.base_angle().abs() < 360.0);
    }

    #[test]
    fn settled_loop_consumes_nothing() {
        let mut easing = SpinEasing::new();
        easing.set_base(123.0);
        assert!(easing.is_settled());
        assert_eq!(easing.step(), 123.0);
    }
}

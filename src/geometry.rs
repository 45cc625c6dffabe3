use druid::{Point, Size};

/// Angle of `pointer` around the center of a widget of the given size, in
/// degrees in `(-180, 180]`. Screen coordinates, so angles grow clockwise.
///
/// Returns `None` when the pointer sits exactly on the center (or a
/// coordinate is non-finite), where the angle is undefined; callers treat
/// that sample as a zero delta.
pub fn pointer_angle(pointer: Point, bounds: Size) -> Option<f64> {
    let dx = pointer.x - bounds.width / 2.0;
    let dy = pointer.y - bounds.height / 2.0;
    if !(dx.is_finite() && dy.is_finite()) || (dx == 0.0 && dy == 0.0) {
        return None;
    }
    Some(dy.atan2(dx).to_degrees())
}

/// Wrap an angle modulo 360, preserving sign, so repeated accumulation
/// cannot grow without bound.
pub fn wrap_degrees(angle: f64) -> f64 {
    angle % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size::new(200.0, 200.0);

    #[test]
    fn cardinal_directions() {
        let right = pointer_angle(Point::new(200.0, 100.0), BOUNDS).unwrap();
        let below = pointer_angle(Point::new(100.0, 200.0), BOUNDS).unwrap();
        let left = pointer_angle(Point::new(0.0, 100.0), BOUNDS).unwrap();
        let above = pointer_angle(Point::new(100.0, 0.0), BOUNDS).unwrap();

        assert!((right - 0.0).abs() < 1e-9);
        assert!((below - 90.0).abs() < 1e-9);
        assert!((left - 180.0).abs() < 1e-9);
        assert!((above - -90.0).abs() < 1e-9);
    }

    #[test]
    fn center_point_is_undefined() {
        assert_eq!(pointer_angle(Point::new(100.0, 100.0), BOUNDS), None);
    }

    #[test]
    fn range_is_half_open() {
        // Just below the negative x axis maps near +180, just above near -180.
        let low = pointer_angle(Point::new(0.0, 100.001), BOUNDS).unwrap();
        let high = pointer_angle(Point::new(0.0, 99.999), BOUNDS).unwrap();
        assert!(low > 179.0 && low <= 180.0);
        assert!(high < -179.0 && high > -180.0);
    }

    #[test]
    fn wrap_preserves_sign() {
        assert!((wrap_degrees(365.0) - 5.0).abs() < 1e-9);
        assert!((wrap_degrees(-365.0) - -5.0).abs() < 1e-9);
        assert_eq!(wrap_degrees(359.0), 359.0);
        assert!(wrap_degrees(720.0).abs() < 1e-9);
    }
}

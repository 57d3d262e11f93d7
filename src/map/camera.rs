//! Camera pose.
//!
//! Owned and advanced by the simulation layer; the renderer treats the
//! pose as read-only for the duration of a frame.

use crate::fixed::lut::{FOCAL, VIEW_TOP};
use crate::fixed::{Angle, Fixed, FxVec2};

/// View-point in map space.
///
/// * `pos` is the planar position; `height` is the eye position along
///   the wall axis (the dimension the hardware scans per column).
/// * Only yaw is simulated; the fan half-width is `fov`, stored as a
///   tangent so ray setup never needs a trig call.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: FxVec2,
    pub height: Fixed,
    pub yaw: Angle,
    pub fov: Fixed,
}

impl Camera {
    /// Camera at `pos` facing `yaw`, with the fan width matching the
    /// projection constants (`VIEW_TOP / FOCAL`).
    pub fn new(pos: FxVec2, yaw: Angle) -> Self {
        Camera {
            pos,
            height: Fixed::ZERO,
            yaw,
            fov: Fixed::from_int(VIEW_TOP).safe_div(Fixed::from_int(FOCAL)),
        }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector the camera looks along.
    #[inline]
    pub fn forward(&self) -> FxVec2 {
        FxVec2::new(self.yaw.cos(), self.yaw.sin())
    }

    /// Unit vector to the camera's right.
    #[inline]
    pub fn right(&self) -> FxVec2 {
        FxVec2::new(self.yaw.sin(), -self.yaw.cos())
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units and `side` (strafe).
    pub fn step(&mut self, forward: Fixed, side: Fixed) {
        self.pos = self.pos + self.forward() * forward + self.right() * side;
    }

    /// Rotate the heading (positive = counter-clockwise).
    pub fn turn(&mut self, delta: Angle) {
        self.yaw = self.yaw + delta;
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(FxVec2::from_ints(0, 0), Angle::from_degrees(30.0));
        let f = cam.forward();
        let r = cam.right();
        let dot = f.x.mul(r.x) + f.y.mul(r.y);
        assert!(dot.abs().to_f32() < 1e-3);
        let len2 = f.x.mul(f.x) + f.y.mul(f.y);
        assert!((len2.to_f32() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn step_moves_along_heading() {
        let mut cam = Camera::new(FxVec2::from_ints(0, 0), Angle::ZERO);
        cam.step(Fixed::from_int(10), Fixed::ZERO);
        assert_eq!(cam.pos.x.to_int(), 10);
        assert_eq!(cam.pos.y.to_int(), 0);

        cam.turn(Angle::QUARTER);
        cam.step(Fixed::from_int(5), Fixed::ZERO);
        assert_eq!(cam.pos.x.to_int(), 10);
        assert_eq!(cam.pos.y.to_int(), 5);
    }

    #[test]
    fn default_fov_matches_projection_constants() {
        let cam = Camera::new(FxVec2::from_ints(0, 0), Angle::ZERO);
        assert!((cam.fov.to_f32() - VIEW_TOP as f32 / FOCAL as f32).abs() < 1e-4);
    }
}

//! Binary angles and table-driven trigonometry.
//!
//! Angles are 16-bit binary angle measure: 65536 units per full turn,
//! wrapping arithmetic. All trig goes through lazily built lookup
//! tables; there is no runtime `atan`/`sin` call outside table
//! construction and tests.

use once_cell::sync::Lazy;

use super::Fixed;

/// Fine angles per full turn (sine table resolution).
pub const FINEANGLES: usize = 8192;

/// Shift from binary-angle units down to fine angles.
pub const FINE_SHIFT: u32 = 3;

pub(crate) const FINE_QUARTER: usize = FINEANGLES / 4;
const FINE_HALF: usize = FINEANGLES / 2;

/// Slope table resolution: slopes in [0, 1] quantised to this many steps.
pub const SLOPERANGE: usize = 2048;
const SLOPEBITS: u32 = 11;

/// Quarter-wave sine table; the rest of the circle folds onto it.
static SIN_QUARTER: Lazy<Vec<Fixed>> = Lazy::new(|| {
    (0..=FINE_QUARTER)
        .map(|i| {
            let rad = i as f64 * std::f64::consts::TAU / FINEANGLES as f64;
            Fixed::from_bits((rad.sin() * super::FRACUNIT as f64) as i32)
        })
        .collect()
});

/// Quarter-wave tangent table.
static TAN_QUARTER: Lazy<Vec<Fixed>> = Lazy::new(|| {
    (0..FINE_QUARTER)
        .map(|i| {
            let rad = i as f64 * std::f64::consts::TAU / FINEANGLES as f64;
            let t = rad.tan() * super::FRACUNIT as f64;
            if t >= i32::MAX as f64 {
                Fixed::MAX
            } else {
                Fixed::from_bits(t as i32)
            }
        })
        .collect()
});

/// Slope index to binary angle, covering the first half-quadrant.
static TANTOANGLE: Lazy<Vec<u16>> = Lazy::new(|| {
    (0..=SLOPERANGE)
        .map(|i| {
            let rad = (i as f64 / SLOPERANGE as f64).atan();
            (rad / std::f64::consts::TAU * 65536.0) as u16
        })
        .collect()
});

/// 16-bit binary angle. Zero points along +x, angles grow toward +y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Angle(u16);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER: Angle = Angle(0x4000);
    pub const HALF: Angle = Angle(0x8000);

    #[inline(always)]
    pub const fn from_bam(bam: u16) -> Self {
        Angle(bam)
    }

    #[inline(always)]
    pub const fn bam(self) -> u16 {
        self.0
    }

    /// Recentered to [-half turn, half turn): reinterpret as signed.
    #[inline(always)]
    pub const fn signed(self) -> i32 {
        self.0 as i16 as i32
    }

    pub fn from_degrees(deg: f32) -> Self {
        Angle((deg / 360.0 * 65536.0).round() as i64 as u16)
    }

    pub fn to_degrees(self) -> f32 {
        self.signed() as f32 / 65536.0 * 360.0
    }

    fn fine(self) -> usize {
        (self.0 >> FINE_SHIFT) as usize
    }

    pub fn sin(self) -> Fixed {
        let i = self.fine();
        match i {
            _ if i <= FINE_QUARTER => SIN_QUARTER[i],
            _ if i <= FINE_HALF => SIN_QUARTER[FINE_HALF - i],
            _ if i <= FINE_HALF + FINE_QUARTER => -SIN_QUARTER[i - FINE_HALF],
            _ => -SIN_QUARTER[FINEANGLES - i],
        }
    }

    pub fn cos(self) -> Fixed {
        (self + Angle::QUARTER).sin()
    }

    /// Table tangent; the pole at a quarter turn saturates to `MAX`.
    pub fn tan(self) -> Fixed {
        let i = self.fine();
        match i {
            _ if i < FINE_QUARTER => TAN_QUARTER[i],
            _ if i == FINE_QUARTER => Fixed::MAX,
            _ if i < FINE_HALF => -TAN_QUARTER[FINE_HALF - i],
            // tangent repeats every half turn
            _ => (self - Angle::HALF).tan(),
        }
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;
    #[inline(always)]
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl std::ops::Sub for Angle {
    type Output = Angle;
    #[inline(always)]
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;
    #[inline(always)]
    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

/// Quantise `num / den` (both non-negative, `num <= den` expected) to a
/// slope table index. A vanishing denominator pins to the table end.
fn slope_div(num: Fixed, den: Fixed) -> usize {
    if den.to_bits() <= 0 {
        return SLOPERANGE;
    }
    let idx = ((num.to_bits() as i64) << SLOPEBITS) / den.to_bits() as i64;
    idx.clamp(0, SLOPERANGE as i64) as usize
}

/// Angle of the vector `(dx, dy)` via quadrant classification and the
/// slope table; no true arctangent at runtime. `(0, 0)` maps to zero.
pub fn point_to_angle(dx: Fixed, dy: Fixed) -> Angle {
    if dx.is_zero() && dy.is_zero() {
        return Angle::ZERO;
    }

    let (ax, ay) = (dx.abs(), dy.abs());
    let (offset, first_half) = match (dx.to_bits() >= 0, dy.to_bits() >= 0) {
        (true, true) => (Angle::ZERO, ay < ax),
        (false, true) => (Angle::QUARTER, ay > ax),
        (false, false) => (Angle::HALF, ay < ax),
        (true, false) => (Angle::HALF + Angle::QUARTER, ay > ax),
    };

    let slope = if ax < ay {
        slope_div(ax, ay)
    } else {
        slope_div(ay, ax)
    };
    let t = Angle::from_bam(TANTOANGLE[slope]);

    if first_half {
        offset + t
    } else {
        offset + Angle::QUARTER - t
    }
}

/// Length of `(dx, dy)` through the sine identity: the larger component
/// divided by the sine of the vector's angle against the smaller one.
/// Saturates instead of faulting when the sine vanishes.
pub fn point_distance(dx: Fixed, dy: Fixed) -> Fixed {
    let (ax, ay) = (dx.abs(), dy.abs());
    let (du, dv) = if ax > ay { (ax, ay) } else { (ay, ax) };
    if du.is_zero() {
        return Fixed::ZERO;
    }
    // angle of (dv, du) lies in the upper half-quadrant, sin >= 1/sqrt(2)
    let s = point_to_angle(dv, du).sin();
    du.safe_div(s.at_least_epsilon())
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_sin_cos() {
        assert_eq!(Angle::ZERO.sin(), Fixed::ZERO);
        assert_eq!(Angle::ZERO.cos(), Fixed::ONE);
        assert_eq!(Angle::QUARTER.sin(), Fixed::ONE);
        assert_eq!(Angle::QUARTER.cos(), Fixed::ZERO);
        assert_eq!(Angle::HALF.sin(), Fixed::ZERO);
        assert_eq!(Angle::HALF.cos(), -Fixed::ONE);
    }

    #[test]
    fn sin_matches_float_oracle() {
        for deg in (0..360).step_by(7) {
            let a = Angle::from_degrees(deg as f32);
            let want = (deg as f32).to_radians().sin();
            assert!(
                (a.sin().to_f32() - want).abs() < 2e-3,
                "sin({deg}) = {} want {want}",
                a.sin()
            );
        }
    }

    #[test]
    fn tan_matches_float_oracle() {
        // stay away from the poles where the table saturates
        for deg in (-80..=80).step_by(5) {
            let a = Angle::from_degrees(deg as f32);
            let want = (deg as f32).to_radians().tan();
            assert!(
                (a.tan().to_f32() - want).abs() < 0.02 * want.abs().max(1.0),
                "tan({deg}) = {} want {want}",
                a.tan()
            );
        }
        assert_eq!(Angle::QUARTER.tan(), Fixed::MAX);
    }

    #[test]
    fn tantoangle_is_monotonic() {
        for w in TANTOANGLE.windows(2) {
            assert!(w[0] <= w[1]);
        }
        assert_eq!(TANTOANGLE[SLOPERANGE], 0x2000); // atan(1) = eighth turn
    }

    #[test]
    fn point_to_angle_octants() {
        let cases = [
            ((100, 0), 0.0),
            ((100, 100), 45.0),
            ((0, 100), 90.0),
            ((-100, 100), 135.0),
            ((-100, 0), 180.0),
            ((-100, -100), -135.0),
            ((0, -100), -90.0),
            ((100, -100), -45.0),
            ((100, 37), 20.3),
        ];
        for ((x, y), want) in cases {
            let a = point_to_angle(Fixed::from_int(x), Fixed::from_int(y));
            let mut got = a.to_degrees();
            if want == 180.0 && got < 0.0 {
                got += 360.0;
            }
            assert!((got - want).abs() < 0.2, "({x},{y}) -> {got} want {want}");
        }
    }

    #[test]
    fn point_distance_matches_hypot() {
        let cases = [(3, 4, 5.0), (100, 0, 100.0), (-30, -40, 50.0), (7, 24, 25.0)];
        for (x, y, want) in cases {
            let d = point_distance(Fixed::from_int(x), Fixed::from_int(y));
            assert!(
                (d.to_f32() - want).abs() / want < 0.01,
                "({x},{y}) -> {d} want {want}"
            );
        }
    }

    #[test]
    fn point_distance_degenerate_is_zero_not_fault() {
        assert_eq!(point_distance(Fixed::ZERO, Fixed::ZERO), Fixed::ZERO);
    }
}

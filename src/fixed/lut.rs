//! Screen geometry constants and the view-angle ↔ screen-row tables.
//!
//! The display is driven sideways: one hardware scanline covers one
//! *horizontal* slice of the view fan, so "row" here means the angular
//! position within the fan, 0 at the leftmost edge and [`SCREEN_H`] at
//! the rightmost. Both directions of the mapping are precomputed;
//! nothing in the render loop calls a trig routine.

use once_cell::sync::Lazy;

use super::angle::{Angle, FINE_QUARTER, FINE_SHIFT};
use super::Fixed;

/// Hardware framebuffer width in pixels (along a scanline).
pub const SCREEN_W: usize = 240;

/// Hardware framebuffer height in scanlines.
pub const SCREEN_H: usize = 160;

/// Projection-plane distance in pixels.
pub const FOCAL: i32 = 120;

/// Rows span `-VIEW_TOP..VIEW_TOP` around the view centre.
pub const VIEW_TOP: i32 = 80;

/// First and one-past-last pixel column, relative to the scanline centre.
pub const VIEW_LEFT: i32 = -(SCREEN_W as i32 / 2);
pub const VIEW_RIGHT: i32 = SCREEN_W as i32 / 2;

/*──────────────────── compressed monotone tables ────────────────────*/

/// Storage for a non-decreasing table whose entries grow by at most one
/// per step over a prefix: that prefix collapses to a first element plus
/// one bit per entry ("did the value step up here"), the remainder is
/// kept raw.
#[derive(Debug)]
pub struct MonoLut {
    first: u16,
    steps: Vec<u8>,
    compressed_len: usize,
    tail: Vec<u16>,
}

impl MonoLut {
    pub fn compress(values: &[u16]) -> Self {
        let mut compressed_len: usize = 0;
        let mut last = values.first().copied().unwrap_or(0);
        for &v in values {
            if v < last || v - last > 1 {
                break;
            }
            last = v;
            compressed_len += 1;
        }

        let mut steps = vec![0u8; compressed_len.div_ceil(8)];
        let mut last = values.first().copied().unwrap_or(0);
        for (i, &v) in values[..compressed_len].iter().enumerate() {
            if v > last {
                steps[i / 8] |= 1 << (i % 8);
            }
            last = v;
        }

        MonoLut {
            first: values.first().copied().unwrap_or(0),
            steps,
            compressed_len,
            tail: values[compressed_len..].to_vec(),
        }
    }

    pub fn decompress(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.compressed_len + self.tail.len());
        let mut value = self.first;
        for i in 0..self.compressed_len {
            if self.steps[i / 8] & (1 << (i % 8)) != 0 {
                value += 1;
            }
            out.push(value);
        }
        out.extend_from_slice(&self.tail);
        out
    }

    /// Bytes occupied by the compressed prefix bitset.
    pub fn compressed_bytes(&self) -> usize {
        self.steps.len()
    }
}

/*──────────────────── view angle → screen row ───────────────────────*/

/// Row offsets from the view centre for fine angles in the first
/// quadrant: `clamp(tan(a) * FOCAL, 0, VIEW_TOP)`. Stored compressed
/// (the tangent never grows faster than one pixel per fine step before
/// the clamp bites), decompressed once at startup.
static ROW_OFFSET: Lazy<Vec<u16>> = Lazy::new(|| {
    let raw: Vec<u16> = (0..FINE_QUARTER)
        .map(|i| {
            let a = Angle::from_bam((i << FINE_SHIFT) as u16);
            let off = a.tan().mul(Fixed::from_int(FOCAL)).to_int();
            off.clamp(0, VIEW_TOP) as u16
        })
        .collect();
    MonoLut::compress(&raw).decompress()
});

/// Map a view angle to a screen row.
///
/// Monotonically non-increasing: the left edge of the fan
/// (`+half-FOV` and beyond) is row 0, straight ahead is `VIEW_TOP`,
/// the right edge saturates at `SCREEN_H`.
pub fn viewangle_to_row(a: Angle) -> i32 {
    let s = a.signed();
    if s >= Angle::QUARTER.bam() as i32 {
        return 0;
    }
    if s <= -(Angle::QUARTER.bam() as i32) {
        return SCREEN_H as i32;
    }
    let fine = (s.unsigned_abs() as usize >> FINE_SHIFT as usize).min(FINE_QUARTER - 1);
    let off = ROW_OFFSET[fine] as i32;
    if s >= 0 { VIEW_TOP - off } else { VIEW_TOP + off }
}

/*──────────────────── screen row → view angle ───────────────────────*/

/// Inverse of [`viewangle_to_row`] over `0..SCREEN_H`: for each row,
/// the smallest fine angle whose projected offset reaches that row.
static ROW_ANGLE: Lazy<Vec<Angle>> = Lazy::new(|| {
    (0..SCREEN_H as i32)
        .map(|row| {
            let off = (VIEW_TOP - row).unsigned_abs() as u16;
            let fine = ROW_OFFSET.partition_point(|&v| v < off);
            let bam = ((fine.min(FINE_QUARTER - 1)) << FINE_SHIFT) as u16;
            if row <= VIEW_TOP {
                Angle::from_bam(bam)
            } else {
                -Angle::from_bam(bam)
            }
        })
        .collect()
});

/// View angle at the centre of screen row `row` (clamped to the screen).
pub fn row_to_viewangle(row: i32) -> Angle {
    ROW_ANGLE[row.clamp(0, SCREEN_H as i32 - 1) as usize]
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_lut_round_trip_fully_compressed() {
        let vals: Vec<u16> = vec![0, 0, 1, 2, 2, 3, 4, 4, 4, 5];
        let lut = MonoLut::compress(&vals);
        assert_eq!(lut.decompress(), vals);
        assert_eq!(lut.compressed_bytes(), 2);
    }

    #[test]
    fn mono_lut_round_trip_with_raw_tail() {
        let vals: Vec<u16> = vec![0, 1, 1, 2, 9, 10, 30];
        let lut = MonoLut::compress(&vals);
        assert_eq!(lut.decompress(), vals);
    }

    #[test]
    fn mono_lut_empty_and_single() {
        assert_eq!(MonoLut::compress(&[]).decompress(), Vec::<u16>::new());
        assert_eq!(MonoLut::compress(&[7]).decompress(), vec![7]);
    }

    #[test]
    fn row_table_is_fully_compressible() {
        // the whole first-quadrant table steps by at most one entry,
        // so the compressed form carries no raw tail
        let raw: Vec<u16> = (0..FINE_QUARTER)
            .map(|i| {
                let a = Angle::from_bam((i << FINE_SHIFT) as u16);
                let off = a.tan().mul(Fixed::from_int(FOCAL)).to_int();
                off.clamp(0, VIEW_TOP) as u16
            })
            .collect();
        let lut = MonoLut::compress(&raw);
        assert_eq!(lut.decompress().len(), raw.len());
        assert_eq!(lut.decompress(), raw);
    }

    #[test]
    fn centre_and_edges() {
        assert_eq!(viewangle_to_row(Angle::ZERO), VIEW_TOP);
        assert_eq!(viewangle_to_row(Angle::from_degrees(89.0)), 0);
        assert_eq!(viewangle_to_row(Angle::from_degrees(-89.0)), SCREEN_H as i32);
        // beyond the horizontal field of view saturates, never wraps
        assert_eq!(viewangle_to_row(Angle::from_degrees(135.0)), 0);
        assert_eq!(viewangle_to_row(Angle::from_degrees(-135.0)), SCREEN_H as i32);
    }

    #[test]
    fn row_mapping_is_monotonic() {
        let mut last = i32::MAX;
        for deg in -90..=90 {
            let row = viewangle_to_row(Angle::from_degrees(deg as f32));
            assert!(row <= last, "row went up again at {deg} deg");
            last = row;
        }
    }

    #[test]
    fn row_angle_round_trip() {
        for row in 0..SCREEN_H as i32 {
            let back = viewangle_to_row(row_to_viewangle(row));
            assert_eq!(back, row, "row {row} round-tripped to {back}");
        }
    }

    #[test]
    fn matches_pinhole_oracle() {
        for deg in -30..=30 {
            let a = Angle::from_degrees(deg as f32);
            let want = VIEW_TOP as f32 - (deg as f32).to_radians().tan() * FOCAL as f32;
            let got = viewangle_to_row(a) as f32;
            assert!(
                (got - want).abs() <= 1.5,
                "row({deg} deg) = {got}, oracle {want}"
            );
        }
    }
}

//! Affine parameter synthesis.
//!
//! Turns one scanline's depth, texture offset and hit side into the
//! hardware register block: the texel step per output pixel, the
//! translation that anchors the wall slice inside its atlas half, and
//! the horizontal window bounding where the slice is actually drawn.
//! Everything runs in 16.16 and narrows to the hardware 8.8 formats at
//! the very end.

use crate::fixed::Fixed;
use crate::fixed::lut::{FOCAL, SCREEN_W, VIEW_LEFT, VIEW_RIGHT};
use crate::hw::{BgAffine, WinH};
use crate::map::{Camera, TextureId};

use super::occlusion::Drawseg;
use super::raycast::RayHit;

/// Texture-atlas geometry: `pages` strips of `pixels_per_cell` rows,
/// each strip split into a plain and a shaded half along its width.
#[derive(Clone, Copy, Debug)]
pub struct AtlasGeo {
    pub pixels_per_cell: i32,
    pub pages: i32,
}

impl AtlasGeo {
    /// Atlas width in texels: the two side halves.
    #[inline]
    pub fn texture_width(&self) -> i32 {
        2 * self.pixels_per_cell
    }

    /// Atlas strip for a wall texture id (ids below 2 are the
    /// empty/invisible cell values and never reach synthesis).
    #[inline]
    pub fn page_of(&self, texture: TextureId) -> i32 {
        (texture as i32 - 2).rem_euclid(self.pages.max(1))
    }
}

/// Build one scanline's register block.
///
/// * `cam_height`: eye position along the wall axis, map units.
/// * `depth`: perpendicular distance to the wall, map units.
/// * `wall_off`: hit coordinate along the wall face, map units; only
///   its per-cell fraction selects the texture row.
/// * `wrap`: mirror the row, the ray sees the back of the wrap point.
pub fn synthesize(
    cam_height: Fixed,
    depth: Fixed,
    wall_off: Fixed,
    page: i32,
    side: u8,
    wrap: bool,
    geo: &AtlasGeo,
) -> (BgAffine, WinH) {
    let depth = depth.at_least_epsilon();
    let ppc = Fixed::from_int(geo.pixels_per_cell);
    let focal = Fixed::from_int(FOCAL);

    // texel step per output pixel
    let lam = depth.mul(ppc).safe_div(focal).at_least_epsilon();

    // anchor the cell's texel span inside this side's atlas half
    let anchor = Fixed::from_int(side as i32 * geo.pixels_per_cell + geo.pixels_per_cell / 2);
    let dx = lam.mul(Fixed::from_int(VIEW_LEFT)) + cam_height.mul(ppc) + anchor;

    // texture row: page base plus the per-cell offset
    let mut texel = wall_off.frac().mul(ppc);
    if wrap {
        texel = Fixed::from_int(geo.pixels_per_cell - 1) - texel;
    }
    let dy = Fixed::from_int(page * geo.pixels_per_cell) + texel;

    // horizontal window around the wall's apparent span
    let line_height = focal.safe_div(depth).to_int();
    let centre_off = cam_height.mul(focal).safe_div(depth).to_int();
    let draw_start = (-line_height / 2 + VIEW_RIGHT - centre_off).clamp(0, VIEW_RIGHT);
    let draw_end = (line_height / 2 + VIEW_RIGHT - centre_off).clamp(VIEW_RIGHT, SCREEN_W as i32);

    let aff = BgAffine {
        pa: lam.to_q8(),
        pb: side as i16,
        pc: 0,
        pd: dy.to_q8(),
        dx: dx.to_q24_8(),
        dy: dy.to_q24_8(),
    };
    (aff, WinH::pack(draw_start as u8, draw_end as u8))
}

/// Registers for one row of a drawrange: endpoint scale and texture
/// offset interpolate linearly across the owning drawseg's span.
///
/// Polygonal maps measure in map units; `cell_size` converts them to
/// texture cells (one cell is one wall height).
pub fn synthesize_row(
    cam: &Camera,
    seg: &Drawseg,
    row: i32,
    cell_size: Fixed,
    geo: &AtlasGeo,
) -> (BgAffine, WinH) {
    let span = (seg.h2 - seg.h1).max(1);
    let t = Fixed::from_int(row - seg.h1).safe_div(Fixed::from_int(span));
    let lam = seg.lam1.lerp(seg.lam2, t);
    let tx = seg.tx1.lerp(seg.tx2, t);

    // the drawseg carries depth over focal length, in map units
    let cell = cell_size.at_least_epsilon();
    let depth = lam.mul(Fixed::from_int(FOCAL)).safe_div(cell);
    synthesize(
        cam.height,
        depth,
        tx.safe_div(cell),
        geo.page_of(seg.texture),
        seg.side,
        false,
        geo,
    )
}

/// Registers for one scanline's raycast hit.
pub fn synthesize_ray(cam: &Camera, hit: &RayHit, geo: &AtlasGeo) -> (BgAffine, WinH) {
    synthesize(
        cam.height,
        hit.dist,
        hit.wall_offset,
        geo.page_of(hit.texture as TextureId),
        hit.side,
        hit.wrap,
        geo,
    )
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/

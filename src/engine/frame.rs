//! Per-frame orchestration.
//!
//! One `render` call walks camera pose → BSP order → projection →
//! occlusion → per-row affine synthesis into a scanline buffer, ready
//! for the delivery pipeline to hand to hardware at the next vertical
//! blank. The grid path synthesizes straight from raycast hits, one
//! per row. Rows nothing covers keep a closed window.

use log::trace;

use crate::fixed::Fixed;
use crate::fixed::lut::{SCREEN_H, VIEW_LEFT, VIEW_TOP};
use crate::hw::{ScanlineBuffer, ScrollPair};
use crate::map::{Camera, GridMap, LinedefFlags, MapData};

use super::affine::{AtlasGeo, synthesize_ray, synthesize_row};
use super::bsp::front_to_back;
use super::occlusion::OcclusionMap;
use super::project::project_linedef;
use super::raycast;

/// Owns the per-frame scratch state; reuse one instance across frames
/// so the interval list and arenas keep their allocations.
pub struct FrameRenderer {
    occlusion: OcclusionMap,
    geo: AtlasGeo,
    /// Map units per texture cell for the polygonal path (a wall is
    /// one cell tall). The grid path is always one unit per cell.
    cell_size: Fixed,
}

impl FrameRenderer {
    pub fn new(geo: AtlasGeo, cell_size: Fixed) -> Self {
        FrameRenderer {
            occlusion: OcclusionMap::new(),
            geo,
            cell_size,
        }
    }

    /// Render one camera pose over the polygonal map into `buf`.
    pub fn render(&mut self, map: &MapData, cam: &Camera, buf: &mut ScanlineBuffer) {
        buf.reset();
        self.occlusion.reset();

        let mut considered = 0usize;
        'sectors: for sector_id in front_to_back(map, cam.pos) {
            let sector = &map.sectors[sector_id as usize];
            for &ld_id in &sector.segs {
                let ld = &map.linedefs[ld_id as usize];
                if ld.is_portal() {
                    continue;
                }
                considered += 1;

                let Some(seg) = project_linedef(map, cam, ld_id) else {
                    continue;
                };
                if !self.occlusion.is_visible(seg.h1, seg.h2) {
                    continue;
                }

                let (h1, h2) = (seg.h1, seg.h2);
                let owner = if ld.flags.contains(LinedefFlags::INVISIBLE) {
                    None
                } else {
                    Some(self.occlusion.push_drawseg(seg))
                };
                self.occlusion.occlude(h1, h2, owner);

                if self.occlusion.fully_occluded() {
                    break 'sectors;
                }
            }
        }

        for dr in self.occlusion.drawranges() {
            let seg = self.occlusion.drawseg(dr.drawseg);
            for row in dr.range.top..dr.range.bottom {
                debug_assert!((0..SCREEN_H as i32).contains(&row));
                let (aff, win) = synthesize_row(cam, seg, row, self.cell_size, &self.geo);
                buf.set_line(row as usize, aff, win);
            }
        }

        buf.set_scroll(backdrop_scroll(cam));
        buf.seal();

        let (gaps, drawsegs) = self.occlusion.stats();
        trace!(
            "frame: {considered} segs considered, {drawsegs} accepted, {} drawranges, {gaps} gap(s) left",
            self.occlusion.drawranges().len()
        );
    }

    /// Render one camera pose over the occupancy grid into `buf`.
    pub fn render_grid(&mut self, grid: &GridMap, cam: &Camera, buf: &mut ScanlineBuffer) {
        buf.reset();

        let mut hits = 0usize;
        for row in 0..SCREEN_H {
            if let Some(hit) = raycast::cast(grid, cam, row) {
                let (aff, win) = synthesize_ray(cam, &hit, &self.geo);
                buf.set_line(row, aff, win);
                hits += 1;
            }
        }

        buf.set_scroll(backdrop_scroll(cam));
        buf.seal();

        trace!("grid frame: {hits}/{SCREEN_H} scanlines hit");
    }
}

/// Backdrop layer scroll: yaw-proportional horizontally, anchored to
/// the horizon line vertically.
fn backdrop_scroll(cam: &Camera) -> ScrollPair {
    ScrollPair {
        h: ((cam.yaw.bam() >> 6) as i32 + VIEW_LEFT) as u16,
        v: (-VIEW_TOP - 1) as u16,
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/

//! Occlusion-interval tracking.
//!
//! Per-frame state machine over an ordered list of screen-row
//! intervals already known to be covered. Candidate wall spans arrive
//! front to back (courtesy of the BSP ordering); each one is carved
//! against the remaining gaps, emitting exactly the newly covered rows
//! as [`Drawrange`]s. Once the two boundary sentinels merge, every row
//! is covered and the frame can stop feeding segments.

use smallvec::SmallVec;

use crate::fixed::Fixed;
use crate::fixed::lut::SCREEN_H;
use crate::map::{LinedefId, TextureId};

pub type DrawsegId = u16;

/// Covered rows, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Interval {
    top: i32,
    bottom: i32,
}

const FULL: Interval = Interval {
    top: i32::MIN,
    bottom: i32::MAX,
};

/// Visible rows, half-open `[top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub top: i32,
    pub bottom: i32,
}

/// An accepted wall candidate: the projected row span plus the
/// per-endpoint scale and texture offsets the affine synthesizer
/// interpolates across it.
#[derive(Clone, Debug)]
pub struct Drawseg {
    pub h1: i32,
    pub h2: i32,
    /// Endpoint depth over focal length.
    pub lam1: Fixed,
    pub lam2: Fixed,
    /// Endpoint offsets along the wall, map units.
    pub tx1: Fixed,
    pub tx2: Fixed,
    pub texture: TextureId,
    /// Atlas half, from the wall's dominant axis.
    pub side: u8,
    pub linedef: LinedefId,
}

/// A visible row sub-range and the drawseg that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawrange {
    pub range: Range,
    pub drawseg: DrawsegId,
}

/// The per-frame tracker plus the drawseg/drawrange arenas it feeds.
pub struct OcclusionMap {
    intervals: SmallVec<[Interval; 16]>,
    drawsegs: Vec<Drawseg>,
    drawranges: Vec<Drawrange>,
}

impl Default for OcclusionMap {
    fn default() -> Self {
        let mut map = OcclusionMap {
            intervals: SmallVec::new(),
            drawsegs: Vec::new(),
            drawranges: Vec::new(),
        };
        map.reset();
        map
    }
}

impl OcclusionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the two boundary sentinels bracketing one open gap of
    /// the full screen height. Call at the top of every frame.
    pub fn reset(&mut self) {
        self.intervals.clear();
        self.intervals.push(Interval {
            top: i32::MIN,
            bottom: -1,
        });
        self.intervals.push(Interval {
            top: SCREEN_H as i32,
            bottom: i32::MAX,
        });
        self.drawsegs.clear();
        self.drawranges.clear();
    }

    /// True once the sentinels have merged: no further segment can be
    /// visible anywhere on screen.
    #[inline]
    pub fn fully_occluded(&self) -> bool {
        self.intervals[0] == FULL
    }

    /// Would any row of `[h1, h2)` survive occlusion? Lets callers skip
    /// drawseg construction for covered candidates.
    pub fn is_visible(&self, h1: i32, h2: i32) -> bool {
        if h1 == h2 {
            return false;
        }
        for pair in self.intervals.windows(2) {
            let b1 = pair[0].bottom;
            let t2 = pair[1].top;
            if h1 < t2 && h2 > b1 + 1 {
                return true;
            }
        }
        false
    }

    pub fn push_drawseg(&mut self, seg: Drawseg) -> DrawsegId {
        let id = self.drawsegs.len() as DrawsegId;
        self.drawsegs.push(seg);
        id
    }

    /// Carve the candidate span `[h1, h2)` out of the remaining gaps.
    ///
    /// Walking adjacent interval pairs, four cases apply against the
    /// gap between them; touching rows are contiguous (the ±1 in the
    /// comparisons), and a candidate spanning a whole gap keeps walking
    /// into the next one. `owner == None` covers rows without emitting
    /// (sight-blocking invisible walls).
    pub fn occlude(&mut self, h1: i32, h2: i32, owner: Option<DrawsegId>) {
        if h1 >= h2 {
            return;
        }

        let mut i = 0;
        while i + 1 < self.intervals.len() {
            let b1 = self.intervals[i].bottom;
            let t2 = self.intervals[i + 1].top;

            let h1_past_b1 = h1 <= b1 + 1;
            let h2_past_t2 = t2 <= h2;
            let h1_in_gap = b1 + 1 < h1 && h1 < t2;
            let h2_in_gap = b1 + 1 < h2 && h2 < t2;

            if h1_past_b1 && h2_past_t2 {
                // spans the whole gap: merge the bounding intervals and
                // keep walking, the candidate may reach further gaps
                self.intervals[i].bottom = self.intervals[i + 1].bottom;
                self.intervals.remove(i + 1);
                self.emit(b1 + 1, t2, owner);
                continue;
            } else if h1_in_gap && h2_in_gap {
                // strictly inside: split the gap in two
                self.intervals.insert(
                    i + 1,
                    Interval {
                        top: h1,
                        bottom: h2 - 1,
                    },
                );
                self.emit(h1, h2, owner);
                break;
            } else if h1_past_b1 && h2_in_gap {
                // touches the gap's upper boundary: extend it down
                self.intervals[i].bottom = h2 - 1;
                self.emit(b1 + 1, h2, owner);
                break;
            } else if h1_in_gap && h2_past_t2 {
                // touches the gap's lower boundary: extend it up
                self.intervals[i + 1].top = h1;
                self.emit(h1, t2, owner);
                break;
            }

            i += 1;
        }
    }

    fn emit(&mut self, top: i32, bottom: i32, owner: Option<DrawsegId>) {
        if let Some(drawseg) = owner {
            self.drawranges.push(Drawrange {
                range: Range { top, bottom },
                drawseg,
            });
        }
    }

    #[inline]
    pub fn drawseg(&self, id: DrawsegId) -> &Drawseg {
        &self.drawsegs[id as usize]
    }

    #[inline]
    pub fn drawranges(&self) -> &[Drawrange] {
        &self.drawranges
    }

    /// (gap count, drawseg count) for frame-trace logging.
    pub fn stats(&self) -> (usize, usize) {
        (self.intervals.len() - 1, self.drawsegs.len())
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/

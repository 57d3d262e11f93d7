//! Blank-interrupt delivery of the precomputed scanline parameters.
//!
//! Two interchangeable mechanisms, both driving the same output seam:
//!
//! * [`Delivery::per_line`]: the scanline handler reads the hardware's
//!   current-scanline counter and copies that entry's registers.
//! * [`Delivery::block`]: a block-copy engine armed at vertical blank
//!   fires on every scanline blank for the rest of the frame, stepping
//!   its source and reloading its destination each time.
//!
//! In the hosted model the "interrupts" are the `on_vblank` /
//! `on_hblank` entry points, invoked by whatever drives the frame.

use crate::display::AffineOut;
use crate::fixed::lut::SCREEN_H;

use super::buffer::FrameSwap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CopyKind {
    PerLine,
    Block,
}

/// Interrupt-side register delivery.
pub struct Delivery {
    kind: CopyKind,
    /// Block engine state: set at vblank, advanced per hblank.
    armed: bool,
    cursor: usize,
}

impl Delivery {
    pub fn per_line() -> Self {
        Delivery {
            kind: CopyKind::PerLine,
            armed: false,
            cursor: 0,
        }
    }

    pub fn block() -> Self {
        Delivery {
            kind: CopyKind::Block,
            armed: false,
            cursor: 0,
        }
    }

    /// Vertical-blank handler: stage the first scanline's registers and
    /// (block mode) re-arm the copy engine at the start of the buffer.
    pub fn on_vblank(&mut self, swap: &FrameSwap, out: &mut impl AffineOut) {
        let front = swap.front();
        out.set_backdrop(front.scroll());

        let (aff, win) = front.line(0);
        out.set_affine(aff);
        out.set_window(win);

        self.armed = true;
        self.cursor = 1;
    }

    /// Scanline-blank handler, fired in the gap after row `vcount` has
    /// been displayed: stage row `vcount + 1`. At the last visible row
    /// this reads the buffer's sentinel entry.
    pub fn on_hblank(&mut self, vcount: usize, swap: &FrameSwap, out: &mut impl AffineOut) {
        let line = match self.kind {
            CopyKind::PerLine => (vcount + 1).min(SCREEN_H),
            CopyKind::Block => {
                if !self.armed {
                    return;
                }
                let line = self.cursor.min(SCREEN_H);
                self.cursor += 1;
                line
            }
        };

        let (aff, win) = swap.front().line(line);
        out.set_affine(aff);
        out.set_window(win);
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::regs::{BgAffine, ScrollPair, WinH};

    /// Records every register write it sees.
    #[derive(Default)]
    struct Capture {
        affs: Vec<BgAffine>,
        wins: Vec<WinH>,
        scrolls: Vec<ScrollPair>,
    }

    impl AffineOut for Capture {
        fn set_affine(&mut self, aff: &BgAffine) {
            self.affs.push(*aff);
        }
        fn set_window(&mut self, win: WinH) {
            self.wins.push(win);
        }
        fn set_backdrop(&mut self, scroll: ScrollPair) {
            self.scrolls.push(scroll);
        }
    }

    fn committed_frame() -> FrameSwap {
        let mut swap = FrameSwap::new();
        let back = swap.back_mut();
        back.reset();
        for line in 0..SCREEN_H {
            let aff = BgAffine {
                pa: line as i16,
                ..BgAffine::IDENTITY
            };
            back.set_line(line, aff, WinH::pack(0, line as u8));
        }
        back.set_scroll(ScrollPair { h: 11, v: 22 });
        back.seal();
        swap.publish();
        swap
    }

    fn run_frame(delivery: &mut Delivery, swap: &FrameSwap) -> Capture {
        let mut out = Capture::default();
        delivery.on_vblank(swap, &mut out);
        for vcount in 0..SCREEN_H {
            delivery.on_hblank(vcount, swap, &mut out);
        }
        out
    }

    #[test]
    fn per_line_streams_every_row_in_order() {
        let swap = committed_frame();
        let out = run_frame(&mut Delivery::per_line(), &swap);

        assert_eq!(out.affs.len(), SCREEN_H + 1);
        for (line, aff) in out.affs[..SCREEN_H].iter().enumerate() {
            assert_eq!(aff.pa, line as i16);
        }
        // the extra write past the last row came from the sentinel
        assert_eq!(out.affs[SCREEN_H].pa, (SCREEN_H - 1) as i16);
        assert_eq!(out.scrolls, vec![ScrollPair { h: 11, v: 22 }]);
    }

    #[test]
    fn block_copy_matches_per_line_stream() {
        let swap = committed_frame();
        let a = run_frame(&mut Delivery::per_line(), &swap);
        let b = run_frame(&mut Delivery::block(), &swap);
        assert_eq!(a.affs, b.affs);
        assert_eq!(a.wins, b.wins);
    }

    #[test]
    fn block_copy_is_inert_until_armed() {
        let swap = committed_frame();
        let mut out = Capture::default();
        let mut delivery = Delivery::block();
        delivery.on_hblank(0, &swap, &mut out);
        assert!(out.affs.is_empty());
    }

    #[test]
    fn handlers_read_only_the_committed_buffer() {
        let mut swap = committed_frame();
        let mut delivery = Delivery::per_line();
        let mut out = Capture::default();
        delivery.on_vblank(&swap, &mut out);

        // main computation scribbles over the back buffer mid-frame
        for line in 0..SCREEN_H {
            let junk = BgAffine {
                pa: -1,
                ..BgAffine::IDENTITY
            };
            swap.back_mut().set_line(line, junk, WinH::CLOSED);
            delivery.on_hblank(line, &swap, &mut out);
        }

        for (line, aff) in out.affs[1..=SCREEN_H].iter().enumerate() {
            let want = (line + 1).min(SCREEN_H - 1);
            assert_eq!(aff.pa, want as i16, "handler saw torn data at {line}");
        }
    }
}

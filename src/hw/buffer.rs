//! The per-scanline parameter buffer and its double-buffered handoff.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fixed::lut::SCREEN_H;

use super::regs::{BgAffine, ScrollPair, WinH};

/// One frame's worth of per-scanline parameters, plus a sentinel entry:
/// the final scanline is duplicated so hardware reading one line ahead
/// at the last visible row never reads past the buffer.
#[derive(Clone, Debug)]
pub struct ScanlineBuffer {
    aff: [BgAffine; SCREEN_H + 1],
    winh: [WinH; SCREEN_H + 1],
    scroll: ScrollPair,
}

impl Default for ScanlineBuffer {
    fn default() -> Self {
        ScanlineBuffer {
            aff: [BgAffine::IDENTITY; SCREEN_H + 1],
            winh: [WinH::CLOSED; SCREEN_H + 1],
            scroll: ScrollPair::default(),
        }
    }
}

impl ScanlineBuffer {
    /// Closed windows and identity transforms everywhere; a frame that
    /// writes nothing shows only backdrop.
    pub fn reset(&mut self) {
        self.aff.fill(BgAffine::IDENTITY);
        self.winh.fill(WinH::CLOSED);
        self.scroll = ScrollPair::default();
    }

    #[inline]
    pub fn set_line(&mut self, row: usize, aff: BgAffine, win: WinH) {
        self.aff[row] = aff;
        self.winh[row] = win;
    }

    #[inline]
    pub fn line(&self, row: usize) -> (&BgAffine, WinH) {
        (&self.aff[row], self.winh[row])
    }

    #[inline]
    pub fn set_scroll(&mut self, scroll: ScrollPair) {
        self.scroll = scroll;
    }

    #[inline]
    pub fn scroll(&self) -> ScrollPair {
        self.scroll
    }

    /// Write the sentinel entry. Call once, after the last `set_line`
    /// of the frame.
    pub fn seal(&mut self) {
        self.aff[SCREEN_H] = self.aff[SCREEN_H - 1];
        self.winh[SCREEN_H] = self.winh[SCREEN_H - 1];
    }
}

/// Two-slot double buffer.
///
/// The main computation fills [`FrameSwap::back_mut`] during frame N
/// and calls [`FrameSwap::publish`] exactly once, at the
/// vertical-blank boundary. Interrupt-side readers resolve
/// [`FrameSwap::front`] per access and therefore only ever observe a
/// buffer that was fully written during frame N − 1.
pub struct FrameSwap {
    slots: [ScanlineBuffer; 2],
    front: AtomicUsize,
}

impl Default for FrameSwap {
    fn default() -> Self {
        FrameSwap {
            slots: [ScanlineBuffer::default(), ScanlineBuffer::default()],
            front: AtomicUsize::new(0),
        }
    }
}

impl FrameSwap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot being written this frame.
    #[inline]
    pub fn back_mut(&mut self) -> &mut ScanlineBuffer {
        let back = self.front.load(Ordering::Acquire) ^ 1;
        &mut self.slots[back]
    }

    /// The slot the delivery side reads.
    #[inline]
    pub fn front(&self) -> &ScanlineBuffer {
        &self.slots[self.front.load(Ordering::Acquire)]
    }

    /// Swap the slots. Must only be called at the vertical-blank
    /// boundary, never mid-frame.
    pub fn publish(&mut self) {
        let back = self.front.load(Ordering::Acquire) ^ 1;
        self.front.store(back, Ordering::Release);
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/

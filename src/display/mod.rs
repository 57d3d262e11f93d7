//! Hardware-facing output seam.
//!
//! *The rest of the crate never touches a pixel.* The delivery
//! pipeline writes register blocks through [`AffineOut`]; on target
//! these writes land in memory-mapped registers, in hosted builds
//! [`SimDisplay`] latches them and samples an atlas texture per
//! scanline the way the display unit would.

use crate::hw::{BgAffine, ScrollPair, WinH};

/// Register write seam of the affine background unit.
pub trait AffineOut {
    fn set_affine(&mut self, aff: &BgAffine);
    fn set_window(&mut self, win: WinH);
    fn set_backdrop(&mut self, scroll: ScrollPair);
}

pub mod software;

pub use software::{Atlas, SimDisplay};

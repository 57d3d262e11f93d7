mod buffer;
mod delivery;
mod regs;

pub use buffer::{FrameSwap, ScanlineBuffer};
pub use delivery::Delivery;
pub use regs::{BgAffine, ScrollPair, WinH};

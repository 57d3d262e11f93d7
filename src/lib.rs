//! rowcast – drives a 2D-affine background layer so that it shows a
//! first-person view of a tile-based map.
//!
//! The crate computes, once per frame and once per scanline, the scale,
//! rotation and offset registers a fixed hardware transform unit expects,
//! then hands them over at the blanking interrupts:
//!
//! * [`map`]     – immutable map arenas (vertices, walls, sectors, BSP
//!   nodes), the occupancy grid variant, and the camera pose.
//! * [`fixed`]   – scaled-integer arithmetic, binary angles and the
//!   lookup tables every projection step leans on.
//! * [`engine`]  – visibility ordering, occlusion tracking, projection
//!   and affine parameter synthesis.
//! * [`hw`]      – bit-exact register records, the per-scanline parameter
//!   buffer and its double-buffered, interrupt-synchronised delivery.
//! * [`display`] – the hardware-facing output seam plus a hosted
//!   software simulation of the affine display unit.

pub mod display;
pub mod engine;
pub mod fixed;
pub mod hw;
pub mod map;

mod affine;
mod bsp;
mod frame;
mod occlusion;
mod project;
mod raycast;

pub use affine::{AtlasGeo, synthesize, synthesize_ray, synthesize_row};
pub use bsp::{FrontToBack, Side, front_to_back, point_side};
pub use frame::FrameRenderer;
pub use occlusion::{Drawrange, Drawseg, DrawsegId, OcclusionMap, Range};
pub use project::project_linedef;
pub use raycast::{RayHit, cast};

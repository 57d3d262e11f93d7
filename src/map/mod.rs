mod camera;
mod geometry;
mod grid;
pub mod sample;

pub use geometry::{
    Linedef, LinedefFlags, LinedefId, MapData, MapError, Node, NodeChild, NodeId, Sector,
    SectorId, Sidedef, SidedefId, TextureId, Vertex, VertexId,
};

pub use camera::Camera;

pub use grid::{EMPTY, GridError, GridMap, INVISIBLE};

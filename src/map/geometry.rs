//! Immutable map arenas.
//!
//! All records live in plain vectors addressed by small integer ids;
//! nothing here holds a reference into anything else. The arenas are
//! built once by an external loader (or the fixtures in
//! [`crate::map::sample`]) and stay untouched for the whole session.

use bitflags::bitflags;

use crate::fixed::FxVec2;

pub type VertexId = u16;
pub type SidedefId = u16;
pub type LinedefId = u16;
pub type SectorId = u16;
pub type NodeId = u16;

/// Atlas page id; doubles as the occupancy-grid cell value for solid
/// cells (values below [`crate::map::INVISIBLE`] + 1 are reserved).
pub type TextureId = u16;

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: FxVec2,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LinedefFlags: u16 {
        /// Borders two sectors; a portal, never a solid wall.
        const TWO_SIDED = 0x0001;
        /// Blocks sight but draws nothing.
        const INVISIBLE = 0x0002;
    }
}

/*--------------------------- linedefs -------------------------------*/

/// A wall edge between two vertices. `front` always exists; `back` is
/// present only when the edge borders a second sector.
#[derive(Clone, Debug)]
pub struct Linedef {
    pub v1: VertexId,
    pub v2: VertexId,
    pub flags: LinedefFlags,
    pub front: SidedefId,
    pub back: Option<SidedefId>,
}

impl Linedef {
    /// Portals are skipped by the solid-wall pipeline.
    #[inline]
    pub fn is_portal(&self) -> bool {
        self.back.is_some() && self.flags.contains(LinedefFlags::TWO_SIDED)
    }
}

/*--------------------------- sidedefs -------------------------------*/

/// One face of a wall, owned by exactly one sector.
#[derive(Clone, Debug)]
pub struct Sidedef {
    pub sector: SectorId,
    pub texture: TextureId,
}

/*---------------------------- sectors -------------------------------*/

/// A convex map region bounded by an ordered run of linedefs.
#[derive(Clone, Debug)]
pub struct Sector {
    pub segs: Vec<LinedefId>,
    pub texture: TextureId,
}

/*----------------------------- nodes --------------------------------*/

/// Either side of a BSP split: a terminal sector or a child node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeChild {
    Sector(SectorId),
    Node(NodeId),
}

/// One BSP split: the edge `v1 → v2` plus a child per side.
#[derive(Clone, Debug)]
pub struct Node {
    pub v1: VertexId,
    pub v2: VertexId,
    pub front: NodeChild,
    pub back: NodeChild,
}

/*--------------------------- the arena ------------------------------*/

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no sectors")]
    NoSectors,

    #[error("linedef {linedef} references missing vertex {vertex}")]
    DanglingVertex { linedef: LinedefId, vertex: VertexId },

    #[error("linedef {linedef} references missing sidedef {sidedef}")]
    DanglingSidedef {
        linedef: LinedefId,
        sidedef: SidedefId,
    },

    #[error("linedef {0} has a back sidedef but no TWO_SIDED flag")]
    UnflaggedPortal(LinedefId),

    #[error("sidedef {sidedef} references missing sector {sector}")]
    DanglingSector { sidedef: SidedefId, sector: SectorId },

    #[error("sector {sector} references missing linedef {linedef}")]
    DanglingSegment { sector: SectorId, linedef: LinedefId },

    #[error("node {node} references a missing child")]
    DanglingChild { node: NodeId },
}

/// One loaded map: every arena plus the BSP root.
#[derive(Debug)]
pub struct MapData {
    pub vertices: Vec<Vertex>,
    pub sidedefs: Vec<Sidedef>,
    pub linedefs: Vec<Linedef>,
    pub sectors: Vec<Sector>,
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

impl MapData {
    #[inline]
    pub fn vertex(&self, id: VertexId) -> FxVec2 {
        self.vertices[id as usize].pos
    }

    /// Cross-check every id in the arenas. Run once after construction;
    /// the render loop indexes without further guards.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.sectors.is_empty() {
            return Err(MapError::NoSectors);
        }

        for (i, ld) in self.linedefs.iter().enumerate() {
            let linedef = i as LinedefId;
            for vertex in [ld.v1, ld.v2] {
                if vertex as usize >= self.vertices.len() {
                    return Err(MapError::DanglingVertex { linedef, vertex });
                }
            }
            for sidedef in std::iter::once(ld.front).chain(ld.back) {
                if sidedef as usize >= self.sidedefs.len() {
                    return Err(MapError::DanglingSidedef { linedef, sidedef });
                }
            }
            if ld.back.is_some() && !ld.flags.contains(LinedefFlags::TWO_SIDED) {
                return Err(MapError::UnflaggedPortal(linedef));
            }
        }

        for (i, sd) in self.sidedefs.iter().enumerate() {
            if sd.sector as usize >= self.sectors.len() {
                return Err(MapError::DanglingSector {
                    sidedef: i as SidedefId,
                    sector: sd.sector,
                });
            }
        }

        for (i, sec) in self.sectors.iter().enumerate() {
            for &linedef in &sec.segs {
                if linedef as usize >= self.linedefs.len() {
                    return Err(MapError::DanglingSegment {
                        sector: i as SectorId,
                        linedef,
                    });
                }
            }
        }

        let child_ok = |c: NodeChild| match c {
            NodeChild::Sector(s) => (s as usize) < self.sectors.len(),
            NodeChild::Node(n) => (n as usize) < self.nodes.len(),
        };
        for (i, node) in self.nodes.iter().enumerate() {
            let node_id = i as NodeId;
            if node.v1 as usize >= self.vertices.len() || node.v2 as usize >= self.vertices.len()
            {
                return Err(MapError::DanglingChild { node: node_id });
            }
            if !child_ok(node.front) || !child_ok(node.back) {
                return Err(MapError::DanglingChild { node: node_id });
            }
        }
        if !self.nodes.is_empty() && self.root as usize >= self.nodes.len() {
            return Err(MapError::DanglingChild { node: self.root });
        }

        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::sample;

    #[test]
    fn fixtures_validate() {
        sample::triangle_in_box().validate().unwrap();
        sample::split_square().validate().unwrap();
    }

    #[test]
    fn dangling_vertex_detected() {
        let mut map = sample::split_square();
        map.linedefs[0].v2 = 999;
        assert!(matches!(
            map.validate(),
            Err(MapError::DanglingVertex { vertex: 999, .. })
        ));
    }

    #[test]
    fn unflagged_portal_detected() {
        let mut map = sample::split_square();
        let portal = map
            .linedefs
            .iter()
            .position(|ld| ld.back.is_some())
            .unwrap();
        map.linedefs[portal].flags = LinedefFlags::empty();
        assert_eq!(
            map.validate(),
            Err(MapError::UnflaggedPortal(portal as LinedefId))
        );
    }

    #[test]
    fn portal_predicate() {
        let map = sample::split_square();
        assert!(map.linedefs.iter().any(|ld| ld.is_portal()));
        assert!(map.linedefs.iter().any(|ld| !ld.is_portal()));
    }
}

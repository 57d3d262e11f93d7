//! Statically-authored fixture maps for the demos and tests.
//!
//! These stand in for the external level loader; nothing here parses
//! anything.

use crate::fixed::FxVec2;

use super::geometry::{
    Linedef, LinedefFlags, MapData, Node, NodeChild, Sector, Sidedef, Vertex,
};
use super::grid::GridMap;

fn vertex(x: i32, y: i32) -> Vertex {
    Vertex {
        pos: FxVec2::from_ints(x, y),
    }
}

fn solid(v1: u16, v2: u16, front: u16) -> Linedef {
    Linedef {
        v1,
        v2,
        flags: LinedefFlags::empty(),
        front,
        back: None,
    }
}

fn portal(v1: u16, v2: u16, front: u16, back: u16) -> Linedef {
    Linedef {
        v1,
        v2,
        flags: LinedefFlags::TWO_SIDED,
        front,
        back: Some(back),
    }
}

/// Three sectors: a box split by an isoceles triangle into a large
/// right region and two smaller left regions, with portals between
/// them. Walls are wound clockwise around each sector's interior.
pub fn triangle_in_box() -> MapData {
    let vertices = vec![
        vertex(0, 200),     // 0  box north
        vertex(200, 0),     // 1  box east
        vertex(0, -200),    // 2  box south
        vertex(-200, 0),    // 3  box west
        vertex(-140, 40),   // 4  triangle base, upper
        vertex(-140, -40),  // 5  triangle base, lower
        vertex(-180, 0),    // 6  triangle apex
        vertex(-140, 60),   // 7  base split, upper
        vertex(-140, -60),  // 8  base split, lower
        vertex(-190, 10),   // 9  leg split
    ];

    let sidedefs: Vec<Sidedef> = (0..16)
        .map(|i| {
            let sector = match i {
                0..=6 => 0,
                7..=11 => 1,
                _ => 2,
            };
            Sidedef {
                sector,
                texture: 2 + sector,
            }
        })
        .collect();

    let linedefs = vec![
        solid(0, 1, 0),
        solid(1, 2, 1),
        solid(2, 8, 2),
        portal(8, 5, 3, 7),
        solid(5, 4, 4),
        portal(4, 7, 5, 14),
        solid(7, 0, 6),
        solid(8, 3, 8),
        solid(3, 9, 9),
        portal(9, 6, 10, 12),
        solid(6, 5, 11),
        solid(9, 7, 13),
        solid(4, 6, 15),
    ];

    let sectors = vec![
        Sector {
            segs: vec![0, 1, 2, 3, 4, 5, 6],
            texture: 2,
        },
        Sector {
            segs: vec![7, 8, 9, 10],
            texture: 3,
        },
        Sector {
            segs: vec![11, 12],
            texture: 4,
        },
    ];

    let nodes = vec![
        Node {
            v1: 5,
            v2: 4,
            front: NodeChild::Sector(0),
            back: NodeChild::Node(1),
        },
        Node {
            v1: 6,
            v2: 5,
            front: NodeChild::Sector(1),
            back: NodeChild::Sector(2),
        },
    ];

    MapData {
        vertices,
        sidedefs,
        linedefs,
        sectors,
        nodes,
        root: 0,
    }
}

/// A 200x200 room split into two sectors along the x axis by a portal.
/// Symmetric under mirroring across that axis, which the end-to-end
/// tests lean on.
pub fn split_square() -> MapData {
    let vertices = vec![
        vertex(100, 100),   // 0
        vertex(-100, 100),  // 1
        vertex(-100, -100), // 2
        vertex(100, -100),  // 3
        vertex(100, 0),     // 4
        vertex(-100, 0),    // 5
    ];

    let sidedefs: Vec<Sidedef> = (0..8)
        .map(|i| {
            let sector = if i < 4 { 0 } else { 1 };
            Sidedef {
                sector,
                texture: 2 + sector,
            }
        })
        .collect();

    let linedefs = vec![
        solid(1, 0, 0),     // north wall
        solid(0, 4, 1),     // east, upper half
        portal(4, 5, 2, 4), // the split
        solid(5, 1, 3),     // west, upper half
        solid(4, 3, 5),     // east, lower half
        solid(3, 2, 6),     // south wall
        solid(2, 5, 7),     // west, lower half
    ];

    let sectors = vec![
        Sector {
            segs: vec![0, 1, 2, 3],
            texture: 2,
        },
        Sector {
            segs: vec![4, 5, 6],
            texture: 3,
        },
    ];

    let nodes = vec![Node {
        v1: 4,
        v2: 5,
        front: NodeChild::Sector(0),
        back: NodeChild::Sector(1),
    }];

    MapData {
        vertices,
        sidedefs,
        linedefs,
        sectors,
        nodes,
        root: 0,
    }
}

/// 16x16 wall-bounded grid: perimeter of texture 2, a 2x2 block of
/// texture 3, one lone pillar of texture 4 and one invisible blocker.
pub fn walled_grid() -> GridMap {
    const W: i32 = 16;
    const H: i32 = 16;
    let mut cells = vec![super::grid::EMPTY; (W * H) as usize];
    let mut set = |x: i32, y: i32, v: u8| cells[(y * W + x) as usize] = v;

    for x in 0..W {
        set(x, 0, 2);
        set(x, H - 1, 2);
    }
    for y in 0..H {
        set(0, y, 2);
        set(W - 1, y, 2);
    }

    set(4, 4, 3);
    set(5, 4, 3);
    set(4, 5, 3);
    set(5, 5, 3);
    set(10, 8, 4);
    set(8, 12, super::grid::INVISIBLE);

    GridMap::new(W, H, cells).expect("fixture grid is authored closed")
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fixture_is_closed() {
        let g = walled_grid();
        assert_eq!(g.width(), 16);
        assert_eq!(g.cell(0, 7), Some(2));
        assert_eq!(g.cell(8, 12), Some(super::super::grid::INVISIBLE));
    }
}

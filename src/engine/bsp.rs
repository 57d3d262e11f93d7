//! Front-to-back sector ordering.
//!
//! Pure ordering: nothing here draws. The traversal decides the
//! processing order of wall segments fed to the occlusion tracker,
//! which is what makes the tracker's early exit correct.

use crate::fixed::FxVec2;
use crate::map::{MapData, NodeChild, SectorId};

/// Which side of a splitting edge a point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// Classify `p` against the directed edge `v1 → v2` by the sign of the
/// 2D cross product `(p - v1) × (v2 - v1)`, computed in full width so
/// map-scale coordinates cannot overflow.
///
/// A point exactly on the edge counts as front; for ordering purposes
/// either side would do, this just fixes the tie.
pub fn point_side(p: FxVec2, v1: FxVec2, v2: FxVec2) -> Side {
    let t = p - v1;
    let d = v2 - v1;
    let cross = (t.x.to_bits() as i64) * (d.y.to_bits() as i64)
        - (t.y.to_bits() as i64) * (d.x.to_bits() as i64);
    if cross >= 0 { Side::Front } else { Side::Back }
}

/// Lazy front-to-back traversal. Pumping the iterator descends the
/// tree with an explicit stack, near side before far side, so callers
/// that stop early (screen fully occluded) never touch the far
/// subtrees at all.
pub struct FrontToBack<'a> {
    map: &'a MapData,
    p: FxVec2,
    stack: Vec<NodeChild>,
}

/// Order every sector of `map` front to back as seen from `p`.
pub fn front_to_back(map: &MapData, p: FxVec2) -> FrontToBack<'_> {
    let mut stack = Vec::with_capacity(map.nodes.len() + 1);
    if map.nodes.is_empty() {
        // a map with no splits: arena order is the only order
        for s in (0..map.sectors.len() as u16).rev() {
            stack.push(NodeChild::Sector(s));
        }
    } else {
        stack.push(NodeChild::Node(map.root));
    }
    FrontToBack { map, p, stack }
}

impl Iterator for FrontToBack<'_> {
    type Item = SectorId;

    fn next(&mut self) -> Option<SectorId> {
        while let Some(child) = self.stack.pop() {
            match child {
                NodeChild::Sector(s) => return Some(s),
                NodeChild::Node(n) => {
                    let node = &self.map.nodes[n as usize];
                    let side = point_side(
                        self.p,
                        self.map.vertex(node.v1),
                        self.map.vertex(node.v2),
                    );
                    let (near, far) = match side {
                        Side::Front => (node.front, node.back),
                        Side::Back => (node.back, node.front),
                    };
                    self.stack.push(far);
                    self.stack.push(near);
                }
            }
        }
        None
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::sample;

    fn order_from(map: &MapData, x: i32, y: i32) -> Vec<SectorId> {
        front_to_back(map, FxVec2::from_ints(x, y)).collect()
    }

    #[test]
    fn every_sector_exactly_once() {
        let map = sample::triangle_in_box();
        for (x, y) in [(-20, 30), (-170, -20), (-160, 20), (150, 0), (0, -150)] {
            let mut order = order_from(&map, x, y);
            assert_eq!(order.len(), map.sectors.len(), "camera at ({x},{y})");
            order.sort_unstable();
            order.dedup();
            assert_eq!(order.len(), map.sectors.len(), "camera at ({x},{y})");
        }
    }

    #[test]
    fn first_sector_contains_the_camera() {
        let map = sample::triangle_in_box();
        // interior points of sectors 0, 1, 2
        assert_eq!(order_from(&map, -20, 30)[0], 0);
        assert_eq!(order_from(&map, -170, -20)[0], 1);
        assert_eq!(order_from(&map, -160, 20)[0], 2);

        let square = sample::split_square();
        assert_eq!(order_from(&square, 0, 50)[0], 0);
        assert_eq!(order_from(&square, 0, -50)[0], 1);
    }

    #[test]
    fn on_edge_ties_to_front() {
        let square = sample::split_square();
        // camera exactly on the splitting edge
        assert_eq!(order_from(&square, 0, 0), vec![0, 1]);
    }

    #[test]
    fn point_side_matches_geometry() {
        let v1 = FxVec2::from_ints(0, 0);
        let v2 = FxVec2::from_ints(0, 10);
        // edge points +y, front is the +x side
        assert_eq!(point_side(FxVec2::from_ints(5, 3), v1, v2), Side::Front);
        assert_eq!(point_side(FxVec2::from_ints(-5, 3), v1, v2), Side::Back);
        assert_eq!(point_side(FxVec2::from_ints(0, 7), v1, v2), Side::Front);
    }

    #[test]
    fn splitless_map_emits_arena_order() {
        let mut map = sample::split_square();
        map.nodes.clear();
        assert_eq!(order_from(&map, 0, 50), vec![0, 1]);
    }
}

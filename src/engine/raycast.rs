//! Per-scanline DDA raycasting against the occupancy grid.
//!
//! One ray per screen row, stepped cell by cell: two distance
//! accumulators, one per grid axis, and whichever is smaller advances.
//! The axis that was stepped to reach the hit cell distinguishes the
//! two wall orientations and picks the texture-atlas half downstream.

use crate::fixed::Fixed;
use crate::fixed::lut::SCREEN_H;
use crate::map::{Camera, EMPTY, GridMap, INVISIBLE};

/// Result of one scanline's cast.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Perpendicular distance to the hit face, never below the minimum
    /// quantum.
    pub dist: Fixed,
    /// The hit cell's value (always a textured wall, `>= 2`).
    pub texture: u8,
    /// 0: the face runs along x; 1: along y.
    pub side: u8,
    /// Hit coordinate along the face's axis, map units.
    pub wall_offset: Fixed,
    /// The ray sees the back of the texture wrap point.
    pub wrap: bool,
}

/// Cast the ray for screen row `row`. `None` when the scanline shows
/// nothing: the ray ended in an invisible wall, or (diagnostic-build
/// assertion) escaped the grid.
///
/// On a wall-bounded grid the walk terminates within
/// `width + height` steps; an escape is a map-authoring violation, not
/// a runtime error.
pub fn cast(grid: &GridMap, cam: &Camera, row: usize) -> Option<RayHit> {
    // scanline's position within the fan: -1 at row 0, +1 past the end
    let x_c =
        Fixed::from_int(2 * row as i32).safe_div(Fixed::from_int(SCREEN_H as i32)) - Fixed::ONE;
    let fan = cam.fov.mul(x_c);

    // degenerate components are forced to the positive quantum before
    // any of the divisions below
    let ray_x = (cam.yaw.cos() + cam.yaw.sin().mul(fan)).at_least_epsilon();
    let ray_y = (cam.yaw.sin() - cam.yaw.cos().mul(fan)).at_least_epsilon();

    let mut map_x = cam.pos.x.to_int();
    let mut map_y = cam.pos.y.to_int();

    let delta_x = Fixed::ONE.safe_div(ray_x).abs();
    let delta_y = Fixed::ONE.safe_div(ray_y).abs();

    let (step_x, mut dist_x) = if ray_x.to_bits() < 0 {
        (-1, (cam.pos.x - Fixed::from_int(map_x)).mul(delta_x))
    } else {
        (1, (Fixed::from_int(map_x + 1) - cam.pos.x).mul(delta_x))
    };
    let (step_y, mut dist_y) = if ray_y.to_bits() < 0 {
        (-1, (cam.pos.y - Fixed::from_int(map_y)).mul(delta_y))
    } else {
        (1, (Fixed::from_int(map_y + 1) - cam.pos.y).mul(delta_y))
    };

    let max_steps = (grid.width() + grid.height()) as usize;
    for _ in 0..max_steps {
        let side;
        if dist_x < dist_y {
            dist_x = dist_x + delta_x;
            map_x += step_x;
            side = 1;
        } else {
            dist_y = dist_y + delta_y;
            map_y += step_y;
            side = 0;
        }

        let Some(cell) = grid.cell(map_x, map_y) else {
            debug_assert!(false, "ray escaped the grid at ({map_x}, {map_y})");
            return None;
        };
        if cell == EMPTY {
            continue;
        }
        if cell == INVISIBLE {
            return None;
        }

        // perpendicular distance to the crossed cell boundary
        let dist = if side == 1 {
            let back = if step_x > 0 { Fixed::ZERO } else { Fixed::ONE };
            (Fixed::from_int(map_x) - cam.pos.x + back).safe_div(ray_x)
        } else {
            let back = if step_y > 0 { Fixed::ZERO } else { Fixed::ONE };
            (Fixed::from_int(map_y) - cam.pos.y + back).safe_div(ray_y)
        }
        .at_least_epsilon();

        // hit coordinate along the face, and whether this viewing
        // direction sees the back of the texture wrap point
        let (wall_offset, wrap) = if side == 0 {
            (cam.pos.x + dist.mul(ray_x), ray_y.to_bits() > 0)
        } else {
            (cam.pos.y + dist.mul(ray_y), ray_x.to_bits() < 0)
        };

        return Some(RayHit {
            dist,
            texture: cell,
            side,
            wall_offset,
            wrap,
        });
    }

    debug_assert!(false, "raycast failed to terminate on a bounded grid");
    None
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/

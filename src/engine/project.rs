//! Analytic per-segment screen projection.
//!
//! Maps a linedef's endpoints to view angles relative to the camera,
//! rejects back-facing and out-of-fan segments, then turns the
//! surviving angles into a screen-row span through the clamped
//! angle→row table. Depth is carried per endpoint as distance over
//! focal length; the affine synthesizer interpolates between the two.

use crate::engine::occlusion::Drawseg;
use crate::fixed::angle::{point_distance, point_to_angle};
use crate::fixed::lut::{FOCAL, viewangle_to_row};
use crate::fixed::{Angle, Fixed};
use crate::map::{Camera, LinedefId, MapData};

/// Project one linedef against the camera.
///
/// `None` for portals, back-facing or zero-width segments, and
/// segments entirely outside the horizontal field of view. The
/// returned span may still be fully occluded; that is the tracker's
/// call, not ours.
pub fn project_linedef(map: &MapData, cam: &Camera, id: LinedefId) -> Option<Drawseg> {
    let ld = &map.linedefs[id as usize];
    if ld.is_portal() {
        return None;
    }

    let p1 = map.vertex(ld.v1);
    let p2 = map.vertex(ld.v2);
    let r1 = p1 - cam.pos;
    let r2 = p2 - cam.pos;

    let ang1 = point_to_angle(r1.x, r1.y) - cam.yaw;
    let ang2 = point_to_angle(r2.x, r2.y) - cam.yaw;
    let a1 = ang1.signed();
    let a2 = ang2.signed();

    // walls are wound clockwise around their sector; seen from the
    // front the angles strictly decrease
    if a2 >= a1 {
        return None;
    }

    let quarter = Angle::QUARTER.bam() as i32;
    if a1.abs() >= quarter && a2.abs() >= quarter {
        return None;
    }

    let h1 = viewangle_to_row(ang1);
    let h2 = viewangle_to_row(ang2);

    let focal = Fixed::from_int(FOCAL);
    let lam1 = point_distance(r1.x, r1.y).at_least_epsilon().safe_div(focal);
    let lam2 = point_distance(r2.x, r2.y).at_least_epsilon().safe_div(focal);

    // texture offsets run from v1 along the wall; the dominant axis of
    // the wall picks the atlas half
    let d = p2 - p1;
    let side = if d.x.abs() >= d.y.abs() { 0 } else { 1 };

    Some(Drawseg {
        h1,
        h2,
        lam1,
        lam2,
        tx1: Fixed::ZERO,
        tx2: point_distance(d.x, d.y),
        texture: map.sidedefs[ld.front as usize].texture,
        side,
        linedef: id,
    })
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FxVec2;
    use crate::fixed::lut::{SCREEN_H, VIEW_TOP};
    use crate::map::sample;
    use glam::Vec2;

    fn cam_at(x: i32, y: i32, yaw_deg: f32) -> Camera {
        Camera::new(FxVec2::from_ints(x, y), Angle::from_degrees(yaw_deg))
    }

    #[test]
    fn portal_is_never_projected() {
        let map = sample::split_square();
        let cam = cam_at(-60, 0, 0.0);
        let portal = map
            .linedefs
            .iter()
            .position(|ld| ld.is_portal())
            .unwrap() as LinedefId;
        assert!(project_linedef(&map, &cam, portal).is_none());
    }

    #[test]
    fn back_facing_wall_rejected() {
        let map = sample::split_square();
        // outside the room looking down at the north wall's back: the
        // endpoint angles come out reversed
        let cam = cam_at(0, 150, -90.0);
        assert!(project_linedef(&map, &cam, 0).is_none());
    }

    #[test]
    fn wall_behind_the_camera_rejected() {
        let map = sample::split_square();
        // facing east; the west lower wall is front-facing but both
        // endpoints sit beyond 90 degrees off centre
        let cam = cam_at(-60, 10, 0.0);
        assert!(project_linedef(&map, &cam, 6).is_none());
    }

    #[test]
    fn facing_wall_spans_the_centre() {
        let map = sample::split_square();
        let cam = cam_at(-60, 0, 0.0);
        // east upper wall runs from (100,100) down to (100,0)
        let seg = project_linedef(&map, &cam, 1).expect("facing wall visible");
        assert!(seg.h1 < seg.h2);
        assert_eq!(seg.h2, VIEW_TOP, "wall ends at the view centre row");
        assert!(seg.h1 > 0 && seg.h1 < VIEW_TOP);

        // mirrored lower wall covers the mirrored rows
        let lower = project_linedef(&map, &cam, 4).expect("mirror wall visible");
        assert_eq!(lower.h1, VIEW_TOP);
        assert_eq!(lower.h2, SCREEN_H as i32 - seg.h1);
    }

    #[test]
    fn depth_matches_float_oracle() {
        let map = sample::split_square();
        let cam = cam_at(-60, 0, 0.0);
        let seg = project_linedef(&map, &cam, 1).unwrap();

        let v1 = Vec2::new(100.0, 100.0);
        let eye = Vec2::new(-60.0, 0.0);
        let want = (v1 - eye).length() / FOCAL as f32;
        assert!(
            (seg.lam1.to_f32() - want).abs() / want < 0.02,
            "lam1 {} oracle {want}",
            seg.lam1
        );

        let wall_len = 100.0;
        assert!((seg.tx2.to_f32() - wall_len).abs() / wall_len < 0.02);
    }

    #[test]
    fn grazing_endpoint_does_not_fault() {
        let map = sample::split_square();
        // standing on the east wall's line: v2 of linedef 1 dead ahead
        let cam = cam_at(100, 50, -90.0);
        // either rejected or projected with saturated depth, never a panic
        if let Some(seg) = project_linedef(&map, &cam, 1) {
            assert!(seg.lam1.to_bits() > 0);
            assert!(seg.lam2.to_bits() > 0);
        }
    }
}

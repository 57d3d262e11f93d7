//! Hosted simulation of the affine display unit.
//!
//! [`SimDisplay`] holds the latched register state and, once per
//! scanline, applies the committed matrix to an atlas texture into an
//! RGB framebuffer: inside the window each output pixel samples the
//! atlas at `dx + pa·x`, outside it the scrolled backdrop shows
//! through. The demos hand the finished frame to a window.

use crate::engine::AtlasGeo;
use crate::fixed::lut::{SCREEN_H, SCREEN_W};
use crate::hw::{BgAffine, ScrollPair, WinH};

use super::AffineOut;

fn dim(c: u32) -> u32 {
    (c >> 1) & 0x7F7F7F
}

/// Procedural wall texture atlas: one strip of `pixels_per_cell` rows
/// per page, each strip a checkerboard in the page's hue, the right
/// half pre-shaded for the second wall orientation.
pub struct Atlas {
    geo: AtlasGeo,
    w: usize,
    h: usize,
    pixels: Vec<u32>,
}

impl Atlas {
    pub fn checkered(pixels_per_cell: usize, pages: usize) -> Self {
        const HUES: [u32; 6] = [
            0x4F6FBF, 0xBF6F4F, 0x5FAF5F, 0xAF5FAF, 0xAFA75F, 0x5FA7AF,
        ];

        let w = 2 * pixels_per_cell;
        let h = pages * pixels_per_cell;
        let mut pixels = vec![0u32; w * h];
        for page in 0..pages {
            let hue = HUES[page % HUES.len()];
            for y in 0..pixels_per_cell {
                for x in 0..w {
                    let cell_x = x % pixels_per_cell;
                    let mut c = if ((cell_x / 8) ^ (y / 8)) & 1 == 0 {
                        hue
                    } else {
                        dim(hue)
                    };
                    if x >= pixels_per_cell {
                        c = dim(c);
                    }
                    pixels[(page * pixels_per_cell + y) * w + x] = c;
                }
            }
        }

        Atlas {
            geo: AtlasGeo {
                pixels_per_cell: pixels_per_cell as i32,
                pages: pages as i32,
            },
            w,
            h,
            pixels,
        }
    }

    pub fn geo(&self) -> AtlasGeo {
        self.geo
    }

    /// Wrapping texel fetch, like the hardware's repeated background.
    fn sample(&self, u: i32, v: i32) -> u32 {
        let x = u.rem_euclid(self.w as i32) as usize;
        let y = v.rem_euclid(self.h as i32) as usize;
        self.pixels[y * self.w + x]
    }
}

/// Latched register state plus the output framebuffer.
pub struct SimDisplay {
    atlas: Atlas,
    aff: BgAffine,
    win: WinH,
    scroll: ScrollPair,
    frame: Vec<u32>,
}

impl AffineOut for SimDisplay {
    fn set_affine(&mut self, aff: &BgAffine) {
        self.aff = *aff;
    }

    fn set_window(&mut self, win: WinH) {
        self.win = win;
    }

    fn set_backdrop(&mut self, scroll: ScrollPair) {
        self.scroll = scroll;
    }
}

impl SimDisplay {
    pub fn new(atlas: Atlas) -> Self {
        SimDisplay {
            atlas,
            aff: BgAffine::IDENTITY,
            win: WinH::CLOSED,
            scroll: ScrollPair::default(),
            frame: vec![0; SCREEN_W * SCREEN_H],
        }
    }

    pub const fn width(&self) -> usize {
        SCREEN_W
    }

    pub const fn height(&self) -> usize {
        SCREEN_H
    }

    /// Draw one scanline with the currently latched registers.
    pub fn scanline(&mut self, row: usize) {
        for x in 0..SCREEN_W {
            let px = if self.win.contains(x) {
                // q24.8 translation plus the 8.8 step, down to texels
                let u = (self.aff.dx + self.aff.pa as i32 * x as i32) >> 8;
                let v = (self.aff.dy + self.aff.pc as i32 * x as i32) >> 8;
                self.atlas.sample(u, v)
            } else {
                self.backdrop(x, row)
            };
            self.frame[row * SCREEN_W + x] = px;
        }
    }

    /// The scrolled backdrop layer: a coarse two-tone sky.
    fn backdrop(&self, x: usize, row: usize) -> u32 {
        let u = (row as u16).wrapping_add(self.scroll.h) as u32;
        let v = (x as u16).wrapping_add(self.scroll.v) as u32;
        if ((u / 32) + (v / 32)) & 1 == 0 {
            0x1F2F4F
        } else {
            0x17273F
        }
    }

    /// The finished frame, `SCREEN_H` rows of `SCREEN_W` pixels.
    pub fn frame(&self) -> &[u32] {
        &self.frame
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_halves_differ_in_shade() {
        let atlas = Atlas::checkered(64, 2);
        let plain = atlas.sample(0, 0);
        let shaded = atlas.sample(64, 0);
        assert_eq!(shaded, dim(plain));
    }

    #[test]
    fn atlas_sampling_wraps() {
        let atlas = Atlas::checkered(64, 2);
        assert_eq!(atlas.sample(0, 0), atlas.sample(128, 128));
        assert_eq!(atlas.sample(-1, 0), atlas.sample(127, 0));
    }

    #[test]
    fn scanline_applies_the_latched_matrix() {
        let atlas = Atlas::checkered(64, 1);
        let expect = atlas.sample(3, 5);
        let mut disp = SimDisplay::new(atlas);

        disp.set_affine(&BgAffine {
            pa: 0x100,
            pb: 0,
            pc: 0,
            pd: 0,
            dx: 3 << 8,
            dy: 5 << 8,
        });
        disp.set_window(WinH::pack(0, SCREEN_W as u8));
        disp.scanline(0);

        // pixel 0 samples (dx, dy); pixel 1 one texel further
        assert_eq!(disp.frame()[0], expect);
        let step = disp.atlas.sample(4, 5);
        assert_eq!(disp.frame()[1], step);
    }

    #[test]
    fn closed_window_shows_only_backdrop() {
        let atlas = Atlas::checkered(64, 1);
        let mut disp = SimDisplay::new(atlas);
        disp.set_window(WinH::CLOSED);
        disp.scanline(7);

        let row = &disp.frame()[7 * SCREEN_W..8 * SCREEN_W];
        assert!(row.iter().all(|&c| c == 0x1F2F4F || c == 0x17273F));
    }

    #[test]
    fn backdrop_scroll_moves_the_pattern() {
        let atlas = Atlas::checkered(64, 1);
        let mut disp = SimDisplay::new(atlas);
        disp.set_window(WinH::CLOSED);
        disp.scanline(0);
        let before = disp.frame()[0];

        disp.set_backdrop(ScrollPair { h: 32, v: 0 });
        disp.scanline(0);
        assert_ne!(disp.frame()[0], before);
    }
}

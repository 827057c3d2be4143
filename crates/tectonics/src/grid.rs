//! Hex grid addressing.
//!
//! Tiles are laid out in an odd-q offset layout: odd columns sit half a hex lower than even
//! ones. The horizontal axis wraps (the map is a cylinder); the vertical axis does not.

use crate::constants::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexGrid {
    pub width: u32,
    pub height: u32,
}

/// A present neighbour of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexNeighbor {
    pub x: u32,
    pub y: u32,
    pub index: usize,
}

impl HexGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Neighbours of `(x, y)` in offset-table order.
    ///
    /// x wraps modulo width; rows outside `[0, height)` are skipped, so edge rows yield fewer
    /// than six neighbours.
    pub fn neighbors(&self, x: u32, y: u32) -> impl Iterator<Item = HexNeighbor> + '_ {
        let offsets = if x & 1 == 1 {
            &ODD_COL_OFFSETS
        } else {
            &EVEN_COL_OFFSETS
        };
        let w = self.width as i64;
        let h = self.height as i64;
        offsets.iter().filter_map(move |&(dx, dy)| {
            let ny = y as i64 + dy as i64;
            if ny < 0 || ny >= h {
                return None;
            }
            let nx = (x as i64 + dx as i64).rem_euclid(w);
            Some(HexNeighbor {
                x: nx as u32,
                y: ny as u32,
                index: (ny * w + nx) as usize,
            })
        })
    }

    #[inline]
    pub fn neighbors_of(&self, index: usize) -> impl Iterator<Item = HexNeighbor> + '_ {
        let (x, y) = self.coords(index);
        self.neighbors(x, y)
    }

    /// Width of the wrapped map in projected hex space.
    #[inline]
    pub fn wrap_width_px(&self) -> f32 {
        self.width as f32 * HEX_WIDTH
    }

    /// Squared distance between two grid-space points measured in hex space, wrapping on x.
    pub fn wrapped_distance_sq(&self, a: Vec2, b: Vec2) -> f32 {
        wrapped_hex_distance_sq(project_to_hex(a), project_to_hex(b), self.wrap_width_px())
    }
}

/// Map a grid-space position to projected hex space.
pub fn project_to_hex(p: Vec2) -> Vec2 {
    let column_offset = if (p.x.floor() as i64) & 1 == 1 {
        HALF_HEX_HEIGHT
    } else {
        0.0
    };
    Vec2::new(p.x * HEX_WIDTH, p.y * HEX_HEIGHT + column_offset)
}

/// Squared distance in hex space with the x axis wrapping at `wrap_width`.
pub fn wrapped_hex_distance_sq(a: Vec2, b: Vec2, wrap_width: f32) -> f32 {
    let raw_dx = (a.x - b.x).abs();
    let dx = raw_dx.min(wrap_width - raw_dx);
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

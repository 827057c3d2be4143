use crate::grid::HexGrid;
use std::collections::VecDeque;

/// Distance of tiles the propagation never reached.
pub const UNREACHED: u32 = u32::MAX;

/// Hop distance to the nearest source, and which source that is.
#[derive(Debug, Clone)]
pub struct DistanceField {
    pub distance: Vec<u32>,
    /// Index of the source tile each reached tile inherits from; `None` when unreached.
    pub nearest_source: Vec<Option<usize>>,
}

impl DistanceField {
    /// Multi-source breadth-first propagation along hex adjacency.
    ///
    /// All sources start at distance 0 in row-major order. Tiles at `max_distance` are reached
    /// but not expanded. A tile is claimed by the first frontier tile that discovers it, which
    /// under strict level order is a nearest source, ties going to the earlier discovery.
    pub fn propagate(grid: &HexGrid, is_source: &[bool], max_distance: u32) -> Self {
        let mut distance = vec![UNREACHED; grid.len()];
        let mut nearest_source = vec![None; grid.len()];
        let mut queue = VecDeque::new();

        for (i, _) in is_source.iter().enumerate().filter(|(_, s)| **s) {
            distance[i] = 0;
            nearest_source[i] = Some(i);
            queue.push_back(i);
        }

        while let Some(i) = queue.pop_front() {
            let d = distance[i];
            if d >= max_distance {
                continue;
            }
            for n in grid.neighbors_of(i) {
                if distance[n.index] > d + 1 {
                    distance[n.index] = d + 1;
                    nearest_source[n.index] = nearest_source[i];
                    queue.push_back(n.index);
                }
            }
        }

        Self {
            distance,
            nearest_source,
        }
    }
}

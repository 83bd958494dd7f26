//! Grid geometry and neighbor enumeration
//!
//! Pixels are addressed by linear index (`y * width + x`). Neighbor
//! enumeration carries a discretized travel direction in degrees, used by
//! direction-sensitive cost rules: 270 for horizontal steps, 180 for
//! vertical, 225 for the NW/SE diagonal and 135 for the NE/SW diagonal.

/// Travel direction of a horizontal step, in degrees
pub const DIRECTION_HORIZONTAL: f32 = 270.0;
/// Travel direction of a vertical step, in degrees
pub const DIRECTION_VERTICAL: f32 = 180.0;
/// Travel direction of a NW/SE diagonal step, in degrees
pub const DIRECTION_DIAGONAL_MAIN: f32 = 225.0;
/// Travel direction of a NE/SW diagonal step, in degrees
pub const DIRECTION_DIAGONAL_ANTI: f32 = 135.0;

/// Pixel position in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Column index
    pub x: u32,
    /// Row index
    pub y: u32,
}

impl GridPoint {
    /// Create a point from column and row indices
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Neighborhood structure used during propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge-sharing neighbors only
    Four,
    /// Edge- and corner-sharing neighbors
    Eight,
}

/// Dimensions of the pixel lattice with index arithmetic helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    width: usize,
    height: usize,
}

/// Neighbors of one pixel, paired with discretized travel directions
///
/// Fixed-capacity to keep the propagation hot loop allocation-free.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    entries: [(usize, f32); 8],
    count: usize,
}

impl Neighbors {
    /// View the populated `(index, direction)` pairs
    pub fn as_slice(&self) -> &[(usize, f32)] {
        self.entries.get(..self.count).unwrap_or(&[])
    }

    fn push(&mut self, index: usize, direction: f32) {
        if let Some(entry) = self.entries.get_mut(self.count) {
            *entry = (index, direction);
            self.count += 1;
        }
    }
}

impl GridGeometry {
    /// Create a geometry for a `width * height` lattice
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Linear index of a point
    pub const fn index_of(&self, point: GridPoint) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Point at a linear index
    pub const fn point_of(&self, index: usize) -> GridPoint {
        GridPoint {
            x: (index % self.width) as u32,
            y: (index / self.width) as u32,
        }
    }

    /// Check that a point lies inside the lattice
    pub const fn contains(&self, point: GridPoint) -> bool {
        (point.x as usize) < self.width && (point.y as usize) < self.height
    }

    /// Enumerate the in-bounds neighbors of a pixel
    ///
    /// Axis neighbors come first, diagonals only in eight-connected mode.
    pub fn neighbors(&self, index: usize, connectivity: Connectivity) -> Neighbors {
        let mut out = Neighbors {
            entries: [(0, 0.0); 8],
            count: 0,
        };
        let width = self.width;
        let area = self.area();

        let at_left = index % width == 0;
        let at_right = (index + 1) % width == 0;
        let at_top = index < width;
        let at_bottom = index >= area.saturating_sub(width);

        if !at_left {
            out.push(index - 1, DIRECTION_HORIZONTAL);
        }
        if !at_right {
            out.push(index + 1, DIRECTION_HORIZONTAL);
        }
        if !at_top {
            out.push(index - width, DIRECTION_VERTICAL);
        }
        if !at_bottom {
            out.push(index + width, DIRECTION_VERTICAL);
        }
        if connectivity == Connectivity::Eight {
            if !at_top && !at_left {
                out.push(index - width - 1, DIRECTION_DIAGONAL_MAIN);
            }
            if !at_top && !at_right {
                out.push(index - width + 1, DIRECTION_DIAGONAL_ANTI);
            }
            if !at_bottom && !at_left {
                out.push(index + width - 1, DIRECTION_DIAGONAL_ANTI);
            }
            if !at_bottom && !at_right {
                out.push(index + width + 1, DIRECTION_DIAGONAL_MAIN);
            }
        }

        out
    }

    /// Test whether two pixels are grid-adjacent under a connectivity mode
    pub const fn adjacent(&self, a: usize, b: usize, connectivity: Connectivity) -> bool {
        let pa = self.point_of(a);
        let pb = self.point_of(b);
        let dx = (pa.x as i64 - pb.x as i64).unsigned_abs();
        let dy = (pa.y as i64 - pb.y as i64).unsigned_abs();
        match connectivity {
            Connectivity::Four => dx + dy == 1,
            Connectivity::Eight => dx <= 1 && dy <= 1 && dx + dy > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Connectivity, GridGeometry, GridPoint};

    #[test]
    fn index_point_round_trip() {
        let geometry = GridGeometry::new(7, 5);
        let point = GridPoint::new(3, 4);
        assert_eq!(geometry.point_of(geometry.index_of(point)), point);
    }

    #[test]
    fn corner_has_two_axis_neighbors() {
        let geometry = GridGeometry::new(4, 4);
        let neighbors = geometry.neighbors(0, Connectivity::Four);
        assert_eq!(neighbors.as_slice().len(), 2);
        let neighbors = geometry.neighbors(0, Connectivity::Eight);
        assert_eq!(neighbors.as_slice().len(), 3);
    }

    #[test]
    fn interior_pixel_has_full_neighborhood() {
        let geometry = GridGeometry::new(5, 5);
        let center = geometry.index_of(GridPoint::new(2, 2));
        assert_eq!(geometry.neighbors(center, Connectivity::Four).as_slice().len(), 4);
        assert_eq!(geometry.neighbors(center, Connectivity::Eight).as_slice().len(), 8);
    }

    #[test]
    fn neighbors_are_adjacent() {
        let geometry = GridGeometry::new(6, 3);
        for index in 0..geometry.area() {
            for &(neighbor, _) in geometry.neighbors(index, Connectivity::Eight).as_slice() {
                assert!(geometry.adjacent(index, neighbor, Connectivity::Eight));
            }
        }
    }

    #[test]
    fn row_wrap_is_not_adjacency() {
        let geometry = GridGeometry::new(4, 2);
        // Last pixel of row 0 and first pixel of row 1 are index-adjacent only
        assert!(!geometry.adjacent(3, 4, Connectivity::Four));
        assert!(!geometry.adjacent(3, 4, Connectivity::Eight));
    }
}

//! Crop handle identities and the edges each one drives.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Which edge of an axis a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSide {
    /// Left or top edge: the origin moves, the far edge stays put.
    Near,
    /// Right or bottom edge: the origin stays put, the far edge moves.
    Far,
}

/// The pair of edges a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleEdges {
    pub horizontal: EdgeSide,
    pub vertical: EdgeSide,
}

/// One of the four corner drag targets of the crop overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Handle {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

/// Indexed by `Handle as usize`.
const EDGE_TABLE: [HandleEdges; 4] = [
    HandleEdges {
        horizontal: EdgeSide::Near,
        vertical: EdgeSide::Near,
    },
    HandleEdges {
        horizontal: EdgeSide::Far,
        vertical: EdgeSide::Near,
    },
    HandleEdges {
        horizontal: EdgeSide::Near,
        vertical: EdgeSide::Far,
    },
    HandleEdges {
        horizontal: EdgeSide::Far,
        vertical: EdgeSide::Far,
    },
];

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    #[inline]
    pub fn edges(self) -> HandleEdges {
        EDGE_TABLE[self as usize]
    }

    /// Parse the numeric handle id used across the JS boundary.
    pub fn from_u8(value: u8) -> Option<Handle> {
        Handle::ALL.get(value as usize).copied()
    }

    /// The corner of `rect` this handle sits on.
    pub fn corner(self, rect: &Rect) -> Point {
        let edges = self.edges();
        let x = match edges.horizontal {
            EdgeSide::Near => rect.left(),
            EdgeSide::Far => rect.right(),
        };
        let y = match edges.vertical {
            EdgeSide::Near => rect.top(),
            EdgeSide::Far => rect.bottom(),
        };
        Point::new(x, y)
    }

    /// Square hit target of side `size` tucked inside the matching corner of
    /// `rect`.
    pub fn hit_rect(self, rect: &Rect, size: f64) -> Rect {
        let corner = self.corner(rect);
        let edges = self.edges();
        let x = match edges.horizontal {
            EdgeSide::Near => corner.x,
            EdgeSide::Far => corner.x - size,
        };
        let y = match edges.vertical {
            EdgeSide::Near => corner.y,
            EdgeSide::Far => corner.y - size,
        };
        Rect::new(x, y, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_table_matches_names() {
        assert_eq!(
            Handle::TopLeft.edges(),
            HandleEdges {
                horizontal: EdgeSide::Near,
                vertical: EdgeSide::Near
            }
        );
        assert_eq!(Handle::TopRight.edges().horizontal, EdgeSide::Far);
        assert_eq!(Handle::TopRight.edges().vertical, EdgeSide::Near);
        assert_eq!(Handle::BottomLeft.edges().horizontal, EdgeSide::Near);
        assert_eq!(Handle::BottomLeft.edges().vertical, EdgeSide::Far);
        assert_eq!(
            Handle::BottomRight.edges(),
            HandleEdges {
                horizontal: EdgeSide::Far,
                vertical: EdgeSide::Far
            }
        );
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Handle::from_u8(0), Some(Handle::TopLeft));
        assert_eq!(Handle::from_u8(3), Some(Handle::BottomRight));
        assert_eq!(Handle::from_u8(4), None);
    }

    #[test]
    fn test_corners() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(Handle::TopLeft.corner(&rect), Point::new(10.0, 20.0));
        assert_eq!(Handle::TopRight.corner(&rect), Point::new(110.0, 20.0));
        assert_eq!(Handle::BottomLeft.corner(&rect), Point::new(10.0, 70.0));
        assert_eq!(Handle::BottomRight.corner(&rect), Point::new(110.0, 70.0));
    }

    #[test]
    fn test_hit_rects_stay_inside_crop() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        for handle in Handle::ALL {
            let hit = handle.hit_rect(&rect, 32.0);
            assert!(rect.contains_rect(&hit, 0.0), "{:?} hit rect escapes", handle);
            assert!(hit.contains_point(handle.corner(&rect)));
        }
    }
}

//! Integer 2D geometry for the workflow canvas.
//!
//! The canvas lives in an integer coordinate space (host widgets are placed
//! on whole pixels). Intersection math runs in `f64` and results are brought
//! back to `i32` the same way everywhere: truncation for line/border
//! intersections, rounding for perpendicular offsets.

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Re-express this point relative to `origin` (local frame coordinates).
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Extent of a node or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle from a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Center point, truncated to the integer grid.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2,
            self.origin.y + self.size.height / 2,
        )
    }

    /// Inclusive containment test (border points count as inside).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.size.width
            && p.y <= self.origin.y + self.size.height
    }
}

/// Point where the straight line from `c1` to the target center `c2` crosses
/// the target rectangle's border, so a connector stops at the border instead
/// of running to the center.
///
/// The target rectangle spans `c2 ± (hw, hh)`. Edges are tested in fixed
/// precedence order (top, bottom, left, right); the first edge whose
/// intersection lies both within the segment's bounding box and within the
/// rectangle wins. If no edge qualifies (e.g. `c1 == c2`), `c2` is returned
/// unchanged.
pub fn clip_to_border(c1: Point, c2: Point, hw: f64, hh: f64) -> Point {
    let (x1, y1) = (c1.x as f64, c1.y as f64);
    let (x2, y2) = (c2.x as f64, c2.y as f64);

    let in_target = |x: f64, y: f64| -> bool {
        x >= x2 - hw && x <= x2 + hw && y >= y2 - hh && y <= y2 + hh
    };

    // Horizontal edges: fix y, solve for x.
    for y in [y2 - hh, y2 + hh] {
        if y >= y1.min(y2) && y <= y1.max(y2) {
            if let Some(x) = solve_x(x1, y1, x2, y2, y) {
                if in_target(x, y) {
                    return Point::new(x as i32, y as i32);
                }
            }
        }
    }

    // Vertical edges: fix x, solve for y.
    for x in [x2 - hw, x2 + hw] {
        if x >= x1.min(x2) && x <= x1.max(x2) {
            if let Some(y) = solve_y(x1, y1, x2, y2, x) {
                if in_target(x, y) {
                    return Point::new(x as i32, y as i32);
                }
            }
        }
    }

    c2
}

/// x coordinate on the line through (x1,y1)-(x2,y2) at height `y`.
/// Vertical lines answer `x1` directly; horizontal lines have no answer.
fn solve_x(x1: f64, y1: f64, x2: f64, y2: f64, y: f64) -> Option<f64> {
    if x1 == x2 {
        return Some(x1);
    }
    if y1 == y2 {
        return None;
    }
    let k = (y2 - y1) / (x2 - x1);
    let b = y1 - k * x1;
    Some((y - b) / k)
}

/// y coordinate on the line through (x1,y1)-(x2,y2) at `x`.
/// Horizontal lines answer `y1` directly; vertical lines have no answer.
fn solve_y(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> Option<f64> {
    if x1 == x2 {
        return None;
    }
    if y1 == y2 {
        return Some(y1);
    }
    let k = (y2 - y1) / (x2 - x1);
    let b = y1 - k * x1;
    Some(k * x + b)
}

/// Closed quadrilateral (5 points, last = first) forming a band of half-width
/// `margin` around the segment `p1`-`p2`. Used as a connector's hit-test and
/// paint-clip region.
///
/// Axis-aligned segments shift purely in one coordinate, with the sign taken
/// from the direction of travel, so exactly horizontal/vertical lines don't
/// suffer trigonometric rounding. The general case offsets both endpoints
/// along the perpendicular computed from `atan(dy/dx)`.
pub fn offset_polygon(p1: Point, p2: Point, margin: i32) -> [Point; 5] {
    let (a1, a2) = parallel_points(p1, p2, margin);
    let (b1, b2) = parallel_points(p1, p2, -margin);
    [a1, a2, b2, b1, a1]
}

fn parallel_points(p1: Point, p2: Point, direction: i32) -> (Point, Point) {
    let mut out1 = p1;
    let mut out2 = p2;

    if p1.y == p2.y {
        let inc = if p1.x < p2.x { 1 } else { -1 };
        out1.y = p1.y - direction * inc;
        out2.y = p2.y - direction * inc;
    } else if p1.x == p2.x {
        let inc = if p1.y < p2.y { -1 } else { 1 };
        out1.x = p1.x - direction * inc;
        out2.x = p2.x - direction * inc;
    } else {
        let inc = if p1.x < p2.x { 1 } else { -1 };
        let theta = (-((p2.y - p1.y) as f64) / ((p2.x - p1.x) as f64)).atan();
        let dx = ((direction as f64) * theta.sin()).round() as i32 * inc;
        let dy = ((direction as f64) * theta.cos()).round() as i32 * inc;
        out1.x = p1.x - dx;
        out1.y = p1.y - dy;
        out2.x = p2.x - dx;
        out2.y = p2.y - dy;
    }

    (out1, out2)
}

/// Minimal frame enclosing the segment `p1`-`p2` plus `margin` on every side.
///
/// Endpoints re-expressed relative to the returned origin become the local
/// draw coordinates inside the frame.
pub fn bounding_frame(p1: Point, p2: Point, margin: i32) -> (Point, Size) {
    let origin = Point::new(p1.x.min(p2.x) - margin, p1.y.min(p2.y) - margin);
    let size = Size::new(
        (p1.x - p2.x).abs() + 2 * margin,
        (p1.y - p2.y).abs() + 2 * margin,
    );
    (origin, size)
}

//! Geometric primitives for card layout.
//!
//! All layout coordinates are millimetres measured from the top-left corner
//! of the page, with `y` growing downwards.

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use krucindiko::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Rotate this point by 180° about `center`.
    pub fn rotated_half_turn(&self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }
}

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use krucindiko::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 60.0, 30.0);
    /// assert_eq!(rect.width, 60.0);
    /// assert_eq!(rect.height, 30.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use krucindiko::geometry::{Point, Rect};
    ///
    /// let rect = Rect::new(0.0, 0.0, 60.0, 30.0);
    /// assert_eq!(rect.center(), Point::new(30.0, 15.0));
    /// ```
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Split the rectangle into its upper and lower halves.
    pub fn split_horizontally(&self) -> (Rect, Rect) {
        let half = self.height / 2.0;
        (
            Rect::new(self.x, self.y, self.width, half),
            Rect::new(self.x, self.y + half, self.width, half),
        )
    }
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use kurbo::{Point, Rect};

use crate::GeometryError;
use crate::error::{finite, finite_point, non_negative};

/// An axis-aligned rectangle given by its top-left corner and size.
///
/// Width and height are never negative. A box with zero width or zero height
/// is *empty*; empty boxes act as the identity for [`union`](Self::union).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl BoundingBox {
    /// Creates a box, rejecting non-finite values and negative sizes.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            x: finite("x", x)?,
            y: finite("y", y)?,
            width: non_negative("width", width)?,
            height: non_negative("height", height)?,
        })
    }

    /// The zero-sized box at the origin.
    pub const fn empty() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// The smallest box containing both points.
    pub fn from_points(p0: Point, p1: Point) -> Result<Self, GeometryError> {
        let p0 = finite_point("x0", "y0", p0)?;
        let p1 = finite_point("x1", "y1", p1)?;
        Self::from_rect(Rect::from_points(p0, p1))
    }

    /// A box of the given size centered on `center`.
    pub fn from_center(center: Point, width: f64, height: f64) -> Result<Self, GeometryError> {
        let width = non_negative("width", width)?;
        let height = non_negative("height", height)?;
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Converts a [`Rect`], normalizing its corners.
    ///
    /// Fails when a corner is not finite or the size overflows.
    pub fn from_rect(rect: Rect) -> Result<Self, GeometryError> {
        finite_point("x0", "y0", Point::new(rect.x0, rect.y0))?;
        finite_point("x1", "y1", Point::new(rect.x1, rect.y1))?;
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Spans a normalized rect built from finite boxes, saturating the size.
    fn spanning(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: (rect.x1 - rect.x0).min(f64::MAX),
            height: (rect.y1 - rect.y0).min(f64::MAX),
        }
    }

    /// Converts to a [`Rect`].
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Horizontal size.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical size.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The top-left corner.
    pub fn min_point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The bottom-right corner.
    pub fn max_point(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// The center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Width times height.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Sum of the four edge lengths.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Whether the box has zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether `p` lies inside the box or on its boundary.
    pub fn contains_point(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside this box, boundaries included.
    pub fn contains_box(&self, other: &Self) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Whether the interiors overlap.
    ///
    /// Boxes that only share an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping region, or `None` when the boxes do not
    /// [intersect](Self::intersects).
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::spanning(self.to_rect().intersect(other.to_rect())))
    }

    /// The smallest box containing both boxes.
    ///
    /// An empty operand is ignored, so `empty().union(b) == b`.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::spanning(self.to_rect().union(other.to_rect()))
    }

    /// Grows the box minimally to include `p`.
    ///
    /// An empty box collapses to a zero-sized box at `p`.
    pub fn expand_to_point(&self, p: Point) -> Result<Self, GeometryError> {
        let p = finite_point("x", "y", p)?;
        if self.is_empty() {
            return Self::new(p.x, p.y, 0.0, 0.0);
        }
        Ok(Self::spanning(self.to_rect().union_pt(p)))
    }

    /// Grows every side by `margin`; negative margins shrink, clamping sizes at zero.
    pub fn expand(&self, margin: f64) -> Result<Self, GeometryError> {
        let margin = finite("margin", margin)?;
        Self::new(
            self.x - margin,
            self.y - margin,
            (self.width + 2.0 * margin).max(0.0),
            (self.height + 2.0 * margin).max(0.0),
        )
    }

    /// Moves the box by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Result<Self, GeometryError> {
        Self::new(
            self.x + finite("dx", dx)?,
            self.y + finite("dy", dy)?,
            self.width,
            self.height,
        )
    }

    /// Scales position and size about the origin.
    pub fn scale(&self, factor: f64) -> Result<Self, GeometryError> {
        let factor = non_negative("factor", factor)?;
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Scales the size about the box's center.
    pub fn scale_from_center(&self, factor: f64) -> Result<Self, GeometryError> {
        let factor = non_negative("factor", factor)?;
        Self::from_center(self.center(), self.width * factor, self.height * factor)
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl From<BoundingBox> for Rect {
    fn from(value: BoundingBox) -> Self {
        value.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::new(x, y, w, h).unwrap()
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(matches!(
            BoundingBox::new(0.0, 0.0, -1.0, 1.0),
            Err(GeometryError::NegativeSize { name: "width", .. })
        ));
        assert!(matches!(
            BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0),
            Err(GeometryError::InvalidCoordinate { name: "x", .. })
        ));
    }

    #[test]
    fn union_ignores_empty_operands() {
        let b = bb(1.0, 2.0, 3.0, 4.0);
        assert_eq!(BoundingBox::empty().union(&b), b);
        assert_eq!(b.union(&BoundingBox::empty()), b);
        assert_eq!(b.union(&bb(10.0, 0.0, 1.0, 1.0)), bb(1.0, 0.0, 10.0, 6.0));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        let touching = bb(10.0, 0.0, 5.0, 5.0);
        assert!(!a.intersects(&touching));
        assert_eq!(a.intersection(&touching), None);

        let overlapping = bb(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&overlapping));
        assert_eq!(a.intersection(&overlapping), Some(bb(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn containment_is_inclusive() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_point(Point::new(10.0, 10.0)));
        assert!(!a.contains_point(Point::new(10.1, 5.0)));
        assert!(a.contains_box(&bb(0.0, 0.0, 10.0, 10.0)));
        assert!(!a.contains_box(&bb(5.0, 5.0, 6.0, 1.0)));
    }

    #[test]
    fn expand_to_point_collapses_empty_box() {
        let b = BoundingBox::empty().expand_to_point(Point::new(5.0, 7.0));
        assert_eq!(b, Ok(bb(5.0, 7.0, 0.0, 0.0)));
        let b = bb(0.0, 0.0, 2.0, 2.0).expand_to_point(Point::new(-1.0, 5.0));
        assert_eq!(b, Ok(bb(-1.0, 0.0, 3.0, 5.0)));
        assert!(matches!(
            b.and_then(|b| b.expand_to_point(Point::new(f64::NAN, 0.0))),
            Err(GeometryError::InvalidCoordinate { name: "x", .. })
        ));
    }

    #[test]
    fn rect_conversion_validates_corners() {
        assert_eq!(
            BoundingBox::from_rect(Rect::new(4.0, 6.0, 1.0, 2.0)),
            Ok(bb(1.0, 2.0, 3.0, 4.0))
        );
        assert!(matches!(
            BoundingBox::from_rect(Rect::new(0.0, 0.0, f64::INFINITY, 1.0)),
            Err(GeometryError::InvalidCoordinate { name: "x1", .. })
        ));
        assert!(matches!(
            BoundingBox::from_rect(Rect::new(-f64::MAX, 0.0, f64::MAX, 1.0)),
            Err(GeometryError::InvalidCoordinate { name: "width", .. })
        ));
        assert!(BoundingBox::from_points(Point::new(f64::NAN, 0.0), Point::ORIGIN).is_err());
    }

    #[test]
    fn union_of_far_apart_boxes_stays_finite() {
        let a = bb(-f64::MAX, 0.0, 1.0, 1.0);
        let b = bb(f64::MAX - 1.0, 0.0, 1.0, 1.0);
        let u = a.union(&b);
        assert!(u.width().is_finite());
        assert_eq!(u.width(), f64::MAX);
    }

    #[test]
    fn derived_points_and_measures() {
        let b = bb(1.0, 2.0, 4.0, 6.0);
        assert_eq!(b.center(), Point::new(3.0, 5.0));
        assert_eq!(b.corners()[2], Point::new(5.0, 8.0));
        assert_eq!(b.area(), 24.0);
        assert_eq!(b.perimeter(), 20.0);
        assert_eq!(BoundingBox::from_center(Point::new(3.0, 5.0), 4.0, 6.0), Ok(b));
    }

    #[test]
    fn scaling_and_translation() {
        let b = bb(2.0, 2.0, 4.0, 2.0);
        assert_eq!(b.scale(2.0), Ok(bb(4.0, 4.0, 8.0, 4.0)));
        assert_eq!(b.scale_from_center(0.5), Ok(bb(3.0, 2.5, 2.0, 1.0)));
        assert_eq!(b.translate(-2.0, 1.0), Ok(bb(0.0, 3.0, 4.0, 2.0)));
        assert!(b.scale(-1.0).is_err());
        assert_eq!(b.expand(-5.0).map(|e| e.is_empty()), Ok(true));
    }
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive shapes.
//!
//! Geometry is validated on construction and stored in the shape's local
//! frame. The shape's own
//! [`Transform`] maps that frame into its parent's; renderers compose it with
//! the accumulated traversal transform.

use core::f64::consts::PI;

use kurbo::{Point, Rect, Vec2};
use vellum_geometry::{BoundingBox, GeometryError, Transform, finite, finite_point, non_negative};

use crate::{Drawable, NodeKind, Style, Styled};

/// A circle given by center and radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    /// Local transform.
    pub transform: Transform,
    /// Paint and visibility.
    pub style: Style,
}

impl Circle {
    /// Creates an unstyled circle.
    ///
    /// The center must be finite and the radius finite and not negative.
    pub fn new(center: impl Into<Point>, radius: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            center: finite_point("cx", "cy", center.into())?,
            radius: non_negative("radius", radius)?,
            transform: Transform::IDENTITY,
            style: Style::DEFAULT,
        })
    }

    /// Center in local coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Applies `transform` after the current local transform.
    #[must_use]
    pub fn transformed(mut self, transform: Transform) -> Self {
        self.transform = transform.compose(self.transform);
        self
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Perimeter length.
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Whether a local-space point lies inside or on the circle.
    pub fn contains_point(&self, p: Point) -> bool {
        (p - self.center).length_squared() <= self.radius * self.radius
    }
}

/// An axis-aligned rectangle in its local frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Local transform.
    pub transform: Transform,
    /// Paint and visibility.
    pub style: Style,
}

impl Rectangle {
    /// Creates an unstyled rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            x: finite("x", x)?,
            y: finite("y", y)?,
            width: non_negative("width", width)?,
            height: non_negative("height", height)?,
            transform: Transform::IDENTITY,
            style: Style::DEFAULT,
        })
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

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Applies `transform` after the current local transform.
    #[must_use]
    pub fn transformed(mut self, transform: Transform) -> Self {
        self.transform = transform.compose(self.transform);
        self
    }

    /// The rectangle as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center in local coordinates.
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Width times height.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether width and height are equal.
    pub fn is_square(&self) -> bool {
        (self.width - self.height).abs() < f64::EPSILON
    }
}

/// An axis-aligned ellipse given by center and radii.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    /// Local transform.
    pub transform: Transform,
    /// Paint and visibility.
    pub style: Style,
}

impl Ellipse {
    /// Creates an unstyled ellipse.
    pub fn new(center: impl Into<Point>, rx: f64, ry: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            center: finite_point("cx", "cy", center.into())?,
            rx: non_negative("rx", rx)?,
            ry: non_negative("ry", ry)?,
            transform: Transform::IDENTITY,
            style: Style::DEFAULT,
        })
    }

    /// Center in local coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Horizontal radius.
    pub fn rx(&self) -> f64 {
        self.rx
    }

    /// Vertical radius.
    pub fn ry(&self) -> f64 {
        self.ry
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Applies `transform` after the current local transform.
    #[must_use]
    pub fn transformed(mut self, transform: Transform) -> Self {
        self.transform = transform.compose(self.transform);
        self
    }

    /// Radii as a vector.
    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.rx, self.ry)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        PI * self.rx * self.ry
    }

    /// Whether a local-space point lies inside or on the ellipse.
    pub fn contains_point(&self, p: Point) -> bool {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return false;
        }
        let d = p - self.center;
        let (nx, ny) = (d.x / self.rx, d.y / self.ry);
        nx * nx + ny * ny <= 1.0
    }
}

/// A straight segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    /// Local transform.
    pub transform: Transform,
    /// Paint and visibility. Lines only use the stroke.
    pub style: Style,
}

impl Line {
    /// Creates an unstyled line.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self, GeometryError> {
        Ok(Self {
            start: finite_point("x1", "y1", start.into())?,
            end: finite_point("x2", "y2", end.into())?,
            transform: Transform::IDENTITY,
            style: Style::DEFAULT,
        })
    }

    /// First endpoint.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Second endpoint.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Applies `transform` after the current local transform.
    #[must_use]
    pub fn transformed(mut self, transform: Transform) -> Self {
        self.transform = transform.compose(self.transform);
        self
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Point halfway between the endpoints.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

macro_rules! primitive_impls {
    ($ty:ident) => {
        impl Styled for $ty {
            fn style(&self) -> &Style {
                &self.style
            }

            fn style_mut(&mut self) -> &mut Style {
                &mut self.style
            }
        }

        impl Drawable for $ty {
            fn kind(&self) -> NodeKind {
                NodeKind::$ty
            }

            fn local_transform(&self) -> Transform {
                self.transform
            }

            fn opacity(&self) -> f64 {
                self.style.opacity
            }

            fn visible(&self) -> bool {
                self.style.visible
            }

            fn bounds_under(
                &self,
                parent: Transform,
            ) -> Result<Option<BoundingBox>, GeometryError> {
                self.outline_bbox(parent.compose(self.transform)).map(Some)
            }
        }
    };
}

primitive_impls!(Circle);
primitive_impls!(Rectangle);
primitive_impls!(Ellipse);
primitive_impls!(Line);

/// Axis-aligned box of a primitive's outline under a full transform.
trait OutlineBounds {
    fn outline_bbox(&self, world: Transform) -> Result<BoundingBox, GeometryError>;
}

impl OutlineBounds for Circle {
    fn outline_bbox(&self, world: Transform) -> Result<BoundingBox, GeometryError> {
        world.transform_ellipse_bbox(self.center, Vec2::new(self.radius, self.radius))
    }
}

impl OutlineBounds for Rectangle {
    fn outline_bbox(&self, world: Transform) -> Result<BoundingBox, GeometryError> {
        world.transform_rect_bbox(self.rect())
    }
}

impl OutlineBounds for Ellipse {
    fn outline_bbox(&self, world: Transform) -> Result<BoundingBox, GeometryError> {
        world.transform_ellipse_bbox(self.center, self.radii())
    }
}

impl OutlineBounds for Line {
    fn outline_bbox(&self, world: Transform) -> Result<BoundingBox, GeometryError> {
        BoundingBox::from_points(
            world.apply_to_point(self.start),
            world.apply_to_point(self.end),
        )
    }
}

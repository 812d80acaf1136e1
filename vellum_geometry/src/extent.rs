// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::error::finite_point;
use crate::{BoundingBox, GeometryError};

/// A running min/max fold over points and boxes.
///
/// Unlike [`BoundingBox::union`], an `Extent` never drops zero-width or
/// zero-height contributions, so a horizontal line still widens it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    rect: Option<Rect>,
}

impl Extent {
    /// An extent that has seen nothing.
    pub const fn new() -> Self {
        Self { rect: None }
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// Forgets everything added so far.
    pub fn clear(&mut self) {
        self.rect = None;
    }

    /// Widens the extent to include `p`, rejecting non-finite points.
    pub fn add_point(&mut self, p: Point) -> Result<(), GeometryError> {
        let p = finite_point("x", "y", p)?;
        self.rect = Some(match self.rect {
            Some(rect) => rect.union_pt(p),
            None => Rect::from_points(p, p),
        });
        Ok(())
    }

    /// Widens the extent to include `bbox`.
    pub fn add_box(&mut self, bbox: BoundingBox) {
        let other = bbox.to_rect();
        self.rect = Some(match self.rect {
            Some(rect) => rect.union(other),
            None => other,
        });
    }

    /// The folded box, or `None` if nothing was added.
    ///
    /// Fails only when the folded size overflows.
    pub fn to_bounding_box(&self) -> Result<Option<BoundingBox>, GeometryError> {
        self.rect.map(BoundingBox::from_rect).transpose()
    }
}

impl Extend<BoundingBox> for Extent {
    fn extend<I: IntoIterator<Item = BoundingBox>>(&mut self, iter: I) {
        for bbox in iter {
            self.add_box(bbox);
        }
    }
}

impl FromIterator<BoundingBox> for Extent {
    fn from_iter<I: IntoIterator<Item = BoundingBox>>(iter: I) -> Self {
        let mut extent = Self::new();
        extent.extend(iter);
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_added_yields_none() {
        assert_eq!(Extent::new().to_bounding_box(), Ok(None));
    }

    #[test]
    fn degenerate_contributions_are_kept() {
        let mut extent = Extent::new();
        extent.add_point(Point::new(0.0, 5.0)).unwrap();
        extent.add_point(Point::new(10.0, 5.0)).unwrap();
        assert_eq!(
            extent.to_bounding_box(),
            Ok(Some(BoundingBox::new(0.0, 5.0, 10.0, 0.0).unwrap()))
        );

        let flat = BoundingBox::new(0.0, 20.0, 4.0, 0.0).unwrap();
        extent.add_box(flat);
        assert_eq!(
            extent.to_bounding_box(),
            Ok(Some(BoundingBox::new(0.0, 5.0, 10.0, 15.0).unwrap()))
        );
    }

    #[test]
    fn collects_boxes() {
        let extent: Extent = [
            BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            BoundingBox::new(-2.0, 3.0, 1.0, 1.0).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            extent.to_bounding_box(),
            Ok(Some(BoundingBox::new(-2.0, 0.0, 3.0, 4.0).unwrap()))
        );
        let mut extent = extent;
        extent.clear();
        assert!(extent.is_empty());
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let mut extent = Extent::new();
        extent.add_point(Point::new(1.0, 1.0)).unwrap();
        assert!(matches!(
            extent.add_point(Point::new(f64::NAN, 0.0)),
            Err(GeometryError::InvalidCoordinate { name: "x", .. })
        ));
        assert_eq!(
            extent.to_bounding_box(),
            Ok(Some(BoundingBox::new(1.0, 1.0, 0.0, 0.0).unwrap()))
        );
    }

    #[test]
    fn overflowing_fold_is_an_error() {
        let extent: Extent = [
            BoundingBox::new(-f64::MAX, 0.0, 1.0, 1.0).unwrap(),
            BoundingBox::new(f64::MAX - 1.0, 0.0, 1.0, 1.0).unwrap(),
        ]
        .into_iter()
        .collect();
        assert!(extent.to_bounding_box().is_err());
    }
}

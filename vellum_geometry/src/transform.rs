// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated 2D affine transforms.

use core::ops::Mul;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`, `atan2` and `tan`
use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::{finite, finite_point, non_negative};
use crate::{BoundingBox, GeometryError};

/// Tolerance used for identity and invertibility checks.
pub const EPSILON: f64 = 1e-10;

/// A 2D affine transform with finite coefficients.
///
/// The coefficients `[a, b, c, d, tx, ty]` describe the matrix
///
/// ```text
/// [ a c tx ]
/// [ b d ty ]
/// [ 0 0 1  ]
/// ```
///
/// which is the same layout as [`kurbo::Affine`]. Every constructor rejects
/// NaN and infinite values, so any `Transform` that exists is safe to compose,
/// apply and format.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(Affine);

/// The result of [`Transform::decompose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    /// Length of the first column, negated for reflections.
    pub scale_x: f64,
    /// Length of the second column.
    pub scale_y: f64,
    /// Rotation in radians, `atan2(b, a)`.
    pub rotation: f64,
    /// Translation component.
    pub translation: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// Creates a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Result<Self, GeometryError> {
        Self::from_coeffs([a, b, c, d, tx, ty])
    }

    /// Creates a transform from `[a, b, c, d, tx, ty]`.
    pub fn from_coeffs(coeffs: [f64; 6]) -> Result<Self, GeometryError> {
        const NAMES: [&str; 6] = ["a", "b", "c", "d", "tx", "ty"];
        for (name, value) in NAMES.into_iter().zip(coeffs) {
            finite(name, value)?;
        }
        Ok(Self(Affine::new(coeffs)))
    }

    /// Creates a transform from a row-major 3x3 matrix.
    ///
    /// The bottom row must be exactly `[0, 0, 1]`.
    pub fn from_matrix(rows: [[f64; 3]; 3]) -> Result<Self, GeometryError> {
        if rows[2] != [0.0, 0.0, 1.0] {
            return Err(GeometryError::NotAffine);
        }
        Self::new(
            rows[0][0], rows[1][0], rows[0][1], rows[1][1], rows[0][2], rows[1][2],
        )
    }

    /// Returns the identity transform.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// A translation by `(dx, dy)`.
    pub fn translate(dx: f64, dy: f64) -> Result<Self, GeometryError> {
        Ok(Self(Affine::translate((finite("dx", dx)?, finite("dy", dy)?))))
    }

    /// A counter-clockwise rotation by `theta` radians.
    pub fn rotate(theta: f64) -> Result<Self, GeometryError> {
        Ok(Self(Affine::rotate(finite("theta", theta)?)))
    }

    /// A uniform scale.
    pub fn scale(s: f64) -> Result<Self, GeometryError> {
        Self::scale_xy(s, s)
    }

    /// A non-uniform scale.
    pub fn scale_xy(sx: f64, sy: f64) -> Result<Self, GeometryError> {
        Ok(Self(Affine::scale_non_uniform(
            finite("sx", sx)?,
            finite("sy", sy)?,
        )))
    }

    /// A horizontal skew by `skew_x` radians.
    pub fn skew(skew_x: f64) -> Result<Self, GeometryError> {
        Self::skew_xy(skew_x, 0.0)
    }

    /// A skew by `skew_x` and `skew_y` radians.
    ///
    /// The resulting matrix is `[1, tan(skew_y), tan(skew_x), 1, 0, 0]`.
    pub fn skew_xy(skew_x: f64, skew_y: f64) -> Result<Self, GeometryError> {
        let kx = finite("skew_x", finite("skew_x", skew_x)?.tan())?;
        let ky = finite("skew_y", finite("skew_y", skew_y)?.tan())?;
        Ok(Self(Affine::new([1.0, ky, kx, 1.0, 0.0, 0.0])))
    }

    /// The coefficients `[a, b, c, d, tx, ty]`.
    pub fn coeffs(&self) -> [f64; 6] {
        self.0.as_coeffs()
    }

    /// The underlying [`Affine`].
    pub fn as_affine(&self) -> Affine {
        self.0
    }

    /// Row-major 3x3 matrix form.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        let [a, b, c, d, tx, ty] = self.coeffs();
        [[a, c, tx], [b, d, ty], [0.0, 0.0, 1.0]]
    }

    /// Returns `self ∘ other`.
    ///
    /// Applying the result to a point applies `other` first, then `self`.
    /// Traversal composes as `accumulated.compose(local)`, so a parent's
    /// frame wraps its children's frames.
    #[must_use]
    pub fn compose(&self, other: Self) -> Self {
        // Products of finite values can overflow; saturate to keep the invariant.
        let coeffs = (self.0 * other.0).as_coeffs().map(saturate);
        Self(Affine::new(coeffs))
    }

    /// Applies the full transform to a point.
    pub fn apply_to_point(&self, p: Point) -> Point {
        self.0 * p
    }

    /// Applies only the linear part to a vector.
    pub fn apply_to_vector(&self, v: Vec2) -> Vec2 {
        let [a, b, c, d, _, _] = self.coeffs();
        Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    /// The determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Whether [`invert`](Self::invert) would succeed.
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() >= EPSILON
    }

    /// Returns the inverse transform.
    pub fn invert(&self) -> Result<Self, GeometryError> {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Err(GeometryError::NotInvertible { determinant: det });
        }
        let [a, b, c, d, tx, ty] = self.coeffs();
        let inv_det = 1.0 / det;
        Self::new(
            d * inv_det,
            -b * inv_det,
            -c * inv_det,
            a * inv_det,
            (c * ty - d * tx) * inv_det,
            (b * tx - a * ty) * inv_det,
        )
    }

    /// Whether this is the identity, within [`EPSILON`].
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, EPSILON)
    }

    /// Whether this is a pure, non-zero translation.
    pub fn is_translation_only(&self) -> bool {
        let [a, b, c, d, tx, ty] = self.coeffs();
        near(a, 1.0)
            && near(b, 0.0)
            && near(c, 0.0)
            && near(d, 1.0)
            && !(near(tx, 0.0) && near(ty, 0.0))
    }

    /// Whether this is a pure, non-unit scale.
    pub fn is_scaling_only(&self) -> bool {
        let [a, b, c, d, tx, ty] = self.coeffs();
        near(b, 0.0)
            && near(c, 0.0)
            && near(tx, 0.0)
            && near(ty, 0.0)
            && !(near(a, 1.0) && near(d, 1.0))
    }

    /// Whether this is a pure rotation by a non-zero angle.
    pub fn is_rotation(&self) -> bool {
        let [a, b, c, d, tx, ty] = self.coeffs();
        near(tx, 0.0)
            && near(ty, 0.0)
            && near(a, d)
            && near(b, -c)
            && near(a * a + b * b, 1.0)
            && !near(a, 1.0)
    }

    /// Splits the transform into scale, rotation and translation.
    ///
    /// `scale_x` is negated when the transform contains a reflection.
    pub fn decompose(&self) -> Decomposition {
        let [a, b, c, d, tx, ty] = self.coeffs();
        let mut scale_x = (a * a + b * b).sqrt();
        let scale_y = (c * c + d * d).sqrt();
        if self.determinant() < 0.0 {
            scale_x = -scale_x;
        }
        Decomposition {
            scale_x,
            scale_y,
            rotation: b.atan2(a),
            translation: Vec2::new(tx, ty),
        }
    }

    /// `(scale_x, scale_y)` from [`decompose`](Self::decompose).
    pub fn scale_factors(&self) -> (f64, f64) {
        let parts = self.decompose();
        (parts.scale_x, parts.scale_y)
    }

    /// Rotation in radians from [`decompose`](Self::decompose).
    pub fn rotation_angle(&self) -> f64 {
        let [a, b, ..] = self.coeffs();
        b.atan2(a)
    }

    /// The translation component.
    pub fn translation(&self) -> Vec2 {
        self.0.translation()
    }

    /// Adds `(dx, dy)` directly to the translation component.
    pub fn then_translate(&self, dx: f64, dy: f64) -> Result<Self, GeometryError> {
        let [a, b, c, d, tx, ty] = self.coeffs();
        Self::new(a, b, c, d, tx + finite("dx", dx)?, ty + finite("dy", dy)?)
    }

    /// Returns `self ∘ scale(sx, sy)`.
    pub fn then_scale(&self, sx: f64, sy: f64) -> Result<Self, GeometryError> {
        Ok(self.compose(Self::scale_xy(sx, sy)?))
    }

    /// Returns `self ∘ rotate(theta)`.
    pub fn then_rotate(&self, theta: f64) -> Result<Self, GeometryError> {
        Ok(self.compose(Self::rotate(theta)?))
    }

    /// Adds `tan(skew_x)` to `c` and `tan(skew_y)` to `b`.
    pub fn then_skew(&self, skew_x: f64, skew_y: f64) -> Result<Self, GeometryError> {
        let [a, b, c, d, tx, ty] = self.coeffs();
        let kx = finite("skew_x", skew_x)?.tan();
        let ky = finite("skew_y", skew_y)?.tan();
        Self::new(a, b + ky, c + kx, d, tx, ty)
    }

    /// Coefficient-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.coeffs()
            .into_iter()
            .zip(other.coeffs())
            .all(|(x, y)| (x - y).abs() <= tolerance)
    }

    /// Axis-aligned bounds of `rect` after this transform.
    ///
    /// Fails when `rect` is not finite or the result overflows.
    pub fn transform_rect_bbox(&self, rect: Rect) -> Result<BoundingBox, GeometryError> {
        let [p0, p1, p2, p3] = BoundingBox::from_rect(rect)?
            .corners()
            .map(|p| self.apply_to_point(p));
        let diagonal = BoundingBox::from_points(p0, p2)?.to_rect();
        let anti_diagonal = BoundingBox::from_points(p1, p3)?.to_rect();
        BoundingBox::from_rect(diagonal.union(anti_diagonal))
    }

    /// Axis-aligned bounds of an axis-aligned ellipse after this transform.
    ///
    /// The result is exact: for the linear part `[a c; b d]` the half extents
    /// are `|(a·rx, c·ry)|` and `|(b·rx, d·ry)|`.
    pub fn transform_ellipse_bbox(
        &self,
        center: Point,
        radii: Vec2,
    ) -> Result<BoundingBox, GeometryError> {
        let center = finite_point("cx", "cy", center)?;
        let radii = Vec2::new(non_negative("rx", radii.x)?, non_negative("ry", radii.y)?);
        let [a, b, c, d, _, _] = self.coeffs();
        let half = Vec2::new(
            Vec2::new(a * radii.x, c * radii.y).length(),
            Vec2::new(b * radii.x, d * radii.y).length(),
        );
        let center = self.apply_to_point(center);
        BoundingBox::from_points(center - half, center + half)
    }
}

fn near(x: f64, y: f64) -> bool {
    (x - y).abs() <= EPSILON
}

fn saturate(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(f64::MIN, f64::MAX) }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

impl Mul<Point> for Transform {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply_to_point(rhs)
    }
}

impl From<Transform> for Affine {
    fn from(value: Transform) -> Self {
        value.0
    }
}

impl TryFrom<Affine> for Transform {
    type Error = GeometryError;

    fn try_from(value: Affine) -> Result<Self, Self::Error> {
        Self::from_coeffs(value.as_coeffs())
    }
}

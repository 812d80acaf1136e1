// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use thiserror::Error;
use vellum_geometry::GeometryError;

/// Errors raised while rendering a scene.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RenderError {
    /// A pop was attempted with only the base frame left.
    #[error("render context stack underflow: cannot pop the base frame")]
    StackUnderflow,
    /// Invalid geometry was encountered during traversal.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Writing to the output buffer failed.
    #[error("failed to format output")]
    Format(#[from] core::fmt::Error),
    /// A renderer rejected a node.
    #[error("renderer failed: {0}")]
    Visitor(String),
}

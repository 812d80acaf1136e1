// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use vellum_geometry::Transform;

use crate::{RenderError, RenderState, StatePatch};

/// Traversal state: a transform stack and a state stack that always have the
/// same length.
///
/// Both stacks start with a base frame (identity, [`RenderState::DEFAULT`])
/// that can never be popped.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    transforms: Vec<Transform>,
    states: Vec<RenderState>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// A context holding only the base frame.
    pub fn new() -> Self {
        Self {
            transforms: vec![Transform::IDENTITY],
            states: vec![RenderState::DEFAULT],
        }
    }

    /// Pushes a frame.
    ///
    /// With a `transform`, the new top is `current_transform ∘ transform`;
    /// without one the current transform is repeated. The new state copies
    /// the current state, applies `patch`, and records the composed transform.
    pub fn push(&mut self, transform: Option<Transform>, patch: StatePatch) {
        let current = self.current_transform();
        let composed = transform.map_or(current, |local| current.compose(local));
        let mut state = self.current_state().patched(&patch);
        state.transform = composed;
        self.transforms.push(composed);
        self.states.push(state);
    }

    /// Pops the top frame, returning its transform and state.
    pub fn pop(&mut self) -> Result<(Transform, RenderState), RenderError> {
        if self.depth() <= 1 {
            return Err(RenderError::StackUnderflow);
        }
        match (self.transforms.pop(), self.states.pop()) {
            (Some(transform), Some(state)) => Ok((transform, state)),
            _ => Err(RenderError::StackUnderflow),
        }
    }

    /// Pushes a frame and returns a guard that pops it when dropped.
    pub fn scope(&mut self, transform: Option<Transform>, patch: StatePatch) -> ContextScope<'_> {
        let depth = self.depth();
        self.push(transform, patch);
        ContextScope {
            context: self,
            depth,
        }
    }

    /// Number of frames, including the base frame.
    pub fn depth(&self) -> usize {
        self.transforms.len()
    }

    /// The accumulated transform at the top of the stack.
    pub fn current_transform(&self) -> Transform {
        self.transforms
            .last()
            .copied()
            .unwrap_or(Transform::IDENTITY)
    }

    /// The state at the top of the stack.
    pub fn current_state(&self) -> &RenderState {
        self.states.last().unwrap_or(&RenderState::DEFAULT)
    }

    /// `current_transform ∘ local`: the full transform for a node whose own
    /// transform is `local`.
    pub fn transform_for(&self, local: Transform) -> Transform {
        self.current_transform().compose(local)
    }

    /// Product of the opacity of every frame on the stack.
    pub fn effective_opacity(&self) -> f64 {
        self.states.iter().map(|state| state.opacity).product()
    }

    /// Whether every frame on the stack is visible.
    pub fn is_visible(&self) -> bool {
        self.states.iter().all(|state| state.visible)
    }

    /// Drops every frame above the base frame.
    pub fn reset(&mut self) {
        self.unwind_to(1);
    }

    /// Pops frames until at most `depth` remain. The base frame always stays.
    pub(crate) fn unwind_to(&mut self, depth: usize) {
        let depth = depth.max(1);
        self.transforms.truncate(depth);
        self.states.truncate(depth);
    }
}

/// A pushed frame that is popped when the guard is dropped.
///
/// Created by [`RenderContext::scope`]. Dropping the guard restores the stack
/// to the depth it had before the push, on every exit path.
#[derive(Debug)]
pub struct ContextScope<'a> {
    context: &'a mut RenderContext,
    depth: usize,
}

impl Deref for ContextScope<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.context
    }
}

impl DerefMut for ContextScope<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.context
    }
}

impl Drop for ContextScope<'_> {
    fn drop(&mut self) {
        self.context.unwind_to(self.depth);
    }
}

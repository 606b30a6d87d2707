//! Index types for mesh elements.
//!
//! This module provides type-safe index wrappers for vertices, half-edges,
//! and faces. All indices are 32-bit signed integers with `-1` as the
//! invalid/sentinel value, matching the `int`-typed storage-buffer arrays
//! the mesh is uploaded into. Because the wrappers are `#[repr(transparent)]`
//! and [`Pod`], a `Vec` of ids can be reinterpreted as `&[i32]` for upload
//! without copying.

use std::fmt::{self, Debug};

use bytemuck::{Pod, Zeroable};

/// Sentinel raw value for an invalid index.
pub const INVALID_INDEX: i32 = -1;

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct VertexId(i32);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct HalfEdgeId(i32);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct FaceId(i32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            ///
            /// # Panics
            /// Panics in debug builds if the value does not fit in an `i32`.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= i32::MAX as usize, "index {} too large for i32", index);
                Self(index as i32)
            }

            /// Create an invalid/sentinel index.
            #[inline]
            pub fn invalid() -> Self {
                Self(INVALID_INDEX)
            }

            /// Get the index as a `usize` for slice addressing.
            ///
            /// Must only be called on valid indices.
            #[inline]
            pub fn index(self) -> usize {
                debug_assert!(self.is_valid(), "tried to address with an invalid index");
                self.0 as usize
            }

            /// Get the raw `i32` value (may be the sentinel).
            #[inline]
            pub fn raw(self) -> i32 {
                self.0
            }

            /// Check if this is a valid (non-sentinel) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != INVALID_INDEX
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.0)
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(FaceId, "F");

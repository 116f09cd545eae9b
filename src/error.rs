//! Error type shared by the table surfaces.

use thiserror::Error;

/// Errors raised by [`SymbolTable`](crate::SymbolTable) construction and
/// by the [`NullableTable`](crate::nullable::NullableTable) surface.
///
/// There is a single kind: an argument violated its contract. It is
/// always raised before any routing or mutation, so the table is left
/// exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolTableError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl SymbolTableError {
    pub(crate) const ZERO_BUCKETS: Self = Self::InvalidArgument("bucket count must be positive");
    pub(crate) const MISSING_KEY: Self = Self::InvalidArgument("key must be present");
}

pub type Result<T> = core::result::Result<T, SymbolTableError>;

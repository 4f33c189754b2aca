//! Failures surfaced by the simulation core

use core::fmt;

use crate::platform::ShapeKind;

/// The host could not provide a shape for a new entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreationError {
    ShapeUnavailable { kind: ShapeKind },
    TextUnavailable,
    /// The paddle's shape is gone, so there is nowhere to serve a ball from
    PaddleUnavailable,
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeUnavailable { kind } => {
                write!(f, "host could not create a {kind} shape")
            }
            Self::TextUnavailable => write!(f, "host could not create a text item"),
            Self::PaddleUnavailable => write!(f, "paddle shape is missing, cannot serve a ball"),
        }
    }
}

impl std::error::Error for CreationError {}

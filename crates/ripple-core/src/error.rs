use thiserror::Error;

use crate::grid::GridSize;

pub type Result<T> = std::result::Result<T, RippleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RippleError {
    /// Two grids that must share a resolution do not.
    #[error("grid shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: GridSize, found: GridSize },

    #[error("invalid colour {0:?}: expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("present failed: {0}")]
    Present(String),
}

impl RippleError {
    pub(crate) fn check_shape(expected: GridSize, found: GridSize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(RippleError::ShapeMismatch { expected, found })
        }
    }
}

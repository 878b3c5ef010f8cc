use std::fmt;

/// Rejected grid description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No rows, or rows with no cells.
    Empty,
    /// A row whose length differs from the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character in a map file that is not a decimal digit.
    InvalidCell { row: usize, col: usize, ch: char },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no cells"),
            MapError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "map row {row} has {found} cells, expected {expected}"
            ),
            MapError::InvalidCell { row, col, ch } => {
                write!(f, "invalid map cell {ch:?} at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Rejected texture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Zero width or zero height.
    Empty,
    /// Pixel count does not match `width * height`.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Empty => write!(f, "texture has zero width or height"),
            TextureError::SizeMismatch { expected, found } => {
                write!(f, "texture has {found} pixels, expected {expected}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

use crate::error::MapError;

/// The bordered 8x7 room the engine starts in. Corner cells use variant 2.
pub const DEFAULT_ROOM: [[u8; 8]; 7] = [
    [2, 1, 1, 1, 1, 1, 1, 2],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [2, 1, 1, 1, 1, 1, 1, 2],
];

/// Immutable row-major tile grid. 0 is open floor, anything else is a wall
/// whose value is its variant id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Build a grid from rows of cell codes. Every row must have the same
    /// length as the first.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(cols * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(MapError::RaggedRow {
                    row,
                    expected: cols,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }

        Ok(Self {
            cells,
            cols,
            rows: rows.len(),
        })
    }

    /// Parse a text map: one row per line, one decimal digit per cell.
    /// Blank lines and trailing whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let row = rows.len();
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    ch.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or(MapError::InvalidCell { row, col, ch })
                })
                .collect::<Result<Vec<u8>, MapError>>()?;
            rows.push(cells);
        }
        Self::from_rows(&rows)
    }

    pub fn default_room() -> Self {
        Self {
            cells: DEFAULT_ROOM.iter().flatten().copied().collect(),
            cols: DEFAULT_ROOM[0].len(),
            rows: DEFAULT_ROOM.len(),
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell code at `(col, row)`, or `None` outside the grid.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cell code under a continuous position in cell units.
    #[inline]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<u8> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.cell(x as usize, y as usize)
    }

    /// True when `(x, y)` falls inside the grid bounds.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.cols as f32 && y < self.rows as f32
    }

    /// Iterate `(col, row, code)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i % self.cols, i / self.cols, c))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::default_room()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_room_is_bordered() {
        let grid = Grid::default_room();
        assert_eq!((grid.cols(), grid.rows()), (8, 7));
        assert_eq!(grid.cell(0, 0), Some(2));
        assert_eq!(grid.cell(7, 2), Some(1));
        assert_eq!(grid.cell(3, 3), Some(0));
        assert_eq!(grid.cell(8, 0), None);
        assert_eq!(grid.cell(0, 7), None);
    }

    #[test]
    fn parse_matches_builtin_room() {
        let text = "21111112\n10000001\n10000001\n\n10000001\n10000001\n10000001\n21111112\n";
        assert_eq!(Grid::parse(text).unwrap(), Grid::default_room());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::parse("111\n10\n111").unwrap_err();
        assert_eq!(
            err,
            MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn non_digit_cells_are_rejected() {
        let err = Grid::parse("111\n1#1\n111").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidCell {
                row: 1,
                col: 1,
                ch: '#'
            }
        );
        assert_eq!(Grid::parse("\n\n").unwrap_err(), MapError::Empty);
    }

    #[test]
    fn cell_at_truncates() {
        let grid = Grid::default_room();
        assert_eq!(grid.cell_at(7.0, 2.5), Some(1));
        assert_eq!(grid.cell_at(6.999, 2.5), Some(0));
        assert_eq!(grid.cell_at(-0.1, 2.5), None);
        assert!(!grid.contains(8.0, 1.0));
        assert!(grid.contains(7.99, 6.99));
    }
}

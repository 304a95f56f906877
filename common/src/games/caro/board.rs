use std::fmt;
use std::str::FromStr;

use super::error::BoardParseError;
use super::types::{Mark, Position};

/// Square grid indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Mark>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![Mark::Empty; size]; size],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Mark>>) -> Result<Self, BoardParseError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardParseError::Empty);
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(BoardParseError::NotSquare {
                    line: index + 1,
                    expected: size,
                    found: row.len(),
                });
            }
        }
        Ok(Self { size, cells: rows })
    }

    pub fn parse(text: &str) -> Result<Self, BoardParseError> {
        let mut rows: Vec<Vec<Mark>> = Vec::new();
        let mut expected_width: Option<usize> = None;

        for (index, line) in text.lines().enumerate() {
            let mut row = Vec::new();
            for symbol in line.chars().filter(|c| !c.is_whitespace()) {
                let mark = Mark::from_symbol(symbol).ok_or(BoardParseError::UnknownSymbol {
                    line: index + 1,
                    symbol,
                })?;
                row.push(mark);
            }
            if row.is_empty() {
                continue;
            }

            let width = *expected_width.get_or_insert(row.len());
            if row.len() != width {
                return Err(BoardParseError::NotSquare {
                    line: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        let Some(width) = expected_width else {
            return Err(BoardParseError::Empty);
        };
        if rows.len() != width {
            return Err(BoardParseError::RowCount {
                expected: width,
                found: rows.len(),
            });
        }

        Ok(Self {
            size: width,
            cells: rows,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Writes `mark` without any rule checks. Returns `false` when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = mark;
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell == Mark::Empty))
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    /// Text form with every cell in `highlight` wrapped in brackets.
    pub fn render(&self, highlight: &[Position]) -> String {
        let mut out = String::with_capacity(self.size * (self.size * 3 + 1));
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if highlight.contains(&Position::new(row, col)) {
                    out.push('[');
                    out.push(cell.symbol());
                    out.push(']');
                } else {
                    out.push(' ');
                    out.push(cell.symbol());
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

//! Initial-condition patterns: rectangular boolean grids with an
//! optional embedded rule set.
//!
//! Two in-memory formats are supported: plain ASCII rows (one character
//! per cell) and the Life 1.05 interchange format (`#Life 1.05` header,
//! `#R`/`#N` rule lines, center-relative `#P` blocks of `*`/`.` rows).
//! File I/O is left to callers — both parsers take strings.

use petri_rules::{RuleError, RuleSet};
use std::error::Error;
use std::fmt;

/// Errors from parsing a pattern.
#[derive(Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern has no rows or no columns.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The input does not start with a recognized format header.
    UnknownFormat,
    /// A line could not be interpreted.
    MalformedLine {
        /// Zero-based line index in the input.
        line: usize,
    },
    /// The embedded rule string was invalid.
    Rules(RuleError),
    /// A pattern block does not fit on the target board.
    DoesNotFit {
        /// X position of the offending cell (may be negative).
        x: i64,
        /// Y position of the offending cell (may be negative).
        y: i64,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pattern has no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells, expected {expected}"
            ),
            Self::UnknownFormat => write!(f, "unrecognized pattern format"),
            Self::MalformedLine { line } => write!(f, "malformed pattern line {line}"),
            Self::Rules(e) => write!(f, "embedded rules: {e}"),
            Self::DoesNotFit { x, y } => {
                write!(f, "pattern cell at ({x}, {y}) falls outside the board")
            }
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rules(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RuleError> for PatternError {
    fn from(e: RuleError) -> Self {
        Self::Rules(e)
    }
}

/// A rectangular grid of initial liveness values, with the rule set the
/// pattern was written for when the source format embeds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    rules: Option<RuleSet>,
}

impl Pattern {
    /// Build a pattern from ASCII rows, one character per cell.
    ///
    /// Cells equal to `alive` are live, everything else is dead. All rows
    /// must have the same length.
    pub fn from_rows(rows: &[&str], alive: char) -> Result<Self, PatternError> {
        let first = rows.first().ok_or(PatternError::Empty)?;
        let width = first.chars().count();
        if width == 0 {
            return Err(PatternError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(PatternError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            cells.extend(line.chars().map(|c| c == alive));
        }
        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            cells,
            rules: None,
        })
    }

    /// Parse a Life 1.05 document onto a `width` × `height` board.
    ///
    /// `#P x y` block positions are relative to the board center, as in
    /// the original format. `#R <survival>/<birth>` embeds a rule set;
    /// `#N` selects Conway. Cells that land off the board are an error,
    /// not silently dropped.
    pub fn parse_life_1_05(text: &str, width: u32, height: u32) -> Result<Self, PatternError> {
        let mut lines = text.lines().enumerate();
        match lines.next() {
            Some((_, header)) if header.trim_end().starts_with("#Life 1.05") => {}
            _ => return Err(PatternError::UnknownFormat),
        }

        let center_x = (width / 2) as i64;
        let center_y = (height / 2) as i64;
        let mut cells = vec![false; (width as usize) * (height as usize)];
        let mut rules = None;
        // Row cursor within the current #P block.
        let mut origin: Option<(i64, i64)> = None;
        let mut cursor_y = 0i64;

        for (line_no, raw) in lines {
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with("#D") {
                continue;
            }
            if line == "#N" {
                rules = Some(RuleSet::CONWAY);
                continue;
            }
            if let Some(rest) = line.strip_prefix("#R ") {
                let (survive, birth) = rest
                    .trim()
                    .split_once('/')
                    .ok_or(PatternError::MalformedLine { line: line_no })?;
                rules = Some(format!("B{birth}/S{survive}").parse()?);
                continue;
            }
            if let Some(rest) = line.strip_prefix("#P") {
                let mut parts = rest.split_whitespace();
                let x: i64 = parts
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or(PatternError::MalformedLine { line: line_no })?;
                let y: i64 = parts
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or(PatternError::MalformedLine { line: line_no })?;
                origin = Some((center_x + x, center_y + y));
                cursor_y = 0;
                continue;
            }
            if line.starts_with('#') {
                // Unknown directive; the original reader skipped these.
                continue;
            }

            let (origin_x, origin_y) =
                origin.ok_or(PatternError::MalformedLine { line: line_no })?;
            for (col, c) in line.chars().enumerate() {
                let alive = match c {
                    '*' => true,
                    '.' => false,
                    _ => return Err(PatternError::MalformedLine { line: line_no }),
                };
                if !alive {
                    continue;
                }
                let x = origin_x + col as i64;
                let y = origin_y + cursor_y;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    return Err(PatternError::DoesNotFit { x, y });
                }
                cells[(y as usize) * (width as usize) + (x as usize)] = true;
            }
            cursor_y += 1;
        }

        Ok(Self {
            width,
            height,
            cells,
            rules,
        })
    }

    /// Pattern width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pattern height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rule set embedded in the source, if any.
    pub fn rules(&self) -> Option<RuleSet> {
        self.rules
    }

    /// Liveness of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the pattern.
    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height);
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| (i as u32 % self.width, i as u32 / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ASCII rows ──────────────────────────────────────────────

    #[test]
    fn from_rows_reads_liveness() {
        let pattern = Pattern::from_rows(&[".#.", "###", "..."], '#').unwrap();
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 3);
        assert!(pattern.is_alive(1, 0));
        assert!(!pattern.is_alive(0, 0));
        let live: Vec<_> = pattern.live_cells().collect();
        assert_eq!(live, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert_eq!(
            Pattern::from_rows(&["...", ".."], '#'),
            Err(PatternError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(Pattern::from_rows(&[], '#'), Err(PatternError::Empty));
        assert_eq!(Pattern::from_rows(&[""], '#'), Err(PatternError::Empty));
    }

    // ── Life 1.05 ───────────────────────────────────────────────

    #[test]
    fn life_1_05_centers_blocks_and_reads_rules() {
        let text = "#Life 1.05\n#D a blinker\n#R 23/3\n#P -1 0\n***\n";
        let pattern = Pattern::parse_life_1_05(text, 10, 10).unwrap();
        assert_eq!(pattern.rules(), Some(RuleSet::CONWAY));
        // Center of a 10x10 board is (5, 5); block at (-1, 0) puts the
        // row at x = 4..7, y = 5.
        let live: Vec<_> = pattern.live_cells().collect();
        assert_eq!(live, vec![(4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn life_1_05_default_rules_directive() {
        let text = "#Life 1.05\n#N\n#P 0 0\n*\n";
        let pattern = Pattern::parse_life_1_05(text, 4, 4).unwrap();
        assert_eq!(pattern.rules(), Some(RuleSet::CONWAY));
        assert!(pattern.is_alive(2, 2));
    }

    #[test]
    fn life_1_05_multiple_blocks() {
        let text = "#Life 1.05\n#N\n#P -2 -2\n**\n**\n#P 1 1\n*\n";
        let pattern = Pattern::parse_life_1_05(text, 8, 8).unwrap();
        let live: Vec<_> = pattern.live_cells().collect();
        assert_eq!(live, vec![(2, 2), (3, 2), (2, 3), (3, 3), (5, 5)]);
    }

    #[test]
    fn life_1_05_rejects_bad_input() {
        assert_eq!(
            Pattern::parse_life_1_05("*\n", 4, 4),
            Err(PatternError::UnknownFormat)
        );
        assert_eq!(
            Pattern::parse_life_1_05("#Life 1.05\n*\n", 4, 4),
            Err(PatternError::MalformedLine { line: 1 }),
            "cell rows before any #P block"
        );
        assert_eq!(
            Pattern::parse_life_1_05("#Life 1.05\n#P 0 0\nx\n", 4, 4),
            Err(PatternError::MalformedLine { line: 2 })
        );
        assert!(matches!(
            Pattern::parse_life_1_05("#Life 1.05\n#R 23/9\n", 4, 4),
            Err(PatternError::Rules(RuleError::CountOutOfRange { found: 9 }))
        ));
    }

    #[test]
    fn life_1_05_rejects_cells_off_the_board() {
        let text = "#Life 1.05\n#N\n#P 3 3\n**\n";
        assert_eq!(
            Pattern::parse_life_1_05(text, 4, 4),
            Err(PatternError::DoesNotFit { x: 5, y: 5 })
        );
    }
}

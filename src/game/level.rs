//! Maze levels.
//!
//! A level is written as ASCII art, one string per row:
//!
//! ```text
//! S....
//! ####.
//! ...#.
//! .#.#.
//! ....G
//! ```
//!
//! `.` is an open cell, `#` a wall, `S` the digger's start and `G` the treasure. Both markers
//! sit on open cells. Custom level packs are JSON arrays of `{ "name": ..., "grid": [...] }`.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{CANVAS_SIZE, CELL_COLUMNS, MAX_CELL_SIZE};
use crate::game::board::{Board, Cell, CellPos};

/// Taller grids would get cells smaller than one pixel.
pub const MAX_ROWS: usize = CANVAS_SIZE as usize;
/// Wider grids would not fit a terminal row once drawn with their border.
pub const MAX_COLUMNS: usize = ((u16::MAX - 2) / CELL_COLUMNS) as usize;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("cannot read level file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid level file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level pack contains no levels")]
    NoLevels,
    #[error("level {name:?} has an empty grid")]
    EmptyGrid { name: String },
    #[error("level {name:?}: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level {name:?}: unknown cell {found:?} at row {row}, column {col}")]
    UnknownCell {
        name: String,
        row: usize,
        col: usize,
        found: char,
    },
    #[error("level {name:?} is too large: {rows}x{cols}, at most {}x{}", MAX_ROWS, MAX_COLUMNS)]
    TooLarge {
        name: String,
        rows: usize,
        cols: usize,
    },
    #[error("level {name:?} needs exactly one {marker:?} marker, found {count}")]
    Marker {
        name: String,
        marker: char,
        count: usize,
    },
}

/// Level description as stored in a level pack file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelSpec {
    pub name: String,
    pub grid: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub board: Board,
    pub start: CellPos,
    pub goal: CellPos,
    /// Edge length of a cell, in pixels.
    pub cell_size: f64,
}

impl Level {
    /// Parse an ASCII art grid.
    ///
    /// # Errors
    ///
    /// Fails when the grid is empty or larger than [`MAX_ROWS`] x [`MAX_COLUMNS`], when the
    /// rows differ in length, on unknown characters, or when the start or goal marker is missing
    /// or repeated.
    pub fn parse<S: AsRef<str>>(name: &str, rows: &[S]) -> Result<Self, LevelError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 {
            return Err(LevelError::EmptyGrid {
                name: name.to_string(),
            });
        }
        if rows.len() > MAX_ROWS || width > MAX_COLUMNS {
            return Err(LevelError::TooLarge {
                name: name.to_string(),
                rows: rows.len(),
                cols: width,
            });
        }

        let mut cells = Vec::with_capacity(rows.len());
        let mut starts = Vec::new();
        let mut goals = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    name: name.to_string(),
                    row,
                    expected: width,
                    found,
                });
            }

            let mut row_cells = Vec::with_capacity(width);
            for (col, c) in line.chars().enumerate() {
                let cell = match c {
                    '.' => Cell::Open,
                    '#' => Cell::Wall,
                    'S' => {
                        starts.push(CellPos::new(row, col));
                        Cell::Open
                    }
                    'G' => {
                        goals.push(CellPos::new(row, col));
                        Cell::Open
                    }
                    _ => {
                        return Err(LevelError::UnknownCell {
                            name: name.to_string(),
                            row,
                            col,
                            found: c,
                        })
                    }
                };
                row_cells.push(cell);
            }
            cells.push(row_cells);
        }

        let start = single_marker(name, 'S', &starts)?;
        let goal = single_marker(name, 'G', &goals)?;
        let cell_size = cell_size_for(rows.len());

        debug!("Parsed level {name:?}: {}x{width}, cell size {cell_size}", rows.len());

        Ok(Self {
            name: name.to_string(),
            board: Board::from_rows(cells),
            start,
            goal,
            cell_size,
        })
    }

    pub fn from_spec(spec: &LevelSpec) -> Result<Self, LevelError> {
        Self::parse(&spec.name, spec.grid.as_slice())
    }

    /// Board size in pixels, as (width, height).
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            self.board.cols() as f64 * self.cell_size,
            self.board.rows() as f64 * self.cell_size,
        )
    }
}

fn single_marker(name: &str, marker: char, found: &[CellPos]) -> Result<CellPos, LevelError> {
    match found {
        [pos] => Ok(*pos),
        _ => Err(LevelError::Marker {
            name: name.to_string(),
            marker,
            count: found.len(),
        }),
    }
}

/// Smaller cells for taller mazes so that every board fits the same canvas.
pub fn cell_size_for(rows: usize) -> f64 {
    let fitted = CANVAS_SIZE / rows.max(1) as u32;
    MAX_CELL_SIZE.min(fitted) as f64
}

/// Load a level pack from a JSON file.
pub fn load_levels(path: &Path) -> Result<Vec<Level>, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&text)?;
    info!("Loaded {} levels from {path:?}", levels.len());
    Ok(levels)
}

pub fn parse_levels(json: &str) -> Result<Vec<Level>, LevelError> {
    let specs: Vec<LevelSpec> = serde_json::from_str(json)?;
    if specs.is_empty() {
        return Err(LevelError::NoLevels);
    }
    specs.iter().map(Level::from_spec).collect()
}

const BUILTIN_LEVELS: [(&str, &[&str]); 5] = [
    (
        "Very simple",
        &[
            "S....",
            "####.",
            "...#.",
            ".#.#.",
            "....G",
        ],
    ),
    (
        "Slightly more complex",
        &[
            "S#....",
            ".#.##.",
            "...#..",
            "##.#.#",
            ".....#",
            ".###.G",
        ],
    ),
    (
        "A bit more challenging",
        &[
            "S.#....",
            "#.#.##.",
            "....#..",
            ".##.#.#",
            "..#...#",
            "#.###..",
            "......G",
        ],
    ),
    (
        "Long tunnel",
        &[
            "S...#...",
            "###.#.#.",
            "....#.#.",
            ".####.#.",
            "......#.",
            "#####.#.",
            "......#.",
            ".######G",
        ],
    ),
    (
        "Treasure cave",
        &[
            "S.#......",
            "..#.####.",
            ".##.#....",
            "....#.###",
            "###.#...#",
            "....###.#",
            ".####...#",
            "......#.G",
            "#####...#",
        ],
    ),
];

/// The hand-authored levels shipped with the game, easiest first.
pub fn builtin_levels() -> Vec<Level> {
    BUILTIN_LEVELS
        .iter()
        .filter_map(|(name, rows)| Level::parse(name, *rows).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    fn solvable(level: &Level) -> bool {
        let mut seen = HashSet::from([level.start]);
        let mut queue = VecDeque::from([level.start]);
        while let Some(pos) = queue.pop_front() {
            if pos == level.goal {
                return true;
            }
            let mut next = vec![
                CellPos::new(pos.row + 1, pos.col),
                CellPos::new(pos.row, pos.col + 1),
            ];
            if pos.row > 0 {
                next.push(CellPos::new(pos.row - 1, pos.col));
            }
            if pos.col > 0 {
                next.push(CellPos::new(pos.row, pos.col - 1));
            }
            for n in next {
                if level.board.is_open(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        false
    }

    #[test]
    fn builtin_levels_all_parse_and_are_solvable() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), BUILTIN_LEVELS.len());
        for level in &levels {
            assert!(solvable(level), "level {:?} has no path", level.name);
        }
    }

    #[test]
    fn first_level_matches_the_original_layout() {
        let level = &builtin_levels()[0];
        assert_eq!(level.start, CellPos::new(0, 0));
        assert_eq!(level.goal, CellPos::new(4, 4));
        assert_eq!(level.board.get(CellPos::new(1, 0)), Some(Cell::Wall));
        assert_eq!(level.board.get(CellPos::new(1, 4)), Some(Cell::Open));
        assert_eq!(level.cell_size, 60.0);
        assert_eq!(level.pixel_size(), (300.0, 300.0));
    }

    #[test]
    fn cell_size_shrinks_with_taller_grids() {
        assert_eq!(cell_size_for(5), 60.0);
        assert_eq!(cell_size_for(7), 57.0);
        assert_eq!(cell_size_for(9), 44.0);
        assert_eq!(cell_size_for(0), 60.0);
    }

    #[test]
    fn parse_rejects_bad_grids() {
        let empty: [&str; 0] = [];
        assert!(matches!(Level::parse("e", &empty), Err(LevelError::EmptyGrid { .. })));
        assert!(matches!(
            Level::parse("r", &["S..", ".G"]),
            Err(LevelError::RaggedRow { row: 1, expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            Level::parse("u", &["S.x", "..G"]),
            Err(LevelError::UnknownCell { row: 0, col: 2, found: 'x', .. })
        ));
        assert!(matches!(
            Level::parse("m", &["...", "..G"]),
            Err(LevelError::Marker { marker: 'S', count: 0, .. })
        ));
        assert!(matches!(
            Level::parse("d", &["S.G", "..G"]),
            Err(LevelError::Marker { marker: 'G', count: 2, .. })
        ));
    }

    #[test]
    fn parse_rejects_oversized_grids() {
        let mut tall = vec!["."; MAX_ROWS + 1];
        tall[0] = "S";
        tall[MAX_ROWS] = "G";
        assert!(matches!(
            Level::parse("tall", tall.as_slice()),
            Err(LevelError::TooLarge { rows, cols: 1, .. }) if rows == MAX_ROWS + 1
        ));

        let wide = format!("S{}G", ".".repeat(MAX_COLUMNS - 1));
        assert!(matches!(
            Level::parse("wide", &[wide]),
            Err(LevelError::TooLarge { rows: 1, cols, .. }) if cols == MAX_COLUMNS + 1
        ));
    }

    #[test]
    fn largest_grids_stay_playable() {
        let mut tall = vec!["."; MAX_ROWS];
        tall[0] = "S";
        tall[MAX_ROWS - 1] = "G";
        let level = Level::parse("tall", tall.as_slice()).unwrap();
        assert_eq!(level.cell_size, 1.0);
        let (width, height) = level.pixel_size();
        assert_eq!((width, height), (1.0, MAX_ROWS as f64));

        let mut engine = crate::game::trail::TrailEngine::new(&level);
        assert!(engine.begin_trail(crate::game::Point::new(0.5, 0.5)));

        let wide = format!("S{}G", ".".repeat(MAX_COLUMNS - 2));
        let level = Level::parse("wide", &[wide]).unwrap();
        assert_eq!(level.board.cols(), MAX_COLUMNS);
        assert!(level.board.cols() as u64 * CELL_COLUMNS as u64 + 2 <= u16::MAX as u64);
        assert!(level.board.rows() as u64 * crate::constants::CELL_ROWS as u64 + 2 <= u16::MAX as u64);
    }

    #[test]
    fn parse_level_pack_json() {
        let json = r#"[
            { "name": "tiny", "grid": ["S#", ".G"] },
            { "name": "line", "grid": ["S..G"] }
        ]"#;
        let levels = parse_levels(json).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].name, "tiny");
        assert_eq!(levels[1].goal, CellPos::new(0, 3));
        assert_eq!(levels[1].cell_size, 60.0);
    }

    #[test]
    fn sample_level_pack_is_playable() {
        let levels = parse_levels(include_str!("../../levels/garden.json")).unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.iter().all(solvable));
    }

    #[test]
    fn parse_level_pack_errors() {
        assert!(matches!(parse_levels("[]"), Err(LevelError::NoLevels)));
        assert!(matches!(parse_levels("{"), Err(LevelError::Json(_))));
        assert!(matches!(
            parse_levels(r#"[{ "name": "bad", "grid": ["S.", "."] }]"#),
            Err(LevelError::RaggedRow { .. })
        ));
    }

    #[test]
    fn load_levels_reports_missing_file() {
        let err = load_levels(Path::new("/nonexistent/levels.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}

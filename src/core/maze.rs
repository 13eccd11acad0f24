//! Map loading: grid, keys, doors, start and goal.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub const WALL: char = 'W';
pub const START: char = 'S';
pub const GOAL: char = 'G';

/// Squared goal radius (0.5 world units).
const GOAL_RADIUS_SQ: f32 = 0.25;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("could not open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read map dimensions from {line:?}")]
    Dimensions { line: String },
    #[error("row {row} is missing (map declares {height} rows)")]
    MissingRow { row: usize, height: usize },
    #[error("row {row} has length {found}, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
}

/// Tile coordinate in file order (row 0 = first map line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub col: usize,
    pub row: usize,
}

impl TilePos {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub pos: TilePos,
    pub id: char,
    pub picked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub pos: TilePos,
    pub id: char,
    pub key_id: char,
    pub unlocked: bool,
}

#[inline]
pub fn is_key(c: char) -> bool {
    ('a'..='e').contains(&c)
}

#[inline]
pub fn is_door(c: char) -> bool {
    ('A'..='E').contains(&c)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    /// Rows in file order.
    pub grid: Vec<Vec<char>>,
    pub start: Option<TilePos>,
    pub goal: Option<TilePos>,
    pub keys: Vec<Key>,
    pub doors: Vec<Door>,
}

impl Map {
    /// Parses the text form: a `<width> <height>` line followed by `height`
    /// rows of exactly `width` characters.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or("");
        let (width, height) = parse_dimensions(header)?;

        let mut map = Map {
            width,
            height,
            grid: Vec::with_capacity(height),
            start: None,
            goal: None,
            keys: Vec::new(),
            doors: Vec::new(),
        };

        for row in 0..height {
            let line = lines.next().ok_or(MapError::MissingRow { row, height })?;
            // a lone trailing '\r' survives `lines()`
            let line = line.trim_end_matches(['\r', '\n']);
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != width {
                return Err(MapError::RowLength { row, expected: width, found: cells.len() });
            }

            for (col, &ch) in cells.iter().enumerate() {
                let pos = TilePos::new(col, row);
                if is_key(ch) {
                    map.keys.push(Key { pos, id: ch, picked: false });
                } else if is_door(ch) {
                    map.doors.push(Door {
                        pos,
                        id: ch,
                        key_id: ch.to_ascii_lowercase(),
                        unlocked: false,
                    });
                } else if ch == START {
                    map.start = Some(pos);
                } else if ch == GOAL {
                    map.goal = Some(pos);
                }
            }
            debug!("{line}");
            map.grid.push(cells);
        }

        info!(
            "map {}x{} loaded: {} keys, {} doors",
            map.width,
            map.height,
            map.keys.len(),
            map.doors.len()
        );
        Ok(map)
    }

    /// Converts a gameplay row (0 = bottom) to a grid row (0 = first line).
    #[inline]
    pub fn grid_row(&self, gameplay_row: usize) -> usize {
        self.height - 1 - gameplay_row
    }

    /// Centre of a tile in gameplay space.
    pub fn tile_center(&self, pos: TilePos) -> (f32, f32) {
        (pos.col as f32 + 0.5, self.grid_row(pos.row) as f32 + 0.5)
    }

    pub fn goal_center(&self) -> Option<(f32, f32)> {
        self.goal.map(|g| self.tile_center(g))
    }

    /// All 'G' tiles in file order. Only the last one is `goal`.
    pub fn goal_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &ch)| ch == GOAL)
                .map(move |(col, _)| TilePos::new(col, row))
        })
    }

    /// True when (x, y) lies within 0.5 units of the goal centre.
    pub fn reaches_goal(&self, x: f32, y: f32) -> bool {
        match self.goal_center() {
            Some((gx, gy)) => {
                let dx = x - gx;
                let dy = y - gy;
                dx * dx + dy * dy <= GOAL_RADIUS_SQ
            }
            None => false,
        }
    }
}

fn parse_dimensions(line: &str) -> Result<(usize, usize), MapError> {
    let bad = || MapError::Dimensions { line: line.to_string() };
    let mut parts = line.split_whitespace();
    let width: usize = parts.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    let height: usize = parts.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    if parts.next().is_some() || width == 0 || height == 0 {
        return Err(bad());
    }
    Ok((width, height))
}

pub fn load_map(path: impl AsRef<Path>) -> Result<Map, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Map::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grid_and_entities() {
        let map = Map::parse("5 3\nWWWWW\nSa.AG\nWWWWW\n").unwrap();
        assert_eq!(map.width, 5);
        assert_eq!(map.height, 3);
        assert_eq!(map.grid.len(), 3);
        assert!(map.grid.iter().all(|r| r.len() == 5));
        assert_eq!(map.start, Some(TilePos::new(0, 1)));
        assert_eq!(map.goal, Some(TilePos::new(4, 1)));
        assert_eq!(
            map.keys,
            vec![Key { pos: TilePos::new(1, 1), id: 'a', picked: false }]
        );
        assert_eq!(
            map.doors,
            vec![Door { pos: TilePos::new(3, 1), id: 'A', key_id: 'a', unlocked: false }]
        );
    }

    #[test]
    fn door_key_id_is_lowercase_of_door() {
        let map = Map::parse("5 1\nABCDE").unwrap();
        let ids: Vec<(char, char)> = map.doors.iter().map(|d| (d.id, d.key_id)).collect();
        assert_eq!(ids, vec![('A', 'a'), ('B', 'b'), ('C', 'c'), ('D', 'd'), ('E', 'e')]);
        assert!(map.doors.iter().all(|d| !d.unlocked));
    }

    #[test]
    fn letters_outside_range_are_plain_tiles() {
        let map = Map::parse("4 1\nfFzZ").unwrap();
        assert!(map.keys.is_empty());
        assert!(map.doors.is_empty());
        assert_eq!(map.grid[0], vec!['f', 'F', 'z', 'Z']);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let map = Map::parse("3 2\r\nS.G\r\nW.W\r\n").unwrap();
        assert_eq!(map.grid[1], vec!['W', '.', 'W']);
    }

    #[test]
    fn trailing_lines_are_ignored() {
        let map = Map::parse("2 1\nSG\nthis is not part of the map\n").unwrap();
        assert_eq!(map.grid.len(), 1);
    }

    #[test]
    fn duplicate_start_overwrites() {
        let map = Map::parse("3 2\nS..\n..S").unwrap();
        assert_eq!(map.start, Some(TilePos::new(2, 1)));
    }

    #[test]
    fn every_goal_tile_is_listed() {
        let map = Map::parse("3 2\nG.S\n..G").unwrap();
        let goals: Vec<TilePos> = map.goal_tiles().collect();
        assert_eq!(goals, vec![TilePos::new(0, 0), TilePos::new(2, 1)]);
        assert_eq!(map.goal, Some(TilePos::new(2, 1)));
    }

    #[test]
    fn duplicate_keys_share_an_id() {
        let map = Map::parse("3 1\na.a").unwrap();
        assert_eq!(map.keys.len(), 2);
        assert!(map.keys.iter().all(|k| k.id == 'a'));
    }

    #[test]
    fn rejects_bad_dimensions() {
        for text in ["", "4\nS..G", "x 1\nS..G", "0 1\n", "4 0\n", "4 1 2\nS..G", "-4 1\nS..G"] {
            assert!(
                matches!(Map::parse(text), Err(MapError::Dimensions { .. })),
                "{text:?} should fail on dimensions"
            );
        }
    }

    #[test]
    fn rejects_missing_row() {
        let err = Map::parse("3 3\nS..\n..G\n").unwrap_err();
        assert!(matches!(err, MapError::MissingRow { row: 2, height: 3 }));
    }

    #[test]
    fn rejects_wrong_row_length() {
        let err = Map::parse("3 2\nS..\n..GW\n").unwrap_err();
        assert!(matches!(err, MapError::RowLength { row: 1, expected: 3, found: 4 }));

        let err = Map::parse("3 2\nS..\n\n").unwrap_err();
        assert!(matches!(err, MapError::RowLength { row: 1, expected: 3, found: 0 }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_map("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here.txt"));
    }

    #[test]
    fn gameplay_rows_are_inverted() {
        let map = Map::parse("2 3\nG.\n..\nS.").unwrap();
        assert_eq!(map.grid_row(0), 2);
        assert_eq!(map.grid_row(2), 0);
        assert_eq!(map.tile_center(map.start.unwrap()), (0.5, 0.5));
        assert_eq!(map.goal_center(), Some((0.5, 2.5)));
    }

    #[test]
    fn goal_radius_is_half_a_unit() {
        let map = Map::parse("4 1\nS..G").unwrap();
        assert!(map.reaches_goal(3.5, 0.5));
        assert!(map.reaches_goal(3.0, 0.5));
        assert!(!map.reaches_goal(2.9, 0.5));

        let no_goal = Map::parse("2 1\nS.").unwrap();
        assert!(!no_goal.reaches_goal(1.5, 0.5));
    }
}

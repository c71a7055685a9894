//! Line-oriented map text format.
//!
//! ## Format
//!
//! ```text
//! rows <N>
//! cols <N>
//! start <x>,<y>      (optional)
//! goal <x>,<y>       (optional)
//! <N lines of <cols> characters: '@' blocked, '.' traversable>
//! ```
//!
//! Only traversability and the two markers survive a round trip. `start` and
//! `goal` lines may appear anywhere after the header; trailing whitespace and
//! blank lines are ignored.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::cell::Cell;
use crate::geom::Point;
use crate::grid::Grid;

/// Errors that can occur when reading a map.
#[derive(Debug)]
pub enum MapError {
    /// The underlying reader or writer failed.
    Io(io::Error),
    /// The `rows` or `cols` header line is absent.
    MissingHeader { key: &'static str },
    /// A header line did not hold a non-negative integer.
    InvalidHeader { line: usize, content: String },
    /// A `start`/`goal` line did not hold an `x,y` pair.
    InvalidCoordinate { line: usize, content: String },
    /// A row contains something other than `@` or `.`.
    InvalidChar { ch: char, pos: Point },
    /// A row is not exactly `cols` characters wide.
    RowWidth { row: usize, expected: i32, found: usize },
    /// The number of rows differs from the header.
    RowCount { expected: i32, found: usize },
    /// A marker lies outside the grid.
    EndpointOutOfBounds { which: &'static str, pos: Point },
    /// A marker lies on a blocked cell.
    EndpointBlocked { which: &'static str, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map: i/o error: {e}"),
            Self::MissingHeader { key } => write!(f, "map: missing `{key}` header"),
            Self::InvalidHeader { line, content } => {
                write!(f, "map: invalid header on line {line}: {content:?}")
            }
            Self::InvalidCoordinate { line, content } => {
                write!(f, "map: invalid coordinate on line {line}: {content:?}")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character {ch:?} at {pos}")
            }
            Self::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "map: row {row} has {found} cells, expected {expected}"),
            Self::RowCount { expected, found } => {
                write!(f, "map: found {found} rows, expected {expected}")
            }
            Self::EndpointOutOfBounds { which, pos } => {
                write!(f, "map: {which} {pos} is outside the grid")
            }
            Self::EndpointBlocked { which, pos } => {
                write!(f, "map: {which} {pos} is on a blocked cell")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

type NumberedLines<'a> = std::iter::Enumerate<std::str::Lines<'a>>;

fn header(lines: &mut NumberedLines<'_>, key: &'static str) -> Result<i32, MapError> {
    let (i, line) = lines.next().ok_or(MapError::MissingHeader { key })?;
    let mut parts = line.split_whitespace();
    if parts.next() != Some(key) {
        return Err(MapError::MissingHeader { key });
    }
    let invalid = || MapError::InvalidHeader {
        line: i + 1,
        content: line.to_string(),
    };
    let value: i32 = parts.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
    if value < 0 || parts.next().is_some() {
        return Err(invalid());
    }
    Ok(value)
}

fn coordinate(line_no: usize, line: &str) -> Result<Point, MapError> {
    let invalid = || MapError::InvalidCoordinate {
        line: line_no,
        content: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    parts.next();
    let pair = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}

/// Parse a map from its text form.
pub fn parse(text: &str) -> Result<Grid, MapError> {
    let mut lines = text.lines().enumerate();
    let rows = header(&mut lines, "rows")?;
    let cols = header(&mut lines, "cols")?;

    // Walls are collected first so the grid is only allocated once the row
    // count and widths match the header.
    let mut walls = Vec::new();
    let mut start = None;
    let mut goal = None;
    let mut y = 0usize;

    for (i, raw) in lines {
        let line = raw.trim_end();
        if line.starts_with("start") {
            start = Some(coordinate(i + 1, line)?);
            continue;
        }
        if line.starts_with("goal") {
            goal = Some(coordinate(i + 1, line)?);
            continue;
        }
        // Blank lines only stand for rows in a zero-width grid.
        if line.is_empty() && (cols > 0 || y >= rows as usize) {
            continue;
        }
        if y >= rows as usize {
            return Err(MapError::RowCount {
                expected: rows,
                found: y + 1,
            });
        }
        let width = line.chars().count();
        if width != cols as usize {
            return Err(MapError::RowWidth {
                row: y,
                expected: cols,
                found: width,
            });
        }
        for (x, ch) in line.chars().enumerate() {
            let pos = Point::new(x as i32, y as i32);
            let cell = Cell::from_char(ch).ok_or(MapError::InvalidChar { ch, pos })?;
            if !cell.traversable {
                walls.push(pos);
            }
        }
        y += 1;
    }

    if y != rows as usize {
        return Err(MapError::RowCount {
            expected: rows,
            found: y,
        });
    }

    let mut grid = Grid::new(rows, cols);
    for p in walls {
        // In bounds by the width and count checks above.
        let _ = grid.set_wall(p);
    }
    if let Some(p) = start {
        place(&mut grid, "start", p)?;
    }
    if let Some(p) = goal {
        place(&mut grid, "goal", p)?;
    }
    Ok(grid)
}

fn place(grid: &mut Grid, which: &'static str, pos: Point) -> Result<(), MapError> {
    match grid.at(pos) {
        None => Err(MapError::EndpointOutOfBounds { which, pos }),
        Some(c) if !c.traversable => Err(MapError::EndpointBlocked { which, pos }),
        Some(_) => {
            let placed = if which == "start" {
                grid.set_start(pos)
            } else {
                grid.set_goal(pos)
            };
            placed.map_err(|_| MapError::EndpointOutOfBounds { which, pos })
        }
    }
}

/// Read a map from a buffered reader.
pub fn read<R: BufRead>(mut reader: R) -> Result<Grid, MapError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}

/// Load a map from a file.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, MapError> {
    let path = path.as_ref();
    let grid = read(BufReader::new(File::open(path)?))?;
    log::debug!("Loaded map from: {}", path.display());
    Ok(grid)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write a map in text form.
pub fn write<W: Write>(grid: &Grid, mut writer: W) -> io::Result<()> {
    writeln!(writer, "rows {}", grid.rows())?;
    writeln!(writer, "cols {}", grid.cols())?;
    if let Some(p) = grid.start() {
        writeln!(writer, "start {},{}", p.x, p.y)?;
    }
    if let Some(p) = grid.goal() {
        writeln!(writer, "goal {},{}", p.x, p.y)?;
    }
    let mut line = String::with_capacity(grid.cols() as usize);
    for y in 0..grid.rows() {
        line.clear();
        if let Some(row) = grid.row(y) {
            line.extend(row.iter().map(|c| c.to_char()));
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Render a map to its text form.
pub fn to_text(grid: &Grid) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(grid, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Save a map to a file, replacing it if it exists.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), MapError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(grid, &mut writer)?;
    writer.flush()?;
    log::debug!("Map saved under: {}", path.display());
    Ok(())
}

//! The [`Grid`] type: a rows × cols traversability lattice with optional
//! start and goal markers.
//!
//! A `Grid` is a plain value. The editing methods keep one invariant at all
//! times: a set start or goal always refers to an in-bounds traversable cell.

use std::fmt;

use crate::cell::Cell;
use crate::geom::{Point, Range};

/// Errors raised by grid editing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside `0 ≤ x < cols`, `0 ≤ y < rows`.
    OutOfBounds { pos: Point, rows: i32, cols: i32 },
    /// The cell storage does not hold `rows * cols` cells.
    CellCount { rows: i32, cols: i32, found: usize },
    /// A start or goal marker sits on a blocked cell.
    MarkerBlocked { pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "grid: {pos} is outside the {rows}x{cols} grid")
            }
            Self::CellCount { rows, cols, found } => {
                write!(f, "grid: {found} cells do not fill a {rows}x{cols} grid")
            }
            Self::MarkerBlocked { pos } => write!(f, "grid: marker {pos} is on a blocked cell"),
        }
    }
}

impl std::error::Error for GridError {}

/// A 2D lattice of [`Cell`]s, addressed by `(x, y)` with `x` the column.
///
/// Deserialization checks the cell count and marker placement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridData"))]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Grid {
    /// Create a grid of the given dimensions, every cell traversable and no
    /// start or goal set.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![Cell::FLOOR; rows as usize * cols as usize],
            start: None,
            goal: None,
        }
    }

    /// Create a grid of the given dimensions with every cell set to `cell`.
    pub fn filled(rows: i32, cols: i32, cell: Cell) -> Self {
        let mut grid = Self::new(rows, cols);
        grid.cells.fill(cell);
        grid
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The bounding range `[(0, 0), (cols, rows))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.cols as usize + p.x as usize)
        } else {
            None
        }
    }

    fn check(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and traversable.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| c.traversable)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Place the start marker, making the cell traversable.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.check(p)?;
        self.cells[i] = Cell::FLOOR;
        self.start = Some(p);
        Ok(())
    }

    /// Place the goal marker, making the cell traversable.
    pub fn set_goal(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.check(p)?;
        self.cells[i] = Cell::FLOOR;
        self.goal = Some(p);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        self.start = None;
    }

    pub fn clear_goal(&mut self) {
        self.goal = None;
    }

    /// Block the cell at `p`. A start or goal marker on `p` is removed.
    pub fn set_wall(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.check(p)?;
        self.cells[i] = Cell::WALL;
        self.drop_markers_at(p);
        Ok(())
    }

    /// Open the cell at `p`. A start or goal marker on `p` is removed.
    pub fn erase(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.check(p)?;
        self.cells[i] = Cell::FLOOR;
        self.drop_markers_at(p);
        Ok(())
    }

    fn drop_markers_at(&mut self, p: Point) {
        if self.start == Some(p) {
            self.start = None;
        }
        if self.goal == Some(p) {
            self.goal = None;
        }
    }

    /// Replace the grid with a fresh, fully traversable one of the given size.
    pub fn resize(&mut self, rows: i32, cols: i32) {
        *self = Self::new(rows, cols);
    }

    /// Append the in-bounds traversable 4-neighbors of `p` to `buf`, in
    /// left, right, up, down order. The caller clears `buf` before calling.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.is_traversable(n) {
                buf.push(n);
            }
        }
    }

    /// The in-bounds traversable 4-neighbors of `p`, in left, right, up, down
    /// order.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf);
        buf
    }

    /// Number of traversable cells.
    pub fn count_traversable(&self) -> usize {
        self.cells.iter().filter(|c| c.traversable).count()
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// One row of cells, or `None` if `y` is out of range.
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.rows {
            return None;
        }
        let w = self.cols as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }
}

/// Serialized form of a [`Grid`], before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridData {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    goal: Option<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, GridError> {
        let GridData {
            rows,
            cols,
            cells,
            start,
            goal,
        } = data;
        let expected = usize::try_from(rows)
            .ok()
            .zip(usize::try_from(cols).ok())
            .and_then(|(r, c)| r.checked_mul(c));
        if expected != Some(cells.len()) {
            return Err(GridError::CellCount {
                rows,
                cols,
                found: cells.len(),
            });
        }
        let grid = Self {
            rows,
            cols,
            cells,
            start,
            goal,
        };
        for pos in [start, goal].into_iter().flatten() {
            let i = grid.check(pos)?;
            if !grid.cells[i].traversable {
                return Err(GridError::MarkerBlocked { pos });
            }
        }
        Ok(grid)
    }
}

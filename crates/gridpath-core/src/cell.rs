//! The [`Cell`] type: a single grid position's traversability.

/// A grid cell. Cells carry no identity beyond their coordinates; rendering
/// state belongs to whoever draws the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub traversable: bool,
}

impl Cell {
    /// An open cell.
    pub const FLOOR: Self = Self { traversable: true };
    /// A blocked cell.
    pub const WALL: Self = Self { traversable: false };

    /// The map-file character for this cell (`.` or `@`).
    #[inline]
    pub const fn to_char(self) -> char {
        if self.traversable { '.' } else { '@' }
    }

    /// Parse a map-file character.
    #[inline]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::FLOOR),
            '@' => Some(Self::WALL),
            _ => None,
        }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::FLOOR
    }
}

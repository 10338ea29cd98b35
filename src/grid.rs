use crate::error::{Result, TourError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knight offsets in enumeration order. Warnsdorff ties keep this order, so
/// changing it changes which tour is found.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] =
    [(1, 2), (1, -2), (-1, 2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos {
    pub fn new(r: usize, c: usize) -> Self { Self { r, c } }
}

#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    // row-major, true once the knight has entered the cell
    visited: Vec<bool>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self> {
        let area = size.checked_mul(size).filter(|&a| a > 0).ok_or(TourError::InvalidSize { size })?;
        let mut visited = Vec::new();
        visited.try_reserve_exact(area).map_err(|_| TourError::InvalidSize { size })?;
        visited.resize(area, false);
        Ok(Self { size, visited })
    }

    pub fn size(&self) -> usize { self.size }
    pub fn area(&self) -> usize { self.size * self.size }

    pub fn contains(&self, p: Pos) -> bool { p.r < self.size && p.c < self.size }

    pub fn is_visited(&self, p: Pos) -> Result<bool> { Ok(self.visited[self.idx(p)?]) }

    pub fn mark_visited(&mut self, p: Pos, value: bool) -> Result<()> {
        let i = self.idx(p)?;
        self.visited[i] = value;
        Ok(())
    }

    pub fn clear(&mut self) { self.visited.fill(false); }

    pub fn visited_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.visited.iter().enumerate().filter(|&(_, &v)| v).map(move |(i, _)| Pos { r: i / size, c: i % size })
    }

    /// Cells one knight move away from `p` that lie on the board, visited or not.
    pub fn knight_targets(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        KNIGHT_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = p.r.checked_add_signed(dr)?;
            let c = p.c.checked_add_signed(dc)?;
            let q = Pos { r, c };
            self.contains(q).then_some(q)
        })
    }

    fn idx(&self, p: Pos) -> Result<usize> {
        if !self.contains(p) {
            return Err(TourError::OutOfBounds { row: p.r, col: p.c, size: self.size });
        }
        Ok(p.r * self.size + p.c)
    }
}

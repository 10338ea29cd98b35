use crate::{error::{Result, TourError}, grid::{Grid, Pos}, logger::DevLogger, utils::render_path};
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest board the recursive search is meant for: one stack frame per
/// visited cell, so 64x64 means 4096 nested calls. The iterative search has
/// no such ceiling.
pub const MAX_RECURSIVE_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    Recursive,
    /// Explicit frame stack; visits cells in the same order as `Recursive`.
    #[default]
    Iterative,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    /// Cells the search may enter before giving up with `TourError::Aborted`.
    pub step_limit: Option<u64>,
}

/// A finished tour, ready for playback.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    pub size: usize,
    pub start: Pos,
    pub path: Vec<Pos>,
}

pub struct TourSolver {
    grid: Grid,
    path: Vec<Pos>,
    config: SolverConfig,
    steps: u64,
    logger: DevLogger,
}

struct Frame {
    pos: Pos,
    remaining: std::vec::IntoIter<Pos>,
}

impl TourSolver {
    pub fn new(grid: Grid) -> Self { Self::with_config(grid, SolverConfig::default()) }

    pub fn with_config(grid: Grid, config: SolverConfig) -> Self {
        let path = Vec::with_capacity(grid.area());
        Self { grid, path, config, steps: 0, logger: DevLogger::disabled() }
    }

    pub fn with_logger(mut self, logger: DevLogger) -> Self { self.logger = logger; self }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn path(&self) -> &[Pos] { &self.path }
    pub fn into_path(self) -> Vec<Pos> { self.path }
    pub fn config(&self) -> SolverConfig { self.config }
    pub fn logger(&self) -> &DevLogger { &self.logger }

    /// Cells entered by the last `solve` call, backtracked ones included.
    pub fn steps(&self) -> u64 { self.steps }

    pub fn tour(&self) -> Option<Tour> {
        let start = *self.path.first()?;
        (self.path.len() == self.grid.area())
            .then(|| Tour { size: self.grid.size(), start, path: self.path.clone() })
    }

    /// Searches for an open tour from `(start_row, start_col)`.
    ///
    /// `Ok(true)` leaves the full tour in [`path`](Self::path). `Ok(false)`
    /// means every ordering was exhausted; the path is then empty and no cell
    /// is visited. An out-of-range start is rejected before anything changes.
    pub fn solve(&mut self, start_row: usize, start_col: usize) -> Result<bool> {
        let size = self.grid.size();
        let start = Pos::new(start_row, start_col);
        if !self.grid.contains(start) {
            return Err(TourError::StartOutOfRange { row: start_row, col: start_col, size });
        }

        self.reset();
        if self.config.algorithm == Algorithm::Recursive && size > MAX_RECURSIVE_SIZE {
            log::warn!("recursive search on a {size}x{size} board may exhaust the call stack; prefer Iterative");
        }
        log::info!("solving {size}x{size} from ({start_row}, {start_col}) with {:?}", self.config.algorithm);

        let outcome = self.search(start);
        match &outcome {
            Ok(true) => log::info!("tour found after {} steps", self.steps),
            Ok(false) => log::info!("no tour from ({start_row}, {start_col}) after {} steps", self.steps),
            Err(TourError::Aborted { steps }) => {
                log::warn!("search aborted after {steps} steps");
                if self.logger.is_enabled() {
                    if let Err(e) = self.logger.log("Aborted", &format!("Step limit of {steps} reached")) {
                        log::warn!("devlog: {e}");
                    }
                }
            }
            Err(e) => log::error!("search failed: {e}"),
        }
        // no partial results: any error leaves an empty path and a clear board
        if outcome.is_err() { self.clear_board(); }
        outcome
    }

    /// True when the visited flags mark exactly the cells on the path, each once.
    pub fn is_lockstep(&self) -> bool {
        self.grid.visited_cells().count() == self.path.len()
            && self.path.iter().all_unique()
            && self.path.iter().all(|&p| self.grid.is_visited(p).unwrap_or(false))
    }

    /// In-bounds, unvisited knight targets of `p`, in offset order.
    pub fn possible_moves(&self, p: Pos) -> Result<Vec<Pos>> {
        let mut moves = Vec::with_capacity(8);
        for q in self.grid.knight_targets(p) {
            if !self.grid.is_visited(q)? { moves.push(q); }
        }
        Ok(moves)
    }

    /// Warnsdorff ordering: fewest onward moves first. Stable, so equal counts
    /// keep offset order.
    pub fn ordered_moves(&self, p: Pos) -> Result<Vec<Pos>> {
        let scored = self
            .possible_moves(p)?
            .into_iter()
            .map(|q| -> Result<(usize, Pos)> { Ok((self.possible_moves(q)?.len(), q)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(scored.into_iter().sorted_by_key(|&(onward, _)| onward).map(|(_, q)| q).collect())
    }

    fn reset(&mut self) {
        self.clear_board();
        self.steps = 0;
    }

    fn clear_board(&mut self) {
        if !self.path.is_empty() { log::debug!("clearing path of {} cells", self.path.len()); }
        self.path.clear();
        self.grid.clear();
    }

    fn search(&mut self, start: Pos) -> Result<bool> {
        if self.logger.is_enabled() {
            let size = self.grid.size();
            self.logger.log("Initialization", &format!("Board {size}x{size}, start r{},c{}", start.r + 1, start.c + 1))?;
        }
        let found = match self.config.algorithm {
            Algorithm::Recursive => self.visit(start)?,
            Algorithm::Iterative => self.search_iterative(start)?,
        };
        if found && self.logger.is_enabled() {
            self.logger.log("Solved", &render_path(self.grid.size(), &self.path))?;
        }
        Ok(found)
    }

    fn enter(&mut self, p: Pos) -> Result<()> {
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit { return Err(TourError::Aborted { steps: limit }); }
        }
        self.steps += 1;
        self.grid.mark_visited(p, true)?;
        self.path.push(p);
        debug_assert!(self.is_lockstep());
        if self.logger.is_enabled() {
            let title = format!("Move {}: enter r{},c{}", self.path.len(), p.r + 1, p.c + 1);
            if let Err(e) = self.logger.log(&title, &render_path(self.grid.size(), &self.path)) {
                self.undo(p)?;
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn leave(&mut self, p: Pos) -> Result<()> {
        self.undo(p)?;
        log::trace!("backtrack from ({}, {})", p.r, p.c);
        if self.logger.is_enabled() {
            let title = format!("Backtrack from r{},c{} at depth {}", p.r + 1, p.c + 1, self.path.len() + 1);
            self.logger.log(&title, &render_path(self.grid.size(), &self.path))?;
        }
        Ok(())
    }

    // Reverses `enter` without logging; used while unwinding an error.
    fn undo(&mut self, p: Pos) -> Result<()> {
        debug_assert_eq!(self.path.last(), Some(&p));
        self.path.pop();
        self.grid.mark_visited(p, false)?;
        debug_assert!(self.is_lockstep());
        Ok(())
    }

    fn is_complete(&self) -> bool { self.path.len() == self.grid.area() }

    // Reference form: one call per cell. Every exit other than success undoes
    // this frame's `enter` before returning.
    fn visit(&mut self, p: Pos) -> Result<bool> {
        self.enter(p)?;
        if self.is_complete() { return Ok(true); }

        match self.extend(p) {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.leave(p)?;
                Ok(false)
            }
            Err(e) => {
                self.undo(p)?;
                Err(e)
            }
        }
    }

    fn extend(&mut self, p: Pos) -> Result<bool> {
        for next in self.ordered_moves(p)? {
            if self.visit(next)? { return Ok(true); }
        }
        Ok(false)
    }

    fn search_iterative(&mut self, start: Pos) -> Result<bool> {
        self.enter(start)?;
        if self.is_complete() { return Ok(true); }

        let mut stack = vec![Frame { pos: start, remaining: self.ordered_moves(start)?.into_iter() }];
        while let Some(frame) = stack.last_mut() {
            match frame.remaining.next() {
                Some(next) => {
                    if let Err(e) = self.enter(next) {
                        while let Some(f) = stack.pop() { self.undo(f.pos)?; }
                        return Err(e);
                    }
                    if self.is_complete() { return Ok(true); }
                    let remaining = self.ordered_moves(next)?.into_iter();
                    stack.push(Frame { pos: next, remaining });
                }
                None => {
                    let pos = frame.pos;
                    stack.pop();
                    self.leave(pos)?;
                }
            }
        }
        Ok(false)
    }
}

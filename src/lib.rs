pub mod error;
pub mod grid;
pub mod logger;
pub mod solver;
pub mod utils;

pub use error::TourError;
pub use grid::{Grid, Pos};
pub use solver::{Algorithm, SolverConfig, Tour, TourSolver};

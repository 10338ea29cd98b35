use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourError {
    #[error("board size {size} is unsupported (must be positive and the board must fit in memory)")]
    InvalidSize { size: usize },

    #[error("start ({row}, {col}) is outside a {size}x{size} board")]
    StartOutOfRange { row: usize, col: usize, size: usize },

    /// A grid read/write outside the board. Move filtering never produces one,
    /// so seeing this means the visited flags and the path fell out of step.
    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("search aborted after {steps} steps")]
    Aborted { steps: u64 },

    #[error("writing devlog: {0}")]
    Devlog(#[from] std::io::Error),
}

pub type Result<T, E = TourError> = std::result::Result<T, E>;

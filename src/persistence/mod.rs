//! Persistence layer for argument files and trajectories
//!
//! Argument files hold one flat parameter buffer as whitespace separated
//! numbers, in the layout decoded by [`Parameters::from_buffer`]. Trajectories
//! are written as one delimited line per time point.
//!
//! [`Parameters::from_buffer`]: crate::params::Parameters::from_buffer

pub mod reader;
pub mod writer;

pub use reader::{parse_arguments, read_arguments};
pub use writer::{trajectory_file_name, write_arguments, TrajectoryWriter};

use std::io;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Token that is not a number
    #[error("Invalid number '{token}' at position {position}")]
    Parse { position: usize, token: String },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

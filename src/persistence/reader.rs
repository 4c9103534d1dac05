//! Argument file reader

use super::{PersistenceError, PersistenceResult};
use std::fs;
use std::path::Path;
use swing_solver::Scalar;
use tracing::debug;

/// Read every number of an argument file.
///
/// Values may be separated by any mix of spaces and newlines.
pub fn read_arguments<T: Scalar>(path: impl AsRef<Path>) -> PersistenceResult<Vec<T>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let args = parse_arguments(&text)?;
    debug!("Read {} values from {:?}", args.len(), path);
    Ok(args)
}

/// Parse whitespace separated numbers. `position` in a parse error is the
/// zero-based index of the offending token.
pub fn parse_arguments<T: Scalar>(text: &str) -> PersistenceResult<Vec<T>> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<T>().map_err(|_| PersistenceError::Parse {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

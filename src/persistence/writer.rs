//! Argument file and trajectory writers

use super::PersistenceResult;
use crate::params::Parameters;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use swing_solver::{Scalar, Scheme, Trajectory};
use tracing::info;

/// Write parameters as an argument file readable by [`read_arguments`].
///
/// Values are printed with the shortest representation that parses back to
/// the same number, so a round trip is exact.
///
/// [`read_arguments`]: super::read_arguments
pub fn write_arguments<T: Scalar>(
    path: impl AsRef<Path>,
    params: &Parameters<T>,
) -> PersistenceResult<()> {
    let path = path.as_ref();
    create_parent(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    let buffer = params.to_buffer();
    let mut first = true;
    for value in &buffer {
        if !first {
            write!(writer, " ")?;
        }
        write!(writer, "{}", value)?;
        first = false;
    }
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote {} argument values to {:?}", buffer.len(), path);
    Ok(())
}

/// Writes a trajectory as one delimited line per time point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrajectoryWriter {
    pub delimiter: char,
}

impl Default for TrajectoryWriter {
    fn default() -> Self {
        Self { delimiter: ' ' }
    }
}

impl TrajectoryWriter {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn csv() -> Self {
        Self::new(',')
    }

    /// Comma for `.csv` files, space for everything else
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::csv(),
            _ => Self::default(),
        }
    }

    pub fn write<T: Scalar, W: Write>(
        &self,
        trajectory: &Trajectory<T>,
        mut writer: W,
    ) -> PersistenceResult<()> {
        for row in trajectory.rows() {
            let line: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write to a file, creating missing parent directories
    pub fn write_to_path<T: Scalar>(
        &self,
        trajectory: &Trajectory<T>,
        path: impl AsRef<Path>,
    ) -> PersistenceResult<()> {
        let path = path.as_ref();
        create_parent(path)?;
        self.write(trajectory, BufWriter::new(File::create(path)?))?;
        info!("Wrote {} time points to {:?}", trajectory.len(), path);
        Ok(())
    }
}

/// Output file name of a run, e.g. `rk4_N100E200S1000_f64.dat`
pub fn trajectory_file_name(
    scheme: Scheme,
    num_nodes: usize,
    num_edges: usize,
    num_steps: usize,
    bits: u32,
) -> String {
    format!("{}_N{}E{}S{}_f{}.dat", scheme, num_nodes, num_edges, num_steps, bits)
}

fn create_parent(path: &Path) -> PersistenceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

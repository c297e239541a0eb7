//! Per-scenario report files and the LaTeX index that collects them.
//!
//! For each scenario the output directory receives:
//!
//! - `<env>_case_<case>.txt`: the case flags, a blank line, and the four
//!   average powers
//! - `<env>_case_<case>.csv`: the full trajectory, one row per accepted step
//!
//! `thermal_sim.tex` adds one page per scenario that includes the
//! `thermal_sim/<env>_case_<case>.png` figure.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use spacetherm_network::{PowerChannel, Trajectory};
use thiserror::Error;

use crate::scenario::{Scenario, ScenarioResult};

/// Name of the LaTeX index written next to the per-scenario files.
pub const LATEX_INDEX: &str = "thermal_sim.tex";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("output directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// `<env>_case_<case>`, shared by every file of one scenario.
pub fn file_stem(environment: &str, case: &str) -> String {
    format!("{environment}_case_{case}")
}

/// The text summary: flags, a blank line, then one power per line.
pub fn summary_text(result: &ScenarioResult) -> String {
    format!("{}\n\n{}", result.flags, result.summary)
}

/// Writes a trajectory as CSV: `time_s`, one column per component
/// temperature in K, then the four accumulated energies in J.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn write_trajectory<W: io::Write>(trajectory: &Trajectory, wtr: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(wtr);

    let header = std::iter::once("time_s")
        .chain(trajectory.component_names().iter().map(String::as_str))
        .chain(PowerChannel::ALL.iter().map(|channel| channel.column()));
    wtr.write_record(header)?;

    for (time, state) in trajectory.times().iter().zip(trajectory.states()) {
        let record = std::iter::once(time)
            .chain(state.as_slice())
            .map(f64::to_string);
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// One `\newpage` section per scenario, in scenario order.
pub fn latex_index<'a>(scenarios: impl IntoIterator<Item = &'a Scenario>) -> String {
    let mut tex = String::new();
    for scenario in scenarios {
        let environment = scenario.destination.name();
        let case = &scenario.case.name;
        tex.push_str(&format!(
            "\\newpage \\textbf{{Thermal Sim - {environment} - {case}}}\n\n"
        ));
        tex.push_str(&format!(
            "\n    \\includegraphics[width=\\textwidth]{{thermal_sim/{}.png}}\n",
            file_stem(environment, case)
        ));
    }
    tex
}

/// Writes the `.txt` summary for one result and returns its path.
///
/// # Errors
///
/// Returns an error if `dir` is missing or the file cannot be written.
pub fn write_summary(dir: &Path, result: &ScenarioResult) -> Result<PathBuf, ReportError> {
    ensure_dir(dir)?;
    let path = dir.join(format!(
        "{}.txt",
        file_stem(&result.environment, result.case_name())
    ));
    fs::write(&path, summary_text(result)).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Writes the `.csv` trajectory for one result and returns its path.
///
/// # Errors
///
/// Returns an error if `dir` is missing or the file cannot be written.
pub fn write_trajectory_csv(dir: &Path, result: &ScenarioResult) -> Result<PathBuf, ReportError> {
    ensure_dir(dir)?;
    let path = dir.join(format!(
        "{}.csv",
        file_stem(&result.environment, result.case_name())
    ));
    let file = File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    write_trajectory(&result.trajectory, BufWriter::new(file)).map_err(|source| {
        ReportError::Csv {
            path: path.clone(),
            source,
        }
    })?;
    Ok(path)
}

/// Writes [`LATEX_INDEX`] for the given scenarios and returns its path.
///
/// # Errors
///
/// Returns an error if `dir` is missing or the file cannot be written.
pub fn write_latex_index<'a>(
    dir: &Path,
    scenarios: impl IntoIterator<Item = &'a Scenario>,
) -> Result<PathBuf, ReportError> {
    ensure_dir(dir)?;
    let path = dir.join(LATEX_INDEX);
    let io_error = |source| ReportError::Io {
        path: path.clone(),
        source,
    };

    let mut file = BufWriter::new(File::create(&path).map_err(io_error)?);
    file.write_all(latex_index(scenarios).as_bytes())
        .and_then(|()| file.flush())
        .map_err(io_error)?;
    Ok(path)
}

/// Writes every report for a batch of results, in result order.
///
/// # Errors
///
/// Stops at the first file that cannot be written.
pub fn write_reports(dir: &Path, results: &[ScenarioResult]) -> Result<Vec<PathBuf>, ReportError> {
    ensure_dir(dir)?;

    let mut written = Vec::with_capacity(2 * results.len() + 1);
    for result in results {
        for path in [
            write_summary(dir, result)?,
            write_trajectory_csv(dir, result)?,
        ] {
            tracing::info!(path = %path.display(), "wrote report");
            written.push(path);
        }
    }

    let index = write_latex_index(dir, results.iter().map(|result| &result.scenario))?;
    tracing::info!(path = %index.display(), "wrote LaTeX index");
    written.push(index);

    Ok(written)
}

fn ensure_dir(dir: &Path) -> Result<(), ReportError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ReportError::MissingDirectory(dir.to_owned()))
    }
}

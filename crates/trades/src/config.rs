//! Simulation settings and custom case files.

use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use spacetherm_solvers::transient::{self, dopri5};
use thiserror::Error;

use crate::cases::{self, Case};

/// A settings or case file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid simulation settings")]
    Invalid(#[source] transient::Error),

    #[error("end time must be finite and positive, got {0}")]
    InvalidEndTime(f64),

    #[error("{path} defines no cases")]
    NoCases { path: PathBuf },

    #[error("case `{name}` is defined more than once")]
    DuplicateCase { name: String },

    #[error("case name `{name}` cannot be used as a file name")]
    InvalidCaseName { name: String },

    #[error("Euler step must be finite and positive, got {0}")]
    InvalidEulerStep(f64),
}

/// Integrator used for every scenario in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Adaptive Dormand–Prince 5(4).
    #[default]
    Dopri5,
    /// Fixed-step forward Euler with [`SimulationConfig::euler_step`].
    Euler,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dopri5 => "dopri5",
            Self::Euler => "euler",
        })
    }
}

/// An unrecognised integrator name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method `{0}`, expected dopri5 or euler")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dopri5" => Ok(Self::Dopri5),
            "euler" => Ok(Self::Euler),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// Integration settings shared by every scenario in a run.
///
/// ```toml
/// t_end = 5.0e5
/// abs_tol = 1.0e-2
/// max_step = 1.0e3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// End time of every scenario, s.
    pub t_end: f64,
    pub abs_tol: f64,
    pub rel_tol: f64,
    /// Initial step size, chosen automatically when absent.
    pub first_step: Option<f64>,
    /// Largest step size, unbounded when absent.
    pub max_step: Option<f64>,
    pub method: Method,
    /// Target step size for [`Method::Euler`], s. Shortened so a whole
    /// number of steps lands on `t_end`.
    pub euler_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_end: 1.0e6,
            abs_tol: 1.0e-2,
            rel_tol: 1.0e-3,
            first_step: None,
            max_step: None,
            method: Method::Dopri5,
            euler_step: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Parses settings from TOML text; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown keys, or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read(path)?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the end time and the derived solver settings.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.t_end.is_finite() && self.t_end > 0.0) {
            return Err(ConfigError::InvalidEndTime(self.t_end));
        }
        if !(self.euler_step.is_finite() && self.euler_step > 0.0) {
            return Err(ConfigError::InvalidEulerStep(self.euler_step));
        }
        self.solver_config().validate().map_err(ConfigError::Invalid)
    }

    /// The Dormand–Prince settings for these tolerances and step limits.
    pub fn solver_config(&self) -> dopri5::Config {
        dopri5::Config {
            abs_tol: self.abs_tol,
            rel_tol: self.rel_tol,
            first_step: self.first_step,
            max_step: self.max_step.unwrap_or(f64::INFINITY),
        }
    }

    /// Step size and step count for [`Method::Euler`] over `t_end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the end time or step size is invalid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn euler_schedule(&self) -> Result<(f64, usize), ConfigError> {
        self.validate()?;
        let steps = (self.t_end / self.euler_step).ceil().max(1.0);
        Ok((self.t_end / steps, steps as usize))
    }
}

/// Checks that every case can name its own report files.
///
/// # Errors
///
/// Returns an error for a repeated name, or a name that is empty or would
/// leave the output directory.
pub fn validate_cases(cases: &[Case]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for case in cases {
        let name = case.name.as_str();
        if name.trim().is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidCaseName {
                name: name.to_owned(),
            });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateCase {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

/// Loads custom cases from a TOML file of `[[case]]` tables.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, defines no cases,
/// or fails [`validate_cases`].
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<Case>, ConfigError> {
    let path = path.as_ref();
    let text = read(path)?;
    let cases = cases::parse_cases(&text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    if cases.is_empty() {
        return Err(ConfigError::NoCases {
            path: path.to_owned(),
        });
    }
    validate_cases(&cases)?;
    Ok(cases)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })
}

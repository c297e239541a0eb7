//! Named flag presets and the trade studies that group them.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use spacetherm_network::CaseFlags;

/// Shorthand for the presets below, in field order.
#[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
const fn flags(
    electric_heaters: bool,
    rhus: bool,
    radiators: bool,
    paint: bool,
    insulation: bool,
    active_cooling: bool,
    electronics_active: bool,
    louvers: bool,
) -> CaseFlags {
    CaseFlags {
        electric_heaters,
        rhus,
        radiators,
        paint,
        insulation,
        active_cooling,
        electronics_active,
        louvers,
    }
}

// Final design

pub const FINAL_DESIGN_ELEC_OFF: CaseFlags = flags(true, true, true, false, true, true, false, true);
pub const FINAL_DESIGN_ELEC_ON: CaseFlags = flags(true, true, true, false, true, true, true, true);

// Insulation / paint

pub const NOTHING: CaseFlags = CaseFlags::NONE;
pub const NOTHING_WITH_INSULATION: CaseFlags =
    flags(false, false, false, false, true, false, false, false);
pub const NOTHING_WITH_PAINT: CaseFlags =
    flags(false, false, false, true, false, false, false, false);
pub const INSULATION_AND_PAINT_BASELINE: CaseFlags =
    flags(true, true, true, false, false, true, false, true);
pub const BASELINE_WITH_INSULATION: CaseFlags =
    flags(true, true, true, false, true, true, false, true);
pub const BASELINE_WITH_PAINT: CaseFlags = flags(true, true, true, true, false, true, false, true);

// Radiators / louvers

pub const NOTHING_WITH_RADIATORS: CaseFlags =
    flags(false, false, true, false, false, false, false, false);
pub const NOTHING_WITH_RADIATORS_AND_LOUVERS: CaseFlags =
    flags(false, false, true, false, false, false, false, true);
pub const RADIATOR_LOUVER_BASELINE: CaseFlags =
    flags(true, true, false, false, true, true, false, false);
pub const BASELINE_WITH_RADIATORS: CaseFlags =
    flags(true, true, true, false, true, true, false, true);
pub const BASELINE_WITH_RADIATORS_AND_LOUVERS: CaseFlags =
    flags(true, true, true, false, true, true, false, true);

// Heaters / RHUs

pub const NOTHING_WITH_HEATERS: CaseFlags =
    flags(true, false, false, false, false, false, false, false);
pub const NOTHING_WITH_RHUS: CaseFlags =
    flags(false, true, false, false, false, false, false, false);
pub const NOTHING_WITH_HEATERS_AND_RHUS: CaseFlags =
    flags(true, true, false, false, false, false, false, false);
pub const HEATER_RHU_BASELINE: CaseFlags = flags(false, false, true, false, true, true, false, true);
pub const BASELINE_WITH_HEATERS: CaseFlags =
    flags(true, false, true, false, true, true, false, true);
pub const BASELINE_WITH_RHUS: CaseFlags = flags(false, true, true, false, true, true, false, true);
pub const BASELINE_WITH_HEATERS_AND_RHUS: CaseFlags =
    flags(true, true, true, false, true, true, false, true);

// Active cooling

pub const NOTHING_WITH_ACTIVE_COOLING: CaseFlags =
    flags(false, false, false, false, false, true, false, true);
pub const ACTIVE_COOLING_BASELINE: CaseFlags =
    flags(true, true, true, false, true, false, false, true);
pub const BASELINE_WITH_ACTIVE_COOLING: CaseFlags =
    flags(true, true, true, false, true, true, false, true);

/// A named set of flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    #[serde(default)]
    pub flags: CaseFlags,
}

impl Case {
    pub fn new(name: impl Into<String>, flags: CaseFlags) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }
}

/// A group of cases compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStudy {
    Nominal,
    InsulationPaint,
    HeaterRhu,
    RadiatorLouver,
    ActiveCooling,
    /// Every case from every study.
    All,
}

impl TradeStudy {
    /// The individual studies, in the order [`TradeStudy::All`] merges them.
    pub const STUDIES: [Self; 5] = [
        Self::Nominal,
        Self::InsulationPaint,
        Self::HeaterRhu,
        Self::RadiatorLouver,
        Self::ActiveCooling,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::InsulationPaint => "Insulation/Paint Trade",
            Self::HeaterRhu => "Heater/RHU Trade",
            Self::RadiatorLouver => "Radiator/Louver Trade",
            Self::ActiveCooling => "Active Cooling Trade",
            Self::All => "All Trades",
        }
    }

    /// The study's cases in presentation order.
    ///
    /// For [`TradeStudy::All`], a case name that appears in more than one
    /// study keeps its first position and takes the flags of its last
    /// appearance.
    pub fn cases(self) -> Vec<Case> {
        let table: &[(&str, CaseFlags)] = match self {
            Self::Nominal => &[
                ("electronics off", FINAL_DESIGN_ELEC_OFF),
                ("electronics on", FINAL_DESIGN_ELEC_ON),
            ],
            Self::InsulationPaint => &[
                ("Nothing", NOTHING),
                ("Nothing with insulation", NOTHING_WITH_INSULATION),
                ("Nothing with paint", NOTHING_WITH_PAINT),
                ("Insulation and paint baseline", INSULATION_AND_PAINT_BASELINE),
                ("Baseline with insulation", BASELINE_WITH_INSULATION),
                ("Baseline with paint", BASELINE_WITH_PAINT),
            ],
            Self::RadiatorLouver => &[
                ("Nothing", NOTHING),
                ("Nothing with radiators", NOTHING_WITH_RADIATORS),
                ("Nothing with radiators and louvers", NOTHING_WITH_RADIATORS_AND_LOUVERS),
                ("Radiator louver baseline", RADIATOR_LOUVER_BASELINE),
                ("Baseline with radiators", BASELINE_WITH_RADIATORS),
                ("Baseline with radiators and louvers", BASELINE_WITH_RADIATORS_AND_LOUVERS),
            ],
            Self::HeaterRhu => &[
                ("Nothing", NOTHING),
                ("Nothing with heaters", NOTHING_WITH_HEATERS),
                ("Nothing with RHUs", NOTHING_WITH_RHUS),
                ("Nothing with heaters and RHUs", NOTHING_WITH_HEATERS_AND_RHUS),
                ("Heater RHU baseline", HEATER_RHU_BASELINE),
                ("Baseline with heaters", BASELINE_WITH_HEATERS),
                ("Baseline with RHUs", BASELINE_WITH_RHUS),
                ("Baseline with heaters and RHUs", BASELINE_WITH_HEATERS_AND_RHUS),
            ],
            Self::ActiveCooling => &[
                ("Nothing", NOTHING),
                ("Nothing with active cooling", NOTHING_WITH_ACTIVE_COOLING),
                ("Active cooling baseline", ACTIVE_COOLING_BASELINE),
                ("Baseline with active cooling", BASELINE_WITH_ACTIVE_COOLING),
            ],
            Self::All => {
                let mut merged: Vec<Case> = Vec::new();
                for case in Self::STUDIES.into_iter().flat_map(Self::cases) {
                    match merged.iter_mut().find(|c| c.name == case.name) {
                        Some(existing) => existing.flags = case.flags,
                        None => merged.push(case),
                    }
                }
                return merged;
            }
        };

        table
            .iter()
            .map(|&(name, flags)| Case::new(name, flags))
            .collect()
    }
}

impl fmt::Display for TradeStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An unrecognised trade study name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown trade study `{0}`, expected one of: nominal, insulation-paint, heater-rhu, \
     radiator-louver, active-cooling, all"
)]
pub struct UnknownStudy(pub String);

impl FromStr for TradeStudy {
    type Err = UnknownStudy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "nominal" => Ok(Self::Nominal),
            "insulation-paint" => Ok(Self::InsulationPaint),
            "heater-rhu" => Ok(Self::HeaterRhu),
            "radiator-louver" => Ok(Self::RadiatorLouver),
            "active-cooling" => Ok(Self::ActiveCooling),
            "all" => Ok(Self::All),
            _ => Err(UnknownStudy(s.to_owned())),
        }
    }
}

/// Custom cases read from TOML:
///
/// ```toml
/// [[case]]
/// name = "Radiators only"
/// flags = { radiators = true, louvers = true }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseFile {
    #[serde(rename = "case", default)]
    cases: Vec<Case>,
}

/// Parses a TOML list of custom cases.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or names an unknown flag.
pub fn parse_cases(text: &str) -> Result<Vec<Case>, toml::de::Error> {
    let file: CaseFile = toml::from_str(text)?;
    Ok(file.cases)
}

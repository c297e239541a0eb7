use std::fmt;

use serde::{Deserialize, Serialize};

/// The design options enabled for one trade case.
///
/// Only [`electric_heaters`](Self::electric_heaters) and
/// [`louvers`](Self::louvers) change how the derivative is evaluated. The
/// rest select component and topology values when a spacecraft is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseFlags {
    pub electric_heaters: bool,
    pub rhus: bool,
    pub radiators: bool,
    pub paint: bool,
    pub insulation: bool,
    pub active_cooling: bool,
    pub electronics_active: bool,
    pub louvers: bool,
}

impl CaseFlags {
    /// Every flag off.
    pub const NONE: Self = Self {
        electric_heaters: false,
        rhus: false,
        radiators: false,
        paint: false,
        insulation: false,
        active_cooling: false,
        electronics_active: false,
        louvers: false,
    };

    /// Returns each flag name with its value, in declaration order.
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("electric_heaters", self.electric_heaters),
            ("rhus", self.rhus),
            ("radiators", self.radiators),
            ("paint", self.paint),
            ("insulation", self.insulation),
            ("active_cooling", self.active_cooling),
            ("electronics_active", self.electronics_active),
            ("louvers", self.louvers),
        ]
    }
}

/// Formats as `{'electric_heaters': True, 'rhus': False, ...}`, the header
/// line of a scenario summary.
impl fmt::Display for CaseFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let value = if value { "True" } else { "False" };
            write!(f, "'{name}': {value}")?;
        }
        f.write_str("}")
    }
}

//! Score to verdict mapping.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;

/// Score at which a URL stops being low risk.
pub const MINIMAL_RISK_SCORE: i64 = 3;

/// Three-tier risk verdict derived solely from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro)]
pub enum Verdict {
    #[serde(rename = "LOW RISK")]
    LowRisk,
    #[serde(rename = "MINIMAL RISK")]
    MinimalRisk,
    #[serde(rename = "RISKY")]
    Risky,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LowRisk => "LOW RISK",
            Verdict::MinimalRisk => "MINIMAL RISK",
            Verdict::Risky => "RISKY",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color paired with each verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Amber,
    Red,
}

impl RiskColor {
    /// CSS color used by the history and home pages.
    pub fn hex(&self) -> &'static str {
        match self {
            RiskColor::Green => "#19A00F",
            RiskColor::Amber => "#f39c12",
            RiskColor::Red => "red",
        }
    }
}

/// Maps a score to its verdict and color.
///
/// Pure and total over `i64`. Negative scores never reach this function from
/// the pipeline (the validator rejects them) and land in the low tier here.
pub fn classify(score: i64) -> (Verdict, RiskColor) {
    match score.cmp(&MINIMAL_RISK_SCORE) {
        std::cmp::Ordering::Less => (Verdict::LowRisk, RiskColor::Green),
        std::cmp::Ordering::Equal => (Verdict::MinimalRisk, RiskColor::Amber),
        std::cmp::Ordering::Greater => (Verdict::Risky, RiskColor::Red),
    }
}

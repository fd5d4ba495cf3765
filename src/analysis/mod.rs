//! Analysis pipeline.
//!
//! A request flows one way: URL -> engine invocation -> validated result ->
//! verdict and color -> (optionally) a history report.

mod classifier;
mod orchestrator;
mod validator;

// Re-export public API
pub use classifier::{classify, RiskColor, Verdict, MINIMAL_RISK_SCORE};
pub use orchestrator::{remember, Analyzer, Remembered};
pub use validator::validate_invocation;

//! Analysis engine boundary.
//!
//! The engine is an external capability: it receives one `{ "url": ... }`
//! message and answers with one JSON message on its output channel. Anything
//! it writes to its diagnostic channel is kept separate so the pipeline can
//! tell a failing engine from one that produced garbage.

mod process;

use async_trait::async_trait;

use crate::error_handling::AnalysisError;
use crate::models::AnalysisRequest;

pub use process::{EngineCommand, ProcessEngine};

/// How the engine execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// Exit code, `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Everything one engine execution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocation {
    pub output: Vec<u8>,
    pub diagnostics: Vec<u8>,
    pub termination: Termination,
}

/// A capability that runs one isolated analysis per call.
///
/// Implementations must not share state between calls: concurrent
/// invocations for the same URL are independent executions.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Runs the engine to completion and returns both channels in full.
    ///
    /// Only launch, I/O and timeout failures are errors here; classifying the
    /// streams is the validator's job.
    async fn invoke(&self, request: &AnalysisRequest) -> Result<EngineInvocation, AnalysisError>;
}

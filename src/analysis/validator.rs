//! Classification of a finished engine invocation.
//!
//! Precedence, first match wins:
//! 1. non-blank diagnostics -> [`AnalysisError::Engine`]
//! 2. blank output -> [`AnalysisError::EmptyOutput`]
//! 3. output that is not an analysis message -> [`AnalysisError::MalformedOutput`]
//! 4. a message carrying its own `error` -> [`AnalysisError::EngineReported`]
//! 5. otherwise a validated [`AnalysisResult`]

use serde::Deserialize;

use crate::engine::EngineInvocation;
use crate::error_handling::AnalysisError;
use crate::models::AnalysisResult;

/// Raw engine message. Every field is optional here so that missing data is
/// reported as a validation failure instead of a serde error.
#[derive(Debug, Deserialize)]
struct EngineMessage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    score: Option<serde_json::Value>,
    #[serde(default)]
    url_reasons: Option<Vec<String>>,
    #[serde(default)]
    network_reasons: Option<Vec<String>>,
    #[serde(default)]
    fake_login_reasons: Option<Vec<String>>,
    #[serde(default)]
    environment_warnings: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// Turns the raw streams of one invocation into a typed outcome.
///
/// `requested_url` is used when the engine does not echo a URL back.
pub fn validate_invocation(
    invocation: &EngineInvocation,
    requested_url: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let diagnostics = String::from_utf8_lossy(&invocation.diagnostics);
    if !diagnostics.trim().is_empty() {
        return Err(AnalysisError::Engine {
            diagnostics: diagnostics.into_owned(),
        });
    }

    let output = String::from_utf8_lossy(&invocation.output);
    if output.trim().is_empty() {
        return Err(AnalysisError::EmptyOutput {
            output: output.into_owned(),
        });
    }

    let message: EngineMessage =
        serde_json::from_str(output.trim()).map_err(|e| AnalysisError::MalformedOutput {
            reason: e.to_string(),
            output: output.to_string(),
        })?;

    if let Some(error) = message.error.as_deref().map(str::trim) {
        if !error.is_empty() {
            return Err(AnalysisError::EngineReported {
                message: error.to_string(),
            });
        }
    }

    let score = parse_score(message.score.as_ref()).map_err(|reason| {
        AnalysisError::MalformedOutput {
            reason: reason.to_string(),
            output: output.to_string(),
        }
    })?;

    let url = message
        .url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| requested_url.to_string());

    Ok(AnalysisResult {
        url,
        score,
        url_reasons: message.url_reasons.unwrap_or_default(),
        network_reasons: message.network_reasons.unwrap_or_default(),
        fake_login_reasons: message.fake_login_reasons.unwrap_or_default(),
        environment_warnings: message.environment_warnings.unwrap_or_default(),
    })
}

fn parse_score(value: Option<&serde_json::Value>) -> Result<i64, &'static str> {
    let value = value.ok_or("missing score")?;
    if value.is_null() {
        return Err("missing score");
    }
    match value.as_i64() {
        Some(score) if score >= 0 => Ok(score),
        Some(_) => Err("negative score"),
        None => Err("score is not an integer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Termination;

    fn invocation(output: &str, diagnostics: &str) -> EngineInvocation {
        EngineInvocation {
            output: output.as_bytes().to_vec(),
            diagnostics: diagnostics.as_bytes().to_vec(),
            termination: Termination {
                exit_code: Some(0),
                success: true,
            },
        }
    }

    const VALID: &str = r#"{"url":"https://a.test","score":4,"verdict":"MODERATE RISK",
        "url_reasons":["URL too long."],"network_reasons":[],
        "fake_login_reasons":["Form contains credential fields."],
        "environment_warnings":[]}"#;

    #[test]
    fn test_valid_output_is_success() {
        let result = validate_invocation(&invocation(VALID, ""), "a.test").unwrap();
        assert_eq!(result.url, "https://a.test");
        assert_eq!(result.score, 4);
        assert_eq!(result.url_reasons, vec!["URL too long."]);
        assert!(result.network_reasons.is_empty());
    }

    #[test]
    fn test_diagnostics_win_over_valid_output() {
        let err = validate_invocation(&invocation(VALID, "DeprecationWarning: x\n"), "a.test")
            .unwrap_err();
        match err {
            AnalysisError::Engine { diagnostics } => {
                assert_eq!(diagnostics, "DeprecationWarning: x\n")
            }
            other => panic!("expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_on_both_channels_is_empty_output() {
        let err = validate_invocation(&invocation(" \n\t", "\n  "), "a.test").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyOutput { .. }));
    }

    #[test]
    fn test_garbage_output_is_malformed() {
        let err = validate_invocation(&invocation("Traceback: oops", ""), "a.test").unwrap_err();
        match err {
            AnalysisError::MalformedOutput { output, .. } => assert_eq!(output, "Traceback: oops"),
            other => panic!("expected malformed output, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_score_is_malformed() {
        let err =
            validate_invocation(&invocation(r#"{"url":"https://a.test"}"#, ""), "a.test")
                .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedOutput { .. }));
    }

    #[test]
    fn test_negative_score_is_malformed() {
        let err = validate_invocation(&invocation(r#"{"score":-1}"#, ""), "a.test").unwrap_err();
        match err {
            AnalysisError::MalformedOutput { reason, .. } => assert_eq!(reason, "negative score"),
            other => panic!("expected malformed output, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_score_is_malformed() {
        let err = validate_invocation(&invocation(r#"{"score":2.5}"#, ""), "a.test").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedOutput { .. }));
    }

    #[test]
    fn test_non_object_output_is_malformed() {
        let err = validate_invocation(&invocation("[1,2,3]", ""), "a.test").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedOutput { .. }));
    }

    #[test]
    fn test_engine_reported_error() {
        let out = r#"{"url":null,"score":0,"verdict":"ERROR","error":"'url'"}"#;
        let err = validate_invocation(&invocation(out, ""), "a.test").unwrap_err();
        match err {
            AnalysisError::EngineReported { message } => assert_eq!(message, "'url'"),
            other => panic!("expected engine-reported error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result = validate_invocation(&invocation(r#"{"score":0}"#, ""), "a.test").unwrap();
        assert_eq!(result.url, "a.test");
        assert!(result.url_reasons.is_empty());
        assert!(result.fake_login_reasons.is_empty());
        assert!(result.environment_warnings.is_empty());
    }

    #[test]
    fn test_null_reason_lists_are_empty() {
        let out = r#"{"score":1,"url_reasons":null,"network_reasons":null}"#;
        let result = validate_invocation(&invocation(out, ""), "a.test").unwrap();
        assert!(result.url_reasons.is_empty());
        assert!(result.network_reasons.is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let out = format!("\n{}\n", r#"{"score":3}"#);
        let result = validate_invocation(&invocation(&out, "  "), "a.test").unwrap();
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_non_zero_exit_does_not_change_outcome() {
        let mut inv = invocation(r#"{"score":1}"#, "");
        inv.termination = Termination {
            exit_code: Some(1),
            success: false,
        };
        assert!(validate_invocation(&inv, "a.test").is_ok());
    }
}

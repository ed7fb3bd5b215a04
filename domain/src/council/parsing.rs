//! Response parsing for council voters.
//!
//! These functions pull structured payloads out of free-form model output.
//! They are pure domain logic: no I/O, just text scanning.
//!
//! | Function | Use Case | Failure policy |
//! |----------|----------|----------------|
//! | [`extract_json_object`] | Locate the payload | `None` |
//! | [`parse_vote_response`] | Manual deliberation | Lenient: degrades to an abstain vote |
//! | [`parse_recommendation`](crate::autonomous::parse_recommendation) | Autonomous cycle | Strict: returns an error |

use super::vote::{Vote, VoteChoice, normalize_confidence};
use super::voter::VoterId;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a model response could not be turned into a structured payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseParseError {
    #[error("No JSON object found in response")]
    NoJson,

    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Find the first well-formed JSON object anywhere in the text
///
/// Tolerates leading commentary, trailing commentary and markdown code
/// fences. Candidate objects that fail to parse are skipped.
///
/// # Examples
///
/// ```
/// use council_domain::council::extract_json_object;
///
/// let text = "Sure!\n```json\n{\"vote\": \"approve\"}\n```\nHope that helps.";
/// let value = extract_json_object(text).unwrap();
/// assert_eq!(value["vote"], "approve");
///
/// assert!(extract_json_object("no payload here").is_none());
/// ```
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    text.char_indices()
        .filter(|(_, c)| *c == '{')
        .find_map(|(start, _)| {
            let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
            match stream.next() {
                Some(Ok(Value::Object(map))) => Some(map),
                _ => None,
            }
        })
}

/// Read an optional list of strings, ignoring non-string entries
pub(crate) fn string_list(payload: &Map<String, Value>, key: &str) -> Vec<String> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a required, non-empty string field
pub(crate) fn required_str<'a>(
    payload: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, ResponseParseError> {
    let value = payload
        .get(key)
        .ok_or(ResponseParseError::MissingField(key))?;
    match value.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ResponseParseError::InvalidField {
            field: key,
            value: value.to_string(),
        }),
    }
}

/// Parse a vote payload strictly
///
/// Expected shape:
/// `{"vote": "approve|reject|abstain", "reasoning": "...", "confidence": 0-100,
///   "risks": [...], "recommendations": [...]}`
pub fn try_parse_vote(voter: VoterId, response: &str) -> Result<Vote, ResponseParseError> {
    let payload = extract_json_object(response).ok_or(ResponseParseError::NoJson)?;

    let raw_choice = required_str(&payload, "vote")?;
    let choice: VoteChoice = raw_choice
        .parse()
        .map_err(|_| ResponseParseError::InvalidField {
            field: "vote",
            value: raw_choice.to_string(),
        })?;
    let reasoning = required_str(&payload, "reasoning")?;
    let confidence = normalize_confidence(payload.get("confidence"));

    // Range is guaranteed by normalize_confidence
    let vote = Vote::new(voter, choice, reasoning, confidence).map_err(|e| {
        ResponseParseError::InvalidField {
            field: "confidence",
            value: e.to_string(),
        }
    })?;

    Ok(vote
        .with_risks(string_list(&payload, "risks"))
        .with_recommendations(string_list(&payload, "recommendations")))
}

/// Parse a vote payload leniently
///
/// Any payload problem degrades to [`Vote::parse_fallback`]: an abstain vote
/// with confidence 50 and a note to review manually. The second element
/// carries the parse error when the fallback was used.
pub fn parse_vote_response(voter: VoterId, response: &str) -> (Vote, Option<ResponseParseError>) {
    match try_parse_vote(voter, response) {
        Ok(vote) => (vote, None),
        Err(e) => (Vote::parse_fallback(voter, response), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::vote::{DEFAULT_CONFIDENCE, PARSE_FAILURE_RECOMMENDATION, PARSE_FAILURE_RISK};

    #[test]
    fn test_extract_plain_object() {
        let value = extract_json_object(r#"{"vote": "reject", "confidence": 10}"#).unwrap();
        assert_eq!(value["vote"], "reject");
    }

    #[test]
    fn test_extract_skips_malformed_candidates() {
        let text = r#"Thinking {not json} ... final: {"vote": "approve", "nested": {"a": 1}} done"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["vote"], "approve");
        assert_eq!(value["nested"]["a"], 1);
    }

    #[test]
    fn test_extract_code_fence() {
        let text = "Here is my evaluation:\n```json\n{\"vote\": \"abstain\", \"reasoning\": \"unclear\"}\n```";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["reasoning"], "unclear");
    }

    #[test]
    fn test_parse_full_vote() {
        let response = r#"
```json
{
  "vote": "approve",
  "reasoning": "Users asked for it repeatedly.",
  "confidence": 85,
  "risks": ["contrast regressions", 42],
  "recommendations": ["audit color tokens"]
}
```"#;
        let (vote, error) = parse_vote_response(VoterId::Structure, response);
        assert!(error.is_none());
        assert_eq!(vote.voter, VoterId::Structure);
        assert_eq!(vote.choice, VoteChoice::Approve);
        assert_eq!(vote.confidence, 85);
        assert_eq!(vote.risks, vec!["contrast regressions"]);
        assert_eq!(vote.recommendations, vec!["audit color tokens"]);
    }

    #[test]
    fn test_out_of_range_confidence_defaults() {
        let response = r#"{"vote": "reject", "reasoning": "no", "confidence": 250}"#;
        let (vote, error) = parse_vote_response(VoterId::Risk, response);
        assert!(error.is_none());
        assert_eq!(vote.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_lenient_fallback_without_json() {
        let (vote, error) = parse_vote_response(VoterId::Ethics, "I would rather not say.");
        assert_eq!(error, Some(ResponseParseError::NoJson));
        assert_eq!(vote.choice, VoteChoice::Abstain);
        assert_eq!(vote.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(vote.risks, vec![PARSE_FAILURE_RISK]);
        assert_eq!(vote.recommendations, vec![PARSE_FAILURE_RECOMMENDATION]);
    }

    #[test]
    fn test_lenient_fallback_on_invalid_choice() {
        let response = r#"{"vote": "maybe", "reasoning": "hmm"}"#;
        let (vote, error) = parse_vote_response(VoterId::Risk, response);
        assert!(matches!(
            error,
            Some(ResponseParseError::InvalidField { field: "vote", .. })
        ));
        assert_eq!(vote.choice, VoteChoice::Abstain);
    }

    #[test]
    fn test_strict_reports_missing_reasoning() {
        let response = r#"{"vote": "approve"}"#;
        assert_eq!(
            try_parse_vote(VoterId::Risk, response).unwrap_err(),
            ResponseParseError::MissingField("reasoning")
        );
    }
}

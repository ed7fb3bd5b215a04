//! Action recommendations returned by voters during an autonomous cycle

use super::action::TreasuryAction;
use crate::council::parsing::{ResponseParseError, extract_json_object, required_str, string_list};
use crate::council::vote::{MAX_CONFIDENCE, confidence_score};
use crate::council::voter::VoterId;
use serde::{Deserialize, Serialize};

/// One voter's recommended treasury action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub voter: VoterId,
    pub action: TreasuryAction,
    pub reasoning: String,
    /// Confidence on a 0-100 scale, as reported (not rounded)
    pub confidence: f64,
    #[serde(default)]
    pub risks: Vec<String>,
}

impl Recommendation {
    pub fn new(
        voter: VoterId,
        action: TreasuryAction,
        reasoning: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            voter,
            action,
            reasoning: reasoning.into(),
            confidence: confidence.clamp(0.0, f64::from(MAX_CONFIDENCE)),
            risks: Vec::new(),
        }
    }
}

/// Parse an action recommendation strictly
///
/// Expected shape:
/// `{"action": "buyback|burn|hold|sell_partial|claim_rewards",
///   "reasoning": "...", "confidence": 0-100, "risks": [...]}`
///
/// Any missing payload or unusable action is an error; the caller aborts the
/// whole cycle. Confidence alone still falls back to the default.
pub fn parse_recommendation(
    voter: VoterId,
    response: &str,
) -> Result<Recommendation, ResponseParseError> {
    let payload = extract_json_object(response).ok_or(ResponseParseError::NoJson)?;

    let raw_action = required_str(&payload, "action")?;
    let action: TreasuryAction =
        raw_action
            .parse()
            .map_err(|_| ResponseParseError::InvalidField {
                field: "action",
                value: raw_action.to_string(),
            })?;
    let reasoning = required_str(&payload, "reasoning")?;
    let confidence = confidence_score(payload.get("confidence"));

    let mut recommendation = Recommendation::new(voter, action, reasoning, confidence);
    recommendation.risks = string_list(&payload, "risks");
    Ok(recommendation)
}

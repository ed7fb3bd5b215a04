//! Vote types for council deliberation
//!
//! This module defines the voting primitives cast by each voter on a
//! manually submitted decision.

use super::voter::VoterId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence assigned when a voter's value is missing or unusable
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Upper bound of the confidence scale
pub const MAX_CONFIDENCE: u8 = 100;

/// Risk note attached to a vote whose response could not be parsed
pub const PARSE_FAILURE_RISK: &str = "response parsing failed";

/// Recommendation attached to a vote whose response could not be parsed
pub const PARSE_FAILURE_RECOMMENDATION: &str = "review manually";

/// Tri-state ballot choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Approve,
    Reject,
    Abstain,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Approve => "approve",
            VoteChoice::Reject => "reject",
            VoteChoice::Abstain => "abstain",
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" | "yes" => Ok(VoteChoice::Approve),
            "reject" | "rejected" | "no" => Ok(VoteChoice::Reject),
            "abstain" | "abstained" => Ok(VoteChoice::Abstain),
            other => Err(DomainError::UnknownVariant {
                kind: "vote",
                value: other.to_string(),
            }),
        }
    }
}

/// A single voter's ballot on one decision
///
/// # Example
///
/// ```
/// use council_domain::council::{Vote, VoteChoice, VoterId};
///
/// let vote = Vote::new(VoterId::Risk, VoteChoice::Approve, "Low downside.", 80).unwrap();
/// assert_eq!(vote.confidence, 80);
///
/// assert!(Vote::new(VoterId::Risk, VoteChoice::Approve, "Sure.", 101).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: VoterId,
    pub choice: VoteChoice,
    pub reasoning: String,
    /// Confidence on a 0-100 scale
    pub confidence: u8,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a vote, rejecting confidence values above the scale
    pub fn new(
        voter: VoterId,
        choice: VoteChoice,
        reasoning: impl Into<String>,
        confidence: u8,
    ) -> Result<Self, DomainError> {
        if confidence > MAX_CONFIDENCE {
            return Err(DomainError::validation(
                "confidence",
                format!("must be between 0 and {MAX_CONFIDENCE}, got {confidence}"),
            ));
        }
        Ok(Self {
            voter,
            choice,
            reasoning: reasoning.into(),
            confidence,
            risks: Vec::new(),
            recommendations: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Degraded vote recorded when a voter answered but its payload was unusable
    pub fn parse_fallback(voter: VoterId, raw_response: &str) -> Self {
        Self {
            voter,
            choice: VoteChoice::Abstain,
            reasoning: raw_response.trim().to_string(),
            confidence: DEFAULT_CONFIDENCE,
            risks: vec![PARSE_FAILURE_RISK.to_string()],
            recommendations: vec![PARSE_FAILURE_RECOMMENDATION.to_string()],
            created_at: Utc::now(),
        }
    }

    pub fn with_risks(mut self, risks: Vec<String>) -> Self {
        self.risks = risks;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

/// Validated confidence score from a model response, unrounded
///
/// Integers and floats within `0..=100` are kept as reported. Anything else
/// (out of range, negative, non-numeric, missing) falls back to
/// [`DEFAULT_CONFIDENCE`].
pub fn confidence_score(value: Option<&serde_json::Value>) -> f64 {
    match value.and_then(|v| v.as_f64()) {
        Some(number) if (0.0..=f64::from(MAX_CONFIDENCE)).contains(&number) => number,
        _ => f64::from(DEFAULT_CONFIDENCE),
    }
}

/// Normalize a raw confidence value onto the whole-number vote scale
///
/// Same validation as [`confidence_score`]; floats are rounded.
pub fn normalize_confidence(value: Option<&serde_json::Value>) -> u8 {
    confidence_score(value).round() as u8
}

//! Voter adapter
//!
//! One adapter type serves all three voters; the [`VoterProfile`] it is built
//! with decides the model and role instructions.
//!
//! Two parse policies, chosen per call path:
//!
//! | Call | Transport failure | Unusable payload |
//! |------|-------------------|------------------|
//! | [`VoterAdapter::cast_vote`] (manual deliberation) | error | abstain fallback vote |
//! | [`VoterAdapter::recommend`] (autonomous cycle) | error | error |

use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway, ReasoningRequest};
use council_domain::core::string::truncate;
use council_domain::{
    AutonomousContext, Decision, PromptTemplate, Recommendation, ResponseParseError, Vote,
    VoterId, VoterProfile, parse_recommendation, parse_vote_response,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Longest raw-response excerpt quoted in logs and errors
const RAW_EXCERPT_LEN: usize = 200;

/// Failure of a single voter invocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoterError {
    #[error("{voter} unavailable: {source}")]
    Gateway {
        voter: VoterId,
        #[source]
        source: GatewayError,
    },

    #[error("{voter} returned an unusable recommendation: {source} (response: {excerpt})")]
    Parse {
        voter: VoterId,
        #[source]
        source: ResponseParseError,
        excerpt: String,
    },

    #[error("Voter task failed: {0}")]
    Task(String),
}

impl VoterError {
    /// The voter that failed, if known
    pub fn voter(&self) -> Option<VoterId> {
        match self {
            VoterError::Gateway { voter, .. } | VoterError::Parse { voter, .. } => Some(*voter),
            VoterError::Task(_) => None,
        }
    }
}

/// Invokes the reasoning service on behalf of one voter
pub struct VoterAdapter<G: ReasoningGateway + ?Sized> {
    gateway: Arc<G>,
    profile: VoterProfile,
    timeout: Option<Duration>,
}

impl<G: ReasoningGateway + ?Sized> VoterAdapter<G> {
    pub fn new(gateway: Arc<G>, profile: VoterProfile) -> Self {
        Self {
            gateway,
            profile,
            timeout: None,
        }
    }

    /// Bound every call to the reasoning service
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn voter(&self) -> VoterId {
        self.profile.voter
    }

    pub fn profile(&self) -> &VoterProfile {
        &self.profile
    }

    /// Vote on a manual decision (lenient parsing)
    pub async fn cast_vote(&self, decision: &Decision) -> Result<Vote, VoterError> {
        let prompt = PromptTemplate::decision_prompt(decision);
        let response = self.invoke(prompt).await?;

        let (vote, parse_error) = parse_vote_response(self.voter(), &response);
        if let Some(e) = parse_error {
            warn!(
                voter = %self.voter(),
                decision = %decision.id,
                error = %e,
                response = %truncate(&response, RAW_EXCERPT_LEN),
                "Vote response unusable, recording abstain fallback"
            );
        }
        Ok(vote)
    }

    /// Recommend a treasury action (strict parsing)
    pub async fn recommend(&self, context: &AutonomousContext) -> Result<Recommendation, VoterError> {
        let prompt = PromptTemplate::autonomous_prompt(context);
        let response = self.invoke(prompt).await?;

        parse_recommendation(self.voter(), &response).map_err(|source| VoterError::Parse {
            voter: self.voter(),
            source,
            excerpt: truncate(&response, RAW_EXCERPT_LEN),
        })
    }

    async fn invoke(&self, prompt: String) -> Result<String, VoterError> {
        let request = ReasoningRequest::new(
            self.profile.model.clone(),
            self.profile.instructions.clone(),
            prompt,
        );
        debug!(voter = %self.voter(), model = %self.profile.model, "Invoking reasoning service");

        let call = self.gateway.complete(&request);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(limit.as_secs())),
            },
            None => call.await,
        };

        result.map_err(|source| VoterError::Gateway {
            voter: self.voter(),
            source,
        })
    }
}

//! Full-stack flows over real adapters and mocked HTTP services

use crate::{
    HttpContextProvider, HttpExecutionDispatcher, HttpReasoningGateway, InMemoryDecisionStore,
    ReasoningEndpoint, TreasuryClient,
};
use council_application::{
    AutonomousEngine, DeliberateUseCase, DeliberationError, NoProgress, VoterPanel,
};
use council_domain::{
    DecisionCategory, DecisionStatus, NewDecision, Priority, TreasuryAction, VoterId,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_voter(server: &MockServer, voter: VoterId, reply: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(format!("You are {},", voter.name())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": reply.to_string() } }]
        })))
        .mount(server)
        .await;
}

fn panel(server: &MockServer) -> Arc<VoterPanel<HttpReasoningGateway>> {
    let gateway = HttpReasoningGateway::new(ReasoningEndpoint::new(server.uri())).unwrap();
    Arc::new(VoterPanel::uniform(Arc::new(gateway), "test-model", None))
}

#[tokio::test]
async fn test_dark_mode_decision_reaches_consensus() {
    let server = MockServer::start().await;
    mount_voter(
        &server,
        VoterId::Risk,
        json!({ "vote": "approve", "reasoning": "low risk", "confidence": 85 }),
    )
    .await;
    mount_voter(
        &server,
        VoterId::Structure,
        json!({ "vote": "approve", "reasoning": "theme tokens exist", "confidence": 70,
                "recommendations": ["add a toggle in settings"] }),
    )
    .await;
    mount_voter(
        &server,
        VoterId::Ethics,
        json!({ "vote": "abstain", "reasoning": "no concerns either way", "confidence": 40 }),
    )
    .await;

    let use_case = DeliberateUseCase::new(panel(&server), Arc::new(InMemoryDecisionStore::new()));
    let payload = NewDecision::new("Add dark mode", DecisionCategory::Feature)
        .with_priority(Priority::Medium);

    let outcome = use_case
        .create_and_deliberate(payload, &NoProgress)
        .await
        .unwrap();
    assert_eq!(outcome.decision.votes().len(), 3);
    assert_eq!(outcome.decision.status(), DecisionStatus::ConsensusReached);
    assert_eq!(outcome.consensus.vote_summary.total(), 3);
    assert_eq!(
        outcome.consensus.action_items,
        vec!["add a toggle in settings".to_string()]
    );

    let again = use_case.deliberate(outcome.decision.id).await.unwrap_err();
    match again {
        DeliberationError::AlreadyDeliberated { consensus, .. } => {
            assert_eq!(*consensus, outcome.consensus);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_autonomous_cycle_over_http() {
    let reasoning = MockServer::start().await;
    for (voter, action) in [
        (VoterId::Risk, "buyback"),
        (VoterId::Structure, "buyback"),
        (VoterId::Ethics, "hold"),
    ] {
        mount_voter(
            &reasoning,
            voter,
            json!({ "action": action, "reasoning": "dip", "confidence": 75 }),
        )
        .await;
    }

    let treasury = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sol_balance": 1.0 })))
        .mount(&treasury)
        .await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&treasury)
        .await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "signature": "5xSig"
        })))
        .expect(1)
        .mount(&treasury)
        .await;

    let client = TreasuryClient::new(treasury.uri(), None).unwrap();
    let engine = AutonomousEngine::new(
        panel(&reasoning),
        Arc::new(HttpContextProvider::new(client.clone())),
        Arc::new(HttpExecutionDispatcher::new(client)),
    );

    let record = engine.run_cycle().await;
    assert_eq!(record.action, TreasuryAction::Buyback);
    assert!(record.executed);
    assert_eq!(record.result.as_deref(), Some("5xSig"));
    assert_eq!(engine.status().total_decisions, 1);
}

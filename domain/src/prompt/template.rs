//! Prompt templates for council voters

use crate::autonomous::{AutonomousContext, TreasuryAction};
use crate::council::decision::Decision;
use crate::council::voter::VoterId;

/// Templates for generating voter prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Role-specific system prompt for a voter
    pub fn voter_system(voter: VoterId) -> String {
        let focus = match voter {
            VoterId::Risk => {
                r#"You weigh downside exposure against momentum.
Look for what could go wrong, how likely it is, and whether the timing is right.
Favor action when momentum is clearly positive and the downside is bounded."#
            }
            VoterId::Structure => {
                r#"You evaluate structure and execution.
Ask whether the proposal is well-formed, feasible with current resources, and
sequenced sensibly. Prefer proposals with a clear, verifiable execution path."#
            }
            VoterId::Ethics => {
                r#"You are the voice of ethics and restraint.
Consider fairness to holders and users, transparency, and long-term trust.
When in doubt, prefer the conservative option and say why."#
            }
        };

        format!(
            r#"You are {name}, one of three equal voters on a governance council.
Your role: {role}.

{focus}

Always answer with a single JSON object. Commentary outside the JSON is ignored."#,
            name = voter.name(),
            role = voter.role(),
            focus = focus,
        )
    }

    /// User prompt asking for a vote on a manual decision
    pub fn decision_prompt(decision: &Decision) -> String {
        let mut prompt = format!(
            r#"Decision to evaluate:

Title: {}
Category: {}
Priority: {}
"#,
            decision.title, decision.category, decision.priority
        );

        if !decision.description.trim().is_empty() {
            prompt.push_str(&format!("\nDescription:\n{}\n", decision.description.trim()));
        }
        if let Some(context) = &decision.context {
            prompt.push_str(&format!("\nAdditional context:\n{}\n", context.trim()));
        }

        prompt.push_str(
            r#"
Respond with JSON in exactly this shape:
{"vote": "approve" | "reject" | "abstain",
 "reasoning": "<2-4 sentences>",
 "confidence": <integer 0-100>,
 "risks": ["<risk>", ...],
 "recommendations": ["<action item>", ...]}"#,
        );

        prompt
    }

    /// User prompt asking for a treasury action recommendation
    pub fn autonomous_prompt(context: &AutonomousContext) -> String {
        let snapshot = &context.snapshot;
        let mut prompt = format!(
            "Treasury state:\n\nSOL balance: {:.4}\n",
            snapshot.sol_balance
        );

        match &snapshot.token {
            Some(token) => {
                prompt.push_str(&format!(
                    "Managed token: {} ({})\n",
                    token.symbol.as_deref().unwrap_or("unknown symbol"),
                    token.mint
                ));
            }
            None => prompt.push_str("Managed token: none yet\n"),
        }

        if let Some(market) = &snapshot.market {
            let fields = [
                ("Price (USD)", market.price_usd.map(|v| format!("{v:.8}"))),
                ("Market cap (USD)", market.market_cap_usd.map(|v| format!("{v:.0}"))),
                ("24h volume (USD)", market.volume_24h_usd.map(|v| format!("{v:.0}"))),
                ("24h change (%)", market.price_change_24h_pct.map(|v| format!("{v:.2}"))),
                ("Holders", market.holders.map(|v| v.to_string())),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    prompt.push_str(&format!("{label}: {value}\n"));
                }
            }
        } else {
            prompt.push_str("Market data: unavailable\n");
        }

        if context.recent_actions.is_empty() {
            prompt.push_str("Recent actions: none\n");
        } else {
            let recent: Vec<_> = context.recent_actions.iter().map(|a| a.as_str()).collect();
            prompt.push_str(&format!("Recent actions (newest first): {}\n", recent.join(", ")));
        }

        let actions: Vec<_> = TreasuryAction::ALL.iter().map(|a| a.as_str()).collect();
        prompt.push_str(&format!(
            r#"
Recommend exactly one action from: {}.
Respond with JSON in exactly this shape:
{{"action": "<action>", "reasoning": "<2-4 sentences>", "confidence": <integer 0-100>, "risks": ["<risk>", ...]}}"#,
            actions.join(", ")
        ));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autonomous::{ManagedToken, MarketMetrics, TreasurySnapshot};
    use crate::council::decision::{DecisionCategory, NewDecision, Priority};

    #[test]
    fn test_voter_system_is_role_specific() {
        let risk = PromptTemplate::voter_system(VoterId::Risk);
        let ethics = PromptTemplate::voter_system(VoterId::Ethics);
        assert!(risk.contains("Sentinel"));
        assert!(risk.contains("Risk & Momentum"));
        assert!(ethics.contains("restraint"));
        assert_ne!(risk, ethics);
    }

    #[test]
    fn test_decision_prompt_renders_fields() {
        let decision = Decision::create(
            NewDecision::new("Add dark mode", DecisionCategory::Feature)
                .with_description("Users want a dark theme.")
                .with_priority(Priority::High),
        )
        .unwrap();
        let prompt = PromptTemplate::decision_prompt(&decision);
        assert!(prompt.contains("Title: Add dark mode"));
        assert!(prompt.contains("Priority: high"));
        assert!(prompt.contains("Users want a dark theme."));
        assert!(!prompt.contains("Additional context"));
        assert!(prompt.contains("\"vote\""));
    }

    #[test]
    fn test_autonomous_prompt_without_token() {
        let context = AutonomousContext::new(TreasurySnapshot::default(), vec![]);
        let prompt = PromptTemplate::autonomous_prompt(&context);
        assert!(prompt.contains("Managed token: none yet"));
        assert!(prompt.contains("Market data: unavailable"));
        assert!(prompt.contains("Recent actions: none"));
        assert!(prompt.contains("sell_partial"));
    }

    #[test]
    fn test_autonomous_prompt_with_market() {
        let context = AutonomousContext::new(
            TreasurySnapshot {
                sol_balance: 1.25,
                token: Some(ManagedToken {
                    mint: "Mint111".into(),
                    symbol: Some("CNCL".into()),
                    name: None,
                }),
                market: Some(MarketMetrics {
                    holders: Some(420),
                    ..MarketMetrics::default()
                }),
            },
            vec![TreasuryAction::Burn, TreasuryAction::Hold],
        );
        let prompt = PromptTemplate::autonomous_prompt(&context);
        assert!(prompt.contains("SOL balance: 1.2500"));
        assert!(prompt.contains("CNCL (Mint111)"));
        assert!(prompt.contains("Holders: 420"));
        assert!(!prompt.contains("Price (USD)"));
        assert!(prompt.contains("Recent actions (newest first): burn, hold"));
    }
}

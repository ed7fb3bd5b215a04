//! Console command parsing
//!
//! Slash commands address the council and the engine; any other line is
//! taken as the title of a new decision to deliberate right away.

use council_domain::{DecisionCategory, VoteChoice, VoterId};

/// Default number of autonomous records shown by `/history`
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Create a decision and deliberate on it
    Decide {
        title: String,
        category: DecisionCategory,
    },
    /// Create a decision without deliberating
    Create {
        title: String,
        category: DecisionCategory,
    },
    Deliberate(String),
    Vote {
        id: String,
        voter: VoterId,
        choice: VoteChoice,
        confidence: u8,
        reasoning: String,
    },
    Consensus(String),
    Show(String),
    List,
    Activity(Option<String>),
    Delete(String),
    Cycle,
    Start,
    Stop,
    Status,
    History(usize),
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse a non-empty, trimmed line
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ConsoleCommand::Decide {
                title: line.to_string(),
                category: DecisionCategory::Other,
            });
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            "help" | "h" | "?" => Ok(ConsoleCommand::Help),
            "decide" => {
                let (title, category) = title_and_category(args)?;
                Ok(ConsoleCommand::Decide { title, category })
            }
            "create" | "new" => {
                let (title, category) = title_and_category(args)?;
                Ok(ConsoleCommand::Create { title, category })
            }
            "deliberate" => Ok(ConsoleCommand::Deliberate(single_id(name, args)?)),
            "vote" => parse_vote(args),
            "consensus" => Ok(ConsoleCommand::Consensus(single_id(name, args)?)),
            "show" => Ok(ConsoleCommand::Show(single_id(name, args)?)),
            "list" | "ls" => Ok(ConsoleCommand::List),
            "activity" => Ok(ConsoleCommand::Activity(
                (!args.is_empty()).then(|| args.to_string()),
            )),
            "delete" | "rm" => Ok(ConsoleCommand::Delete(single_id(name, args)?)),
            "cycle" => Ok(ConsoleCommand::Cycle),
            "start" => Ok(ConsoleCommand::Start),
            "stop" => Ok(ConsoleCommand::Stop),
            "status" => Ok(ConsoleCommand::Status),
            "history" => {
                let limit = if args.is_empty() {
                    DEFAULT_HISTORY_LIMIT
                } else {
                    args.parse()
                        .map_err(|_| format!("Invalid history limit: {}", args))?
                };
                Ok(ConsoleCommand::History(limit))
            }
            other => Err(format!(
                "Unknown command: /{}\nType /help for available commands",
                other
            )),
        }
    }
}

/// Split an optional leading category off a title
fn title_and_category(args: &str) -> Result<(String, DecisionCategory), String> {
    if args.is_empty() {
        return Err("A title is required".to_string());
    }

    if let Some((first, title)) = args.split_once(char::is_whitespace)
        && let Ok(category) = first.parse::<DecisionCategory>()
    {
        return Ok((title.trim().to_string(), category));
    }
    Ok((args.to_string(), DecisionCategory::Other))
}

fn single_id(command: &str, args: &str) -> Result<String, String> {
    match args.split_whitespace().collect::<Vec<_>>().as_slice() {
        [id] => Ok(id.to_string()),
        _ => Err(format!("Usage: /{} <id>", command)),
    }
}

fn parse_vote(args: &str) -> Result<ConsoleCommand, String> {
    const USAGE: &str = "Usage: /vote <id> <voter> <approve|reject|abstain> <confidence> [reasoning]";

    let mut parts = args.splitn(5, char::is_whitespace);
    let (Some(id), Some(voter), Some(choice), Some(confidence)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(USAGE.to_string());
    };

    let voter = voter.parse::<VoterId>().map_err(|e| e.to_string())?;
    let choice = choice.parse::<VoteChoice>().map_err(|e| e.to_string())?;
    let confidence = confidence
        .parse::<u8>()
        .map_err(|_| format!("Invalid confidence: {}", confidence))?;
    let reasoning = parts.next().unwrap_or("").trim().to_string();

    Ok(ConsoleCommand::Vote {
        id: id.to_string(),
        voter,
        choice,
        confidence,
        reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_decides() {
        assert_eq!(
            ConsoleCommand::parse("refactor the auth module").unwrap(),
            ConsoleCommand::Decide {
                title: "refactor the auth module".to_string(),
                category: DecisionCategory::Other,
            }
        );
    }

    #[test]
    fn test_create_with_category() {
        assert_eq!(
            ConsoleCommand::parse("/create feature Add dark mode").unwrap(),
            ConsoleCommand::Create {
                title: "Add dark mode".to_string(),
                category: DecisionCategory::Feature,
            }
        );
        assert_eq!(
            ConsoleCommand::parse("/decide Add dark mode").unwrap(),
            ConsoleCommand::Decide {
                title: "Add dark mode".to_string(),
                category: DecisionCategory::Other,
            }
        );
        assert!(ConsoleCommand::parse("/create").is_err());
    }

    #[test]
    fn test_vote() {
        assert_eq!(
            ConsoleCommand::parse("/vote 1a2b3c4d sentinel approve 80 looks safe enough").unwrap(),
            ConsoleCommand::Vote {
                id: "1a2b3c4d".to_string(),
                voter: VoterId::Risk,
                choice: VoteChoice::Approve,
                confidence: 80,
                reasoning: "looks safe enough".to_string(),
            }
        );
        assert!(ConsoleCommand::parse("/vote 1a2b3c4d sentinel approve").is_err());
        assert!(ConsoleCommand::parse("/vote 1a2b3c4d nobody approve 80").is_err());
        assert!(ConsoleCommand::parse("/vote 1a2b3c4d risk maybe 80").is_err());
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(
            ConsoleCommand::parse("/show abc").unwrap(),
            ConsoleCommand::Show("abc".to_string())
        );
        assert!(ConsoleCommand::parse("/show").is_err());
        assert!(ConsoleCommand::parse("/delete a b").is_err());
        assert_eq!(
            ConsoleCommand::parse("/activity").unwrap(),
            ConsoleCommand::Activity(None)
        );
    }

    #[test]
    fn test_engine_commands() {
        assert_eq!(ConsoleCommand::parse("/start").unwrap(), ConsoleCommand::Start);
        assert_eq!(
            ConsoleCommand::parse("/history").unwrap(),
            ConsoleCommand::History(DEFAULT_HISTORY_LIMIT)
        );
        assert_eq!(
            ConsoleCommand::parse("/history 3").unwrap(),
            ConsoleCommand::History(3)
        );
        assert!(ConsoleCommand::parse("/history many").is_err());
        assert!(ConsoleCommand::parse("/bogus").is_err());
        assert_eq!(ConsoleCommand::parse("/q").unwrap(), ConsoleCommand::Quit);
    }
}

//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use tracing::warn;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game, discarding any game in progress.
    NewGame,

    /// Roll the unlocked dice.
    Roll,

    /// Toggle the selection of one die.
    Select { die_id: u8 },

    /// Keep the selected dice and bank the turn.
    Bank,

    /// Keep the selected dice and roll the rest.
    Continue,

    /// Play one opponent cycle.
    Step,

    /// Play the rest of the opponent's turn.
    Opponent,

    /// Report the current snapshot without changing anything.
    State,

    /// Report the full game log.
    Log,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "roll" => Some(Command::Roll),
        "bank" => Some(Command::Bank),
        "continue" => Some(Command::Continue),
        "step" => Some(Command::Step),
        "opponent" => Some(Command::Opponent),
        "state" => Some(Command::State),
        "log" => Some(Command::Log),

        "select" | "toggle" => parse_select(&tokens),
        "setoption" => parse_setoption(&tokens),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `select <die_id>`.
fn parse_select(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed select: expected 'select <die_id>'");
        return None;
    }
    match tokens[1].parse::<u8>() {
        Ok(die_id) => Some(Command::Select { die_id }),
        Err(_) => {
            warn!(value = tokens[1], "invalid die id");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`. Both the name and the value
/// may span several tokens.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    let rest = match tokens.get(1..) {
        Some(["name", rest @ ..]) if !rest.is_empty() => rest,
        _ => {
            warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            return None;
        }
    };

    let (name, value) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], &rest[vi + 1..]),
        None => (rest, &[][..]),
    };
    if name.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    Some(Command::SetOption {
        name: name.join(" "),
        value: (!value.is_empty()).then(|| value.join(" ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("roll"), Some(Command::Roll));
        assert_eq!(parse_command("bank"), Some(Command::Bank));
        assert_eq!(parse_command("continue"), Some(Command::Continue));
        assert_eq!(parse_command("step"), Some(Command::Step));
        assert_eq!(parse_command("opponent"), Some(Command::Opponent));
        assert_eq!(parse_command("state"), Some(Command::State));
        assert_eq!(parse_command("log"), Some(Command::Log));
    }

    #[test]
    fn parse_with_whitespace() {
        assert_eq!(parse_command("  roll  "), Some(Command::Roll));
        assert_eq!(parse_command("\tbank\n"), Some(Command::Bank));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_select_die() {
        assert_eq!(parse_command("select 3"), Some(Command::Select { die_id: 3 }));
        assert_eq!(parse_command("toggle 0"), Some(Command::Select { die_id: 0 }));
        assert_eq!(parse_command("select"), None);
        assert_eq!(parse_command("select x"), None);
        assert_eq!(parse_command("select -1"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name Seed value 42"),
            Some(Command::SetOption {
                name: "Seed".to_string(),
                value: Some("42".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_without_value() {
        assert_eq!(
            parse_command("setoption name AutoOpponent"),
            Some(Command::SetOption {
                name: "AutoOpponent".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_joins_multiword_name_and_value() {
        assert_eq!(
            parse_command("setoption name Auto Opponent value not today"),
            Some(Command::SetOption {
                name: "Auto Opponent".to_string(),
                value: Some("not today".to_string()),
            })
        );
        assert_eq!(
            parse_command("setoption name Seed value"),
            Some(Command::SetOption {
                name: "Seed".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption Seed"), None);
        assert_eq!(parse_command("setoption name value 1"), None);
    }
}

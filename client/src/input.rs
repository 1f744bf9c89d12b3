//! Prompt input parsing and translation into protocol packets

use shared::{FearId, Packet};

/// A single line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register { name: String, bet: u32 },
    Seal(Vec<FearId>),
    BeginSelection,
    BeginPlaying,
    Draw,
    Mark(FearId),
    Claim,
    Reset,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  register <name> <bet>   join the session with a wager
  seal <id> <id> ...      seal your ticket (15 distinct fear ids)
  select                  admin: open ticket selection
  play                    admin: start revealing fears
  draw                    admin: reveal the next fear
  mark <id>               toggle a mark on your card
  claim                   claim bingo
  reset                   admin: start a new session
  show                    redraw the last snapshot
  quit                    leave";

/// Parses one prompt line
///
/// Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Action>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let action = match command.to_ascii_lowercase().as_str() {
        "register" | "join" => {
            let Some((bet, name)) = rest.split_last() else {
                return Err("usage: register <name> <bet>".to_string());
            };
            if name.is_empty() {
                return Err("usage: register <name> <bet>".to_string());
            }
            let bet = bet
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a valid bet", bet))?;
            Action::Register {
                name: name.join(" "),
                bet,
            }
        }
        "seal" => {
            if rest.is_empty() {
                return Err("usage: seal <id> <id> ...".to_string());
            }
            let ids = rest
                .iter()
                .flat_map(|word| word.split(','))
                .filter(|word| !word.is_empty())
                .map(parse_fear_id)
                .collect::<Result<Vec<_>, _>>()?;
            Action::Seal(ids)
        }
        "mark" => match rest.as_slice() {
            [id] => Action::Mark(parse_fear_id(id)?),
            _ => return Err("usage: mark <id>".to_string()),
        },
        "select" => Action::BeginSelection,
        "play" => Action::BeginPlaying,
        "draw" => Action::Draw,
        "claim" | "bingo" => Action::Claim,
        "reset" => Action::Reset,
        "show" => Action::Show,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(action))
}

fn parse_fear_id(word: &str) -> Result<FearId, String> {
    word.parse::<FearId>()
        .map_err(|_| format!("'{}' is not a fear id", word))
}

impl Action {
    /// Builds the packet for this action
    ///
    /// Local actions yield `Ok(None)`. Session actions other than
    /// registration need the player token bound by a previous `register`.
    pub fn to_packet(&self, player_id: Option<&str>) -> Result<Option<Packet>, String> {
        let require_id = || {
            player_id
                .map(str::to_string)
                .ok_or_else(|| "register first".to_string())
        };

        let packet = match self {
            Action::Register { name, bet } => Packet::Register {
                name: name.clone(),
                bet: *bet,
            },
            Action::Seal(fear_ids) => Packet::SealTicket {
                player_id: require_id()?,
                fear_ids: fear_ids.clone(),
            },
            Action::BeginSelection => Packet::BeginSelection {
                player_id: require_id()?,
            },
            Action::BeginPlaying => Packet::BeginPlaying {
                player_id: require_id()?,
            },
            Action::Draw => Packet::DrawNext {
                player_id: require_id()?,
            },
            Action::Mark(fear_id) => Packet::ToggleMark {
                player_id: require_id()?,
                fear_id: *fear_id,
            },
            Action::Claim => Packet::Claim {
                player_id: require_id()?,
            },
            Action::Reset => Packet::Reset {
                player_id: require_id()?,
                catalog: Vec::new(),
            },
            Action::Show | Action::Help | Action::Quit => return Ok(None),
        };

        Ok(Some(packet))
    }
}

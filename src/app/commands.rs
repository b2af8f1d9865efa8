//! Inbound commands and request parsing.
//!
//! Requests arrive as a JSON value: either a whitespace-delimited command
//! string (`"cabins on"`) or a pre-split sequence of tokens. Parsing is a
//! single pass into the closed [`Command`] enum; dispatch then matches on
//! the variant, so an invalid mode value is unrepresentable past this
//! point.
//!
//! Unrecognised verb/argument combinations parse to `None` and are
//! ignored by the dispatcher; the protocol is deliberately lenient.

use serde_json::Value;

use crate::app::state::{CabinMode, NacelleMode};
use crate::error::CommandError;

/// Commands the remote protocol can issue against the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CabinsOn,
    CabinsOff,
    SetCabinsMode(CabinMode),
    NacellesOn,
    NacellesOff,
    SetNacellesMode(NacelleMode),
    BlinkersOn,
    BlinkersOff,
    AllOn,
    AllOff,
    /// Return the state snapshot; no mutation.
    GetState,
    /// All subsystems off, then terminate the process.
    Shutdown,
}

impl Command {
    /// Parse a decoded JSON request into a command.
    ///
    /// * `Ok(Some(..))`: a recognised command.
    /// * `Ok(None)`: well-shaped but unrecognised; callers no-op.
    /// * `Err(..)`: the value is neither a string nor a string sequence.
    pub fn from_request(request: &Value) -> Result<Option<Self>, CommandError> {
        match request {
            Value::String(raw) => {
                let tokens: Vec<&str> = raw.split_whitespace().collect();
                Ok(Self::parse_tokens(&tokens))
            }
            Value::Array(items) => {
                let mut tokens = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => tokens.push(s.as_str()),
                        _ => {
                            return Err(CommandError::InvalidShape(
                                "sequence elements must be strings",
                            ))
                        }
                    }
                }
                Ok(Self::parse_tokens(&tokens))
            }
            _ => Err(CommandError::InvalidShape(
                "expected a string or a sequence of strings",
            )),
        }
    }

    /// Match a token sequence against the command table.
    ///
    /// Missing tokens are treated as empty slots, matching the original
    /// protocol's pad-to-three behaviour. `engines` is an accepted alias
    /// for `nacelles`.
    pub fn parse_tokens(tokens: &[&str]) -> Option<Self> {
        let verb = tokens.first().copied().unwrap_or("");
        let arg = tokens.get(1).copied().unwrap_or("");
        let sub = tokens.get(2).copied().unwrap_or("");

        match verb {
            "cabins" => match (arg, sub) {
                ("on", _) => Some(Self::CabinsOn),
                ("off", _) => Some(Self::CabinsOff),
                ("mode", "on" | "random") => Some(Self::SetCabinsMode(CabinMode::Random)),
                ("mode", "off" | "static") => Some(Self::SetCabinsMode(CabinMode::Static)),
                _ => None,
            },
            "nacelles" | "engines" => match (arg, sub) {
                ("on", _) => Some(Self::NacellesOn),
                ("off", _) => Some(Self::NacellesOff),
                ("mode", "on" | "pulse") => Some(Self::SetNacellesMode(NacelleMode::Pulse)),
                ("mode", "off" | "static") => Some(Self::SetNacellesMode(NacelleMode::Static)),
                _ => None,
            },
            "blinkers" => match arg {
                "on" => Some(Self::BlinkersOn),
                "off" => Some(Self::BlinkersOff),
                _ => None,
            },
            "all" => match arg {
                "on" => Some(Self::AllOn),
                "off" => Some(Self::AllOff),
                _ => None,
            },
            "stop" | "exit" | "halt" => Some(Self::Shutdown),
            "get_state" => Some(Self::GetState),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: &str) -> Option<Command> {
        Command::from_request(&json!(raw)).unwrap()
    }

    #[test]
    fn basic_verbs() {
        assert_eq!(parse("cabins on"), Some(Command::CabinsOn));
        assert_eq!(parse("cabins off"), Some(Command::CabinsOff));
        assert_eq!(parse("blinkers on"), Some(Command::BlinkersOn));
        assert_eq!(parse("all off"), Some(Command::AllOff));
        assert_eq!(parse("get_state"), Some(Command::GetState));
    }

    #[test]
    fn engines_aliases_nacelles() {
        assert_eq!(parse("engines on"), Some(Command::NacellesOn));
        assert_eq!(parse("nacelles off"), Some(Command::NacellesOff));
        assert_eq!(
            parse("engines mode pulse"),
            Some(Command::SetNacellesMode(NacelleMode::Pulse))
        );
    }

    #[test]
    fn mode_arguments_accept_both_spellings() {
        assert_eq!(
            parse("cabins mode on"),
            Some(Command::SetCabinsMode(CabinMode::Random))
        );
        assert_eq!(
            parse("cabins mode random"),
            Some(Command::SetCabinsMode(CabinMode::Random))
        );
        assert_eq!(
            parse("cabins mode off"),
            Some(Command::SetCabinsMode(CabinMode::Static))
        );
        assert_eq!(
            parse("nacelles mode static"),
            Some(Command::SetNacellesMode(NacelleMode::Static))
        );
    }

    #[test]
    fn stop_aliases() {
        for verb in ["stop", "exit", "halt"] {
            assert_eq!(parse(verb), Some(Command::Shutdown));
        }
    }

    #[test]
    fn unrecognised_is_none_not_error() {
        assert_eq!(parse("foo bar baz"), None);
        assert_eq!(parse("cabins sideways"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("cabins mode upside-down"), None);
    }

    #[test]
    fn token_sequence_request() {
        let req = json!(["nacelles", "mode", "pulse"]);
        assert_eq!(
            Command::from_request(&req).unwrap(),
            Some(Command::SetNacellesMode(NacelleMode::Pulse))
        );
        // Short sequences are padded with empty slots.
        let req = json!(["stop"]);
        assert_eq!(Command::from_request(&req).unwrap(), Some(Command::Shutdown));
    }

    #[test]
    fn invalid_shapes_rejected() {
        assert!(Command::from_request(&json!(42)).is_err());
        assert!(Command::from_request(&json!(null)).is_err());
        assert!(Command::from_request(&json!({"cmd": "cabins on"})).is_err());
        assert!(Command::from_request(&json!(["cabins", 1])).is_err());
    }
}

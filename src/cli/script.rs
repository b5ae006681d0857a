// ABOUTME: Parser for scripted wizard actions used by the walk command

use std::fmt;

use crate::catalog::ResourceType;
use crate::wizard::{StateChange, StepId};

/// One scripted user action
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedAction {
    Change(StateChange),
    Next,
    Back,
    Skip,
    Goto(StepId),
    /// The user finished payment-method setup
    Payment,
    Create,
}

impl fmt::Display for ScriptedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Change(change) => f.write_str(change.describe()),
            Self::Next => f.write_str("next"),
            Self::Back => f.write_str("back"),
            Self::Skip => f.write_str("skip"),
            Self::Goto(step) => write!(f, "goto {step}"),
            Self::Payment => f.write_str("payment"),
            Self::Create => f.write_str("create"),
        }
    }
}

/// Parse a single `verb` or `verb:argument` token
pub fn parse_action(raw: &str) -> Result<ScriptedAction, String> {
    let (verb, argument) = match raw.split_once(':') {
        Some((verb, argument)) => (verb.trim(), Some(argument)),
        None => (raw.trim(), None),
    };
    let verb = verb.to_ascii_lowercase();

    let action = match (verb.as_str(), argument) {
        ("next", None) => ScriptedAction::Next,
        ("back", None) => ScriptedAction::Back,
        ("skip", None) => ScriptedAction::Skip,
        ("payment", None) => ScriptedAction::Payment,
        ("create", None) => ScriptedAction::Create,
        ("goto", Some(step)) => ScriptedAction::Goto(step.parse()?),
        ("project", Some(id)) => ScriptedAction::Change(StateChange::SelectProject(id.trim().to_string())),
        ("type", Some(id)) => {
            ScriptedAction::Change(StateChange::SelectResourceType(id.parse::<ResourceType>()?))
        }
        ("name", Some(name)) => ScriptedAction::Change(StateChange::SetName(name.to_string())),
        ("id", Some(id)) => ScriptedAction::Change(StateChange::SetResourceId(id.trim().to_string())),
        ("sku", Some(sku)) => ScriptedAction::Change(StateChange::SelectSku(sku.trim().to_string())),
        ("settings", Some(json)) => {
            let value = serde_json::from_str(json)
                .map_err(|e| format!("invalid settings JSON: {e}"))?;
            ScriptedAction::Change(StateChange::CaptureSettings(value))
        }
        _ => {
            return Err(format!(
                "invalid action `{raw}`; valid actions: project:<id>, type:<id>, name:<text>, id:<text>, sku:<sku>, settings:<json>, next, back, skip, goto:<step>, payment, create"
            ));
        }
    };
    Ok(action)
}

pub fn parse_actions(raw: &[String]) -> Result<Vec<ScriptedAction>, String> {
    raw.iter().map(|token| parse_action(token)).collect()
}

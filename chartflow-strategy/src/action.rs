//! Action: the three-valued trading recommendation.

use chartflow_core::helper::{map, Stream};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recommendation emitted once per snapshot.
///
/// Serialized as its integer value (`-1`, `0`, `1`), which is how result
/// fixtures store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
#[repr(i8)]
pub enum Action {
    Sell = -1,
    Hold = 0,
    Buy = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action value {0} (expected -1, 0 or 1)")]
pub struct InvalidAction(pub i8);

impl Action {
    /// Chart annotation for this action: `"B"`, `"S"`, or empty for hold.
    pub fn annotation(self) -> &'static str {
        match self {
            Self::Sell => "S",
            Self::Hold => "",
            Self::Buy => "B",
        }
    }

    /// Parses an annotation back into an action. Anything unrecognised is a hold.
    pub fn from_annotation(annotation: &str) -> Self {
        match annotation {
            "B" => Self::Buy,
            "S" => Self::Sell,
            _ => Self::Hold,
        }
    }
}

impl From<Action> for i8 {
    fn from(action: Action) -> Self {
        action as i8
    }
}

impl TryFrom<i8> for Action {
    type Error = InvalidAction;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Sell),
            0 => Ok(Self::Hold),
            1 => Ok(Self::Buy),
            other => Err(InvalidAction(other)),
        }
    }
}

/// Converts actions into report annotations.
pub fn actions_to_annotations(actions: Stream<Action>) -> Stream<String> {
    map(actions, |action| action.annotation().to_string())
}

/// Converts report annotations back into actions.
pub fn annotations_to_actions(annotations: Stream<String>) -> Stream<Action> {
    map(annotations, |annotation| Action::from_annotation(&annotation))
}

/// Collapses repeated signals: a Buy or Sell passes only when it differs
/// from the last one that passed, everything else becomes Hold.
///
/// The initial state is Sell, so a leading Sell is suppressed.
pub fn normalize_actions(actions: Stream<Action>) -> Stream<Action> {
    let mut last = Action::Sell;
    map(actions, move |action| {
        if action != Action::Hold && action != last {
            last = action;
            action
        } else {
            Action::Hold
        }
    })
}

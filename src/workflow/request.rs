use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::TransitionError;
use crate::entity::enums::RequestStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RequestAction {
    Assign { staff_id: Uuid },
    Start,
    Complete,
    Cancel,
    /// Only replaces the operator note.
    Note,
}

/// Who is working the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin,
    Staff(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestState {
    pub status: RequestStatus,
    pub staff_id: Option<Uuid>,
}

impl RequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::Assign { .. } => "assign",
            RequestAction::Start => "start",
            RequestAction::Complete => "complete",
            RequestAction::Cancel => "cancel",
            RequestAction::Note => "note",
        }
    }

    pub fn apply(&self, actor: Actor, current: RequestState) -> Result<RequestState, TransitionError> {
        if let (Actor::Staff(me), Some(assignee)) = (actor, current.staff_id) {
            if assignee != me {
                return Err(TransitionError::NotPermitted);
            }
        }

        if let RequestAction::Note = self {
            return Ok(current);
        }

        if current.status.is_terminal() {
            return Err(TransitionError::InvalidState(format!(
                "Request is already {:?}",
                current.status
            )));
        }

        match self {
            RequestAction::Assign { staff_id } => {
                if actor != Actor::Admin {
                    return Err(TransitionError::NotPermitted);
                }
                match current.status {
                    RequestStatus::Unassigned | RequestStatus::Assigned => Ok(RequestState {
                        status: RequestStatus::Assigned,
                        staff_id: Some(*staff_id),
                    }),
                    _ => Err(TransitionError::InvalidState(
                        "Only unassigned or assigned requests can be (re)assigned".into(),
                    )),
                }
            }
            RequestAction::Start => match current.status {
                RequestStatus::Unassigned | RequestStatus::Assigned => {
                    let staff_id = match (current.staff_id, actor) {
                        (Some(assignee), _) => Some(assignee),
                        (None, Actor::Staff(me)) => Some(me),
                        (None, Actor::Admin) => None,
                    };
                    Ok(RequestState {
                        status: RequestStatus::InProgress,
                        staff_id,
                    })
                }
                _ => Err(TransitionError::InvalidState(
                    "Request is already in progress".into(),
                )),
            },
            RequestAction::Complete => match current.status {
                RequestStatus::Assigned | RequestStatus::InProgress => Ok(RequestState {
                    status: RequestStatus::Resolved,
                    ..current
                }),
                _ => Err(TransitionError::InvalidState(
                    "Request must be assigned or in progress before completion".into(),
                )),
            },
            RequestAction::Cancel => Ok(RequestState {
                status: RequestStatus::Cancelled,
                ..current
            }),
            RequestAction::Note => Ok(current),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a reservation request currently stands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    Requested,
    Seated,
    Waitlisted,
    Cancelled,
    Rejected,
}

impl RequestState {
    /// Cancelled and Rejected end a lifecycle; a later request for the same id
    /// starts over from Requested.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Cancelled | RequestState::Rejected)
    }

    pub fn can_transition_to(&self, to: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, to),
            (Requested, Seated)
                | (Requested, Waitlisted)
                | (Requested, Rejected)
                | (Seated, Cancelled)
                | (Waitlisted, Seated)
                | (Waitlisted, Waitlisted)
        )
    }

    pub fn transition(self, to: RequestState) -> Result<RequestState, LifecycleError> {
        if !self.can_transition_to(to) {
            return Err(LifecycleError::InvalidTransition { from: self, to });
        }
        Ok(to)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestState::Requested => "REQUESTED",
            RequestState::Seated => "SEATED",
            RequestState::Waitlisted => "WAITLISTED",
            RequestState::Cancelled => "CANCELLED",
            RequestState::Rejected => "REJECTED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: RequestState, to: RequestState },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_lifecycle() {
        // Requested → Waitlisted → Waitlisted → Seated → Cancelled
        let state = RequestState::Requested;
        let state = state.transition(RequestState::Waitlisted).unwrap();
        let state = state.transition(RequestState::Waitlisted).unwrap();
        let state = state.transition(RequestState::Seated).unwrap();
        let state = state.transition(RequestState::Cancelled).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_invalid_transition() {
        let err = RequestState::Seated.transition(RequestState::Waitlisted).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: RequestState::Seated,
                to: RequestState::Waitlisted,
            }
        );
        assert_eq!(err.to_string(), "Invalid state transition from SEATED to WAITLISTED");

        // Rejected is terminal.
        for to in [
            RequestState::Requested,
            RequestState::Seated,
            RequestState::Waitlisted,
            RequestState::Cancelled,
        ] {
            assert!(RequestState::Rejected.transition(to).is_err());
        }
        assert!(RequestState::Cancelled.transition(RequestState::Seated).is_err());
        assert!(RequestState::Waitlisted.transition(RequestState::Cancelled).is_err());
    }
}

use serde::Deserialize;
use utoipa::ToSchema;

use super::TransitionError;
use crate::entity::enums::{BookingStatus, RoomStatus, UserRole};

/// Operator actions on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    Confirm,
    Checkin,
    Checkout,
    Cancel,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "confirm",
            BookingAction::Checkin => "checkin",
            BookingAction::Checkout => "checkout",
            BookingAction::Cancel => "cancel",
        }
    }

    /// Staff may only confirm; everything else is administrator-only.
    pub fn allowed_for(&self, role: UserRole) -> bool {
        match (self, role) {
            (_, UserRole::Admin) => true,
            (BookingAction::Confirm, UserRole::Staff) => true,
            _ => false,
        }
    }

    /// Room status the room should move to once the transition is applied.
    pub fn room_status_after(&self) -> Option<RoomStatus> {
        match self {
            BookingAction::Checkin => Some(RoomStatus::Occupied),
            BookingAction::Checkout => Some(RoomStatus::Available),
            BookingAction::Confirm | BookingAction::Cancel => None,
        }
    }

    /// Resolve the next status. Role is checked before the source state.
    pub fn transition(
        &self,
        role: UserRole,
        from: BookingStatus,
    ) -> Result<BookingStatus, TransitionError> {
        if !self.allowed_for(role) {
            return Err(TransitionError::NotPermitted);
        }

        match (self, from) {
            (BookingAction::Confirm, BookingStatus::Pending) => Ok(BookingStatus::Confirmed),
            (BookingAction::Confirm, _) => Err(TransitionError::InvalidState(
                "Booking is not awaiting confirmation".into(),
            )),
            (BookingAction::Checkin, BookingStatus::Confirmed) => Ok(BookingStatus::CheckedIn),
            (BookingAction::Checkin, _) => Err(TransitionError::InvalidState(
                "Booking must be confirmed before check-in".into(),
            )),
            (BookingAction::Checkout, BookingStatus::CheckedIn) => Ok(BookingStatus::CheckedOut),
            (BookingAction::Checkout, _) => Err(TransitionError::InvalidState(
                "Booking must be checked in before check-out".into(),
            )),
            (BookingAction::Cancel, BookingStatus::Pending | BookingStatus::Confirmed) => {
                Ok(BookingStatus::Cancelled)
            }
            (BookingAction::Cancel, BookingStatus::CheckedOut) => Err(
                TransitionError::InvalidState("Cannot cancel a checked-out booking".into()),
            ),
            (BookingAction::Cancel, other) => Err(TransitionError::InvalidState(format!(
                "Cannot cancel a booking in status {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
        BookingStatus::Cancelled,
    ];

    #[test]
    fn happy_path_walks_the_lifecycle() {
        let role = UserRole::Admin;
        let confirmed = BookingAction::Confirm
            .transition(role, BookingStatus::Pending)
            .unwrap();
        let checked_in = BookingAction::Checkin.transition(role, confirmed).unwrap();
        let checked_out = BookingAction::Checkout.transition(role, checked_in).unwrap();
        assert_eq!(checked_out, BookingStatus::CheckedOut);
    }

    #[test]
    fn staff_can_only_confirm() {
        assert_eq!(
            BookingAction::Confirm.transition(UserRole::Staff, BookingStatus::Pending),
            Ok(BookingStatus::Confirmed)
        );
        for action in [BookingAction::Checkin, BookingAction::Checkout, BookingAction::Cancel] {
            for status in ALL {
                assert_eq!(
                    action.transition(UserRole::Staff, status),
                    Err(TransitionError::NotPermitted)
                );
            }
        }
    }

    #[test]
    fn customers_cannot_operate_bookings() {
        assert_eq!(
            BookingAction::Confirm.transition(UserRole::Customer, BookingStatus::Pending),
            Err(TransitionError::NotPermitted)
        );
    }

    #[test]
    fn cancel_from_checked_out_is_always_rejected() {
        let err = BookingAction::Cancel
            .transition(UserRole::Admin, BookingStatus::CheckedOut)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidState("Cannot cancel a checked-out booking".into())
        );
    }

    #[test]
    fn cancel_only_from_pending_or_confirmed() {
        for status in ALL {
            let result = BookingAction::Cancel.transition(UserRole::Admin, status);
            let expected_ok = matches!(status, BookingStatus::Pending | BookingStatus::Confirmed);
            assert_eq!(result.is_ok(), expected_ok, "cancel from {status:?}");
        }
    }

    #[test]
    fn second_checkout_is_rejected() {
        assert!(
            BookingAction::Checkout
                .transition(UserRole::Admin, BookingStatus::CheckedOut)
                .is_err()
        );
    }

    #[test]
    fn room_side_effects() {
        assert_eq!(
            BookingAction::Checkin.room_status_after(),
            Some(RoomStatus::Occupied)
        );
        assert_eq!(
            BookingAction::Checkout.room_status_after(),
            Some(RoomStatus::Available)
        );
        assert_eq!(BookingAction::Confirm.room_status_after(), None);
        assert_eq!(BookingAction::Cancel.room_status_after(), None);
    }
}

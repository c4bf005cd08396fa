use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StayError {
    #[error("Check-in date cannot be in the past")]
    CheckInInPast,

    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,

    #[error("Guest count must be at least 1")]
    NoGuests,

    #[error("Guest count exceeds room capacity ({0})")]
    OverCapacity(i32),

    #[error("Service date must fall within the stay")]
    OutsideStay,

    #[error("Amount is too large")]
    AmountTooLarge,
}

/// Half-open `[check_in, check_out)` date range of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayWindow {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayError> {
        if check_out <= check_in {
            return Err(StayError::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Window for a reservation that has not been made yet: it may not start before `today`.
    pub fn upcoming(
        check_in: NaiveDate,
        check_out: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, StayError> {
        if check_in < today {
            return Err(StayError::CheckInInPast);
        }
        Self::new(check_in, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn price(&self, nightly_rate: i64) -> Result<i64, StayError> {
        nightly_rate
            .checked_mul(self.nights())
            .ok_or(StayError::AmountTooLarge)
    }

    pub fn overlaps(&self, other: &StayWindow) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

pub fn check_guests(guests: i32, capacity: i32) -> Result<(), StayError> {
    if guests < 1 {
        return Err(StayError::NoGuests);
    }
    if guests > capacity {
        return Err(StayError::OverCapacity(capacity));
    }
    Ok(())
}

pub fn line_total(fee: i64, quantity: i32) -> Result<i64, StayError> {
    fee.checked_mul(i64::from(quantity))
        .ok_or(StayError::AmountTooLarge)
}

/// Room price plus every booked-service line.
pub fn invoice_total(
    room_price: i64,
    line_totals: impl IntoIterator<Item = i64>,
) -> Result<i64, StayError> {
    line_totals
        .into_iter()
        .try_fold(room_price, |total, line| total.checked_add(line))
        .ok_or(StayError::AmountTooLarge)
}

use crate::local_time::TimeParseError;
use thiserror::Error;

// Storage is the only genuine fault; everything else is a business
// result callers branch on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error(transparent)]
    InvalidSlotTime(#[from] TimeParseError),
    #[error("Slot end time must be after its start time.")]
    InvalidInterval,
    #[error("Slot can only be set for up to 2 weeks in advance.")]
    TooFarAhead,
    #[error("Slot can only be set for future dates.")]
    InPast,
    #[error("Past slots cannot be deleted.")]
    PastSlot,
    #[error("Past bookings cannot be canceled.")]
    PastBooking,
    #[error("User not found.")]
    UserNotFound,
    #[error("Slot not found.")]
    SlotNotFound,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Overlapping slot found")]
    OverlappingSlot,
    #[error("Slot is already booked.")]
    AlreadyBooked,
    #[error("storage failure: {0}")]
    Storage(String),
}

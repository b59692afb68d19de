use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type SlotId = i64;
// UTC milliseconds since the epoch, wide end to end; floats would truncate.
pub type EpochMillis = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: SlotId,
    pub owner_id: UserId,
    pub start_time: EpochMillis,
    pub end_time: EpochMillis,
}

impl Slot {
    // Half-open: a slot ending at 11:00 and one starting at 11:00 coexist.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    pub fn starts_after(&self, instant: EpochMillis) -> bool {
        self.start_time > instant
    }
}

// At most one booking exists per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub slot_id: SlotId,
    pub booker_id: UserId,
    pub meeting_reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    #[serde(flatten)]
    pub slot: Slot,
    pub booking: Booking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedSlot {
    #[serde(rename = "deletedSlot")]
    pub slot: Slot,
    #[serde(rename = "deletedBooking")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapPair {
    pub slot_a: Slot,
    pub slot_b: Slot,
}

// Unauthorized is an expected outcome, not a fault: the HTTP layer
// answers it with a success status plus a message field clients check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Canceled(Booking),
    Unauthorized,
}

use crate::backend::SchedulingBackend;
use crate::errors::SchedulingError;
use crate::local_time;
use crate::types::{
    BookedSlot, Booking, CancelOutcome, DeletedSlot, EpochMillis, OverlapPair, Slot, SlotId, User,
    UserId,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

// Furthest ahead a slot may start, counted from the moment it is created.
pub const MAX_ADVANCE_DAYS: i64 = 14;

// Policy checks live here; the backend guards only the invariants that
// need storage atomicity.
#[derive(Clone)]
pub struct Scheduler<B: SchedulingBackend> {
    backend: B,
}

impl<B: SchedulingBackend> Scheduler<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn create_user(&self, name: &str) -> Result<User, SchedulingError> {
        self.backend.create_user(name)
    }

    pub fn create_slot(
        &self,
        owner_id: UserId,
        date: &str,
        start_time: &str,
        end_time: &str,
        offset_minutes: i64,
    ) -> Result<Slot, SchedulingError> {
        let (start_utc, end_utc) =
            local_time::to_utc_epoch(date, start_time, end_time, offset_minutes)?;
        if start_utc >= end_utc {
            return Err(SchedulingError::InvalidInterval);
        }
        let now = current_millis();
        if start_utc > now + Duration::days(MAX_ADVANCE_DAYS).num_milliseconds() {
            return Err(SchedulingError::TooFarAhead);
        }
        if start_utc < now {
            return Err(SchedulingError::InPast);
        }
        if self.backend.find_user(owner_id)?.is_none() {
            return Err(SchedulingError::UserNotFound);
        }
        self.backend
            .insert_slot_if_free(owner_id, start_utc, end_utc)
    }

    pub fn available_slots(&self, user_id: UserId) -> Result<Vec<Slot>, SchedulingError> {
        self.backend.available_slots(user_id, current_millis())
    }

    pub fn booked_slots(&self, user_id: UserId) -> Result<Vec<BookedSlot>, SchedulingError> {
        self.backend.booked_slots(user_id, current_millis())
    }

    // Slots owned by someone else are reported as absent, not forbidden.
    pub fn delete_slot(
        &self,
        slot_id: SlotId,
        requester_id: UserId,
    ) -> Result<DeletedSlot, SchedulingError> {
        let slot = match self.backend.slot_owned_by(slot_id, requester_id)? {
            Some(slot) => slot,
            None => return Err(SchedulingError::SlotNotFound),
        };
        if slot.start_time < current_millis() {
            return Err(SchedulingError::PastSlot);
        }
        self.backend.remove_slot(slot_id)
    }

    // A started slot can still be claimed; recency is enforced when
    // deleting or canceling, not here.
    pub fn book_slot(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
    ) -> Result<Booking, SchedulingError> {
        let meeting_reference = format!("meet://{}", Uuid::new_v4());
        self.backend
            .insert_booking_if_absent(slot_id, booker_id, &meeting_reference)
    }

    pub fn cancel_booking(
        &self,
        slot_id: SlotId,
        requester_id: UserId,
    ) -> Result<CancelOutcome, SchedulingError> {
        let (booking, slot) = match self.backend.booking_with_slot(slot_id)? {
            Some(found) => found,
            None => return Err(SchedulingError::BookingNotFound),
        };
        if slot.start_time < current_millis() {
            return Err(SchedulingError::PastBooking);
        }
        if requester_id != slot.owner_id && requester_id != booking.booker_id {
            return Ok(CancelOutcome::Unauthorized);
        }
        // Keyed removal: if a cancel/rebook interleave replaced the
        // booking since the read above, nothing is deleted.
        let removed = self.backend.remove_booking(slot_id, booking.booker_id)?;
        Ok(CancelOutcome::Canceled(removed))
    }

    // Pair order follows the two listings; the count can exceed either
    // input's size.
    pub fn find_overlaps(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<OverlapPair>, SchedulingError> {
        let now = current_millis();
        let first = self.backend.booked_slots(user_a, now)?;
        let second = self.backend.booked_slots(user_b, now)?;

        let mut pairs = Vec::new();
        for ours in &first {
            for theirs in &second {
                if ours.slot.overlaps(&theirs.slot) {
                    pairs.push(OverlapPair {
                        slot_a: ours.slot.clone(),
                        slot_b: theirs.slot.clone(),
                    });
                }
            }
        }
        Ok(pairs)
    }
}

fn current_millis() -> EpochMillis {
    Utc::now().timestamp_millis()
}

use crate::backend::SchedulingBackend;
use crate::errors::SchedulingError;
use crate::types::{BookedSlot, Booking, DeletedSlot, EpochMillis, Slot, SlotId, User, UserId};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ScheduleState {
    users: BTreeMap<UserId, User>,
    slots: BTreeMap<SlotId, Slot>,
    bookings: BTreeMap<SlotId, Booking>,
    last_user_id: UserId,
    last_slot_id: SlotId,
}

// One lock acquisition per operation keeps the guarded inserts and the
// cascading delete atomic. Ids grow from 1; map order is creation order.
#[derive(Debug, Clone, Default)]
pub struct LocalSchedule {
    state: Arc<Mutex<ScheduleState>>,
}

impl SchedulingBackend for LocalSchedule {
    fn create_user(&self, name: &str) -> Result<User, SchedulingError> {
        let mut state = self.state.lock().unwrap();
        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            name: name.to_owned(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user(&self, user_id: UserId) -> Result<Option<User>, SchedulingError> {
        Ok(self.state.lock().unwrap().users.get(&user_id).cloned())
    }

    fn insert_slot_if_free(
        &self,
        owner_id: UserId,
        start_time: EpochMillis,
        end_time: EpochMillis,
    ) -> Result<Slot, SchedulingError> {
        let mut state = self.state.lock().unwrap();
        let candidate = Slot {
            id: 0,
            owner_id,
            start_time,
            end_time,
        };
        let taken = state
            .slots
            .values()
            .any(|slot| slot.owner_id == owner_id && slot.overlaps(&candidate));
        if taken {
            return Err(SchedulingError::OverlappingSlot);
        }
        state.last_slot_id += 1;
        let slot = Slot {
            id: state.last_slot_id,
            ..candidate
        };
        state.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    fn available_slots(
        &self,
        owner_id: UserId,
        now: EpochMillis,
    ) -> Result<Vec<Slot>, SchedulingError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .slots
            .values()
            .filter(|slot| {
                slot.owner_id == owner_id
                    && slot.starts_after(now)
                    && !state.bookings.contains_key(&slot.id)
            })
            .cloned()
            .collect())
    }

    fn booked_slots(
        &self,
        owner_id: UserId,
        now: EpochMillis,
    ) -> Result<Vec<BookedSlot>, SchedulingError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .slots
            .values()
            .filter(|slot| slot.owner_id == owner_id && slot.starts_after(now))
            .filter_map(|slot| {
                state.bookings.get(&slot.id).map(|booking| BookedSlot {
                    slot: slot.clone(),
                    booking: booking.clone(),
                })
            })
            .collect())
    }

    fn slot_owned_by(
        &self,
        slot_id: SlotId,
        owner_id: UserId,
    ) -> Result<Option<Slot>, SchedulingError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .slots
            .get(&slot_id)
            .filter(|slot| slot.owner_id == owner_id)
            .cloned())
    }

    fn remove_slot(&self, slot_id: SlotId) -> Result<DeletedSlot, SchedulingError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .slots
            .remove(&slot_id)
            .ok_or(SchedulingError::SlotNotFound)?;
        let booking = state.bookings.remove(&slot_id);
        Ok(DeletedSlot { slot, booking })
    }

    fn insert_booking_if_absent(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
        meeting_reference: &str,
    ) -> Result<Booking, SchedulingError> {
        let mut state = self.state.lock().unwrap();
        if !state.slots.contains_key(&slot_id) {
            return Err(SchedulingError::SlotNotFound);
        }
        if state.bookings.contains_key(&slot_id) {
            return Err(SchedulingError::AlreadyBooked);
        }
        let booking = Booking {
            slot_id,
            booker_id,
            meeting_reference: meeting_reference.to_owned(),
        };
        state.bookings.insert(slot_id, booking.clone());
        Ok(booking)
    }

    fn booking_with_slot(
        &self,
        slot_id: SlotId,
    ) -> Result<Option<(Booking, Slot)>, SchedulingError> {
        let state = self.state.lock().unwrap();
        Ok(state.bookings.get(&slot_id).and_then(|booking| {
            state
                .slots
                .get(&slot_id)
                .map(|slot| (booking.clone(), slot.clone()))
        }))
    }

    fn remove_booking(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
    ) -> Result<Booking, SchedulingError> {
        let mut state = self.state.lock().unwrap();
        match state.bookings.entry(slot_id) {
            Entry::Occupied(entry) if entry.get().booker_id == booker_id => Ok(entry.remove()),
            _ => Err(SchedulingError::BookingNotFound),
        }
    }
}

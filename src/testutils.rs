use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::Utc;

use crate::backend::SchedulingBackend;
use crate::errors::SchedulingError;
use crate::types::{BookedSlot, Booking, DeletedSlot, EpochMillis, Slot, SlotId, User, UserId};

const HOUR: EpochMillis = 3_600_000;

pub struct MockSchedulingBackendInner {
    pub success: AtomicBool,
    pub calls_to_create_user: AtomicU64,
    pub calls_to_find_user: AtomicU64,
    pub calls_to_insert_slot_if_free: AtomicU64,
    pub calls_to_available_slots: AtomicU64,
    pub calls_to_booked_slots: AtomicU64,
    pub calls_to_slot_owned_by: AtomicU64,
    pub calls_to_remove_slot: AtomicU64,
    pub calls_to_insert_booking_if_absent: AtomicU64,
    pub calls_to_booking_with_slot: AtomicU64,
    pub calls_to_remove_booking: AtomicU64,
    pub available: Mutex<Vec<Slot>>,
    pub booked: Mutex<Vec<BookedSlot>>,
}

// Every call bumps its per-method counter; flipping `success` off makes
// each call fail with a storage error instead. Lookups answer with
// future rows owned by user 1 and booked by user 2.
#[derive(Clone)]
pub struct MockSchedulingBackend(pub Arc<MockSchedulingBackendInner>);

impl MockSchedulingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_create_user: AtomicU64::default(),
            calls_to_find_user: AtomicU64::default(),
            calls_to_insert_slot_if_free: AtomicU64::default(),
            calls_to_available_slots: AtomicU64::default(),
            calls_to_booked_slots: AtomicU64::default(),
            calls_to_slot_owned_by: AtomicU64::default(),
            calls_to_remove_slot: AtomicU64::default(),
            calls_to_insert_booking_if_absent: AtomicU64::default(),
            calls_to_booking_with_slot: AtomicU64::default(),
            calls_to_remove_booking: AtomicU64::default(),
            available: Mutex::default(),
            booked: Mutex::default(),
        }
    }
}

fn future_slot(slot_id: SlotId, owner_id: UserId) -> Slot {
    let start_time = Utc::now().timestamp_millis() + HOUR;
    Slot {
        id: slot_id,
        owner_id,
        start_time,
        end_time: start_time + HOUR,
    }
}

fn canned_booking(slot_id: SlotId) -> Booking {
    Booking {
        slot_id,
        booker_id: 2,
        meeting_reference: "meet://mock".into(),
    }
}

impl MockSchedulingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockSchedulingBackendInner::new()))
    }

    fn check(&self) -> Result<(), SchedulingError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(SchedulingError::Storage("Supposed to fail".into())),
        }
    }
}

impl SchedulingBackend for MockSchedulingBackend {
    fn create_user(&self, name: &str) -> Result<User, SchedulingError> {
        self.0.calls_to_create_user.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(User {
            id: 1,
            name: name.into(),
        })
    }

    fn find_user(&self, user_id: UserId) -> Result<Option<User>, SchedulingError> {
        self.0.calls_to_find_user.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Some(User {
            id: user_id,
            name: "Mock User".into(),
        }))
    }

    fn insert_slot_if_free(
        &self,
        owner_id: UserId,
        start_time: EpochMillis,
        end_time: EpochMillis,
    ) -> Result<Slot, SchedulingError> {
        self.0
            .calls_to_insert_slot_if_free
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Slot {
            id: 1,
            owner_id,
            start_time,
            end_time,
        })
    }

    fn available_slots(
        &self,
        _owner_id: UserId,
        _now: EpochMillis,
    ) -> Result<Vec<Slot>, SchedulingError> {
        self.0
            .calls_to_available_slots
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.available.lock().unwrap().clone())
    }

    fn booked_slots(
        &self,
        _owner_id: UserId,
        _now: EpochMillis,
    ) -> Result<Vec<BookedSlot>, SchedulingError> {
        self.0.calls_to_booked_slots.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.booked.lock().unwrap().clone())
    }

    fn slot_owned_by(
        &self,
        slot_id: SlotId,
        owner_id: UserId,
    ) -> Result<Option<Slot>, SchedulingError> {
        self.0.calls_to_slot_owned_by.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Some(future_slot(slot_id, owner_id)))
    }

    fn remove_slot(&self, slot_id: SlotId) -> Result<DeletedSlot, SchedulingError> {
        self.0.calls_to_remove_slot.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(DeletedSlot {
            slot: future_slot(slot_id, 1),
            booking: None,
        })
    }

    fn insert_booking_if_absent(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
        meeting_reference: &str,
    ) -> Result<Booking, SchedulingError> {
        self.0
            .calls_to_insert_booking_if_absent
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Booking {
            slot_id,
            booker_id,
            meeting_reference: meeting_reference.into(),
        })
    }

    fn booking_with_slot(
        &self,
        slot_id: SlotId,
    ) -> Result<Option<(Booking, Slot)>, SchedulingError> {
        self.0
            .calls_to_booking_with_slot
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Some((canned_booking(slot_id), future_slot(slot_id, 1))))
    }

    fn remove_booking(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
    ) -> Result<Booking, SchedulingError> {
        self.0.calls_to_remove_booking.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Booking {
            slot_id,
            booker_id,
            meeting_reference: "meet://mock".into(),
        })
    }
}

use crate::errors::SchedulingError;
use crate::types::{BookedSlot, Booking, DeletedSlot, EpochMillis, Slot, SlotId, User, UserId};

// Storage seam. The overlap-guarded slot insert, the uniqueness-guarded
// booking insert, and the cascading slot delete must each be atomic in
// the store.
pub trait SchedulingBackend: Clone + Send + Sync + 'static {
    fn create_user(&self, name: &str) -> Result<User, SchedulingError>;

    fn find_user(&self, user_id: UserId) -> Result<Option<User>, SchedulingError>;

    fn insert_slot_if_free(
        &self,
        owner_id: UserId,
        start_time: EpochMillis,
        end_time: EpochMillis,
    ) -> Result<Slot, SchedulingError>;

    // Both views list slots starting strictly after `now`, in creation
    // order.
    fn available_slots(
        &self,
        owner_id: UserId,
        now: EpochMillis,
    ) -> Result<Vec<Slot>, SchedulingError>;

    fn booked_slots(
        &self,
        owner_id: UserId,
        now: EpochMillis,
    ) -> Result<Vec<BookedSlot>, SchedulingError>;

    // A slot owned by someone else is reported as absent.
    fn slot_owned_by(
        &self,
        slot_id: SlotId,
        owner_id: UserId,
    ) -> Result<Option<Slot>, SchedulingError>;

    fn remove_slot(&self, slot_id: SlotId) -> Result<DeletedSlot, SchedulingError>;

    // First writer wins; every later caller observes `AlreadyBooked`.
    fn insert_booking_if_absent(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
        meeting_reference: &str,
    ) -> Result<Booking, SchedulingError>;

    fn booking_with_slot(
        &self,
        slot_id: SlotId,
    ) -> Result<Option<(Booking, Slot)>, SchedulingError>;

    // Removes the booking only while it still belongs to `booker_id`, so
    // a canceler cannot take out a booking it never authorized against.
    fn remove_booking(
        &self,
        slot_id: SlotId,
        booker_id: UserId,
    ) -> Result<Booking, SchedulingError>;
}

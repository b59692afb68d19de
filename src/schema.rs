// Keep in sync with `migrations/`; regenerate with `diesel print-schema`.

diesel::table! {
    users (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    slots (id) {
        id -> Int8,
        owner_id -> Int8,
        start_time -> Int8,
        end_time -> Int8,
    }
}

diesel::table! {
    bookings (slot_id) {
        slot_id -> Int8,
        booker_id -> Int8,
        meeting_reference -> Varchar,
    }
}

diesel::joinable!(slots -> users (owner_id));
diesel::joinable!(bookings -> slots (slot_id));

diesel::allow_tables_to_appear_in_same_query!(users, slots, bookings);

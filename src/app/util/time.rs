use std::time::{SystemTime, UNIX_EPOCH};

/// Unix-epoch seconds; the timestamp unit every persisted record uses.
pub fn current_time_in_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Unix-epoch milliseconds, used for generated file names.
pub fn current_time_in_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis()
}

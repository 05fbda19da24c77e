use std::time::{SystemTime, UNIX_EPOCH};

/// Get the current time in seconds since the UNIX epoch
pub fn current_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get a timestamp in seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}

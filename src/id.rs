use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Generate a unique integer id for items and calendar entries.
///
/// Timestamp-derived (`ms * 1000`) plus a random offset so two ids created
/// within the same millisecond still differ.
pub fn next_id() -> i64 {
    let offset: i64 = rand::thread_rng().gen_range(0..1000);
    now_ms() * 1000 + offset
}

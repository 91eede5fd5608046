use std::time::SystemTime;

pub struct Timestamp;

impl Timestamp {
    /// Milliseconds since UNIX epoch, used as a cache-busting query value.
    /// A clock before the epoch degrades to zero rather than failing; the
    /// value only needs to vary between calls, not be correct.
    pub fn now_millis() -> u128 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

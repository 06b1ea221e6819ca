use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 11;

/// Supplies opaque identifiers for new lists and tasks.
///
/// The store trusts the generator: it does not check new ids against
/// existing ones.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Base-36 milliseconds since the epoch followed by a base-36 random suffix.
/// Ids sort roughly by creation time and stay short.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRandomIdGenerator;

impl IdGenerator for TimeRandomIdGenerator {
    fn next_id(&self) -> String {
        let millis = Utc::now().timestamp_millis().max(0) as u128;
        let random: String = to_base36(Uuid::new_v4().as_u128())
            .chars()
            .take(RANDOM_SUFFIX_LEN)
            .collect();
        format!("{}{}", to_base36(millis), random)
    }
}

/// Deterministic ids `{prefix}1`, `{prefix}2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

//! Auto-generated child keys
//!
//! Create operations insert their payload under a fresh key made from a
//! nanosecond timestamp. The timestamp is made strictly monotonic per
//! generator: when the clock has not advanced since the previous key (or
//! went backwards), the previous stamp plus one is used instead. Two calls
//! on the same generator therefore never return the same key.
//!
//! ## Key format
//!
//! `~` followed by the URL-safe, unpadded base64 encoding of the stamp's
//! eight big-endian bytes (11 characters). The alphabet contains no `/`, so
//! a key is always a single path segment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix distinguishing generated keys from user-supplied ones
pub const PUSH_KEY_MARKER: char = '~';

/// Source of nanosecond timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Nanoseconds since the Unix epoch
    fn now_nanos(&self) -> u64;
}

/// Wall clock
///
/// Returns 0 if the system clock is before the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// Generator of unique, marker-prefixed child keys
///
/// # Examples
///
/// ```
/// use firetest_core::PushKeyGenerator;
///
/// let keys = PushKeyGenerator::new();
/// let a = keys.next_key();
/// let b = keys.next_key();
/// assert!(a.starts_with('~'));
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct PushKeyGenerator {
    clock: Box<dyn Clock>,
    last: AtomicU64,
}

impl Default for PushKeyGenerator {
    fn default() -> Self {
        PushKeyGenerator::new()
    }
}

impl PushKeyGenerator {
    /// Generator backed by the wall clock
    pub fn new() -> Self {
        PushKeyGenerator::with_clock(SystemClock)
    }

    /// Generator backed by `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        PushKeyGenerator {
            clock: Box::new(clock),
            last: AtomicU64::new(0),
        }
    }

    /// Next stamp: the clock reading, or one past the previous stamp if the
    /// clock has not moved past it.
    pub fn next_stamp(&self) -> u64 {
        let now = self.clock.now_nanos();
        let advance = |last: u64| now.max(last.saturating_add(1));
        match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
        {
            Ok(previous) | Err(previous) => advance(previous),
        }
    }

    /// Next generated key, marker included
    pub fn next_key(&self) -> String {
        encode_key(self.next_stamp())
    }
}

/// Encode a stamp as a marker-prefixed key
pub fn encode_key(stamp: u64) -> String {
    let mut key = String::with_capacity(12);
    key.push(PUSH_KEY_MARKER);
    key.push_str(&URL_SAFE_NO_PAD.encode(stamp.to_be_bytes()));
    key
}

/// Recover the stamp from a generated key; `None` for any other string
pub fn decode_key(key: &str) -> Option<u64> {
    let encoded = key.strip_prefix(PUSH_KEY_MARKER)?;
    let bytes: [u8; 8] = URL_SAFE_NO_PAD.decode(encoded).ok()?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

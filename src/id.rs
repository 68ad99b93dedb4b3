//! Note identifier generation.
//!
//! Ids look like `lx2k9f3a-0b7zq1`: a millisecond timestamp and a random
//! suffix, both in base 36. The timestamp part never repeats or goes
//! backwards within a process, even if the clock does.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

const RANDOM_DIGITS: u32 = 6;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static LAST_MILLIS: AtomicU64 = AtomicU64::new(0);

/// Generate a new note id.
pub fn make_id() -> String {
    let random = Uuid::new_v4().as_u128() % 36u128.pow(RANDOM_DIGITS);
    format!(
        "{}-{:0>width$}",
        to_base36(next_millis() as u128),
        to_base36(random),
        width = RANDOM_DIGITS as usize
    )
}

fn next_millis() -> u64 {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let prev = match LAST_MILLIS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(v) | Err(v) => v,
    };
    now.max(prev + 1)
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

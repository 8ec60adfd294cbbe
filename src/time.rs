use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

pub(crate) fn now() -> SystemTime {
    SystemTime::now()
}

/// Microseconds since the unix epoch, strictly increasing across calls in
/// this process.
pub(crate) fn unique_stamp(now: SystemTime) -> u64 {
    let micros = now
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
        .unwrap_or(0);

    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = micros.max(last.saturating_add(1));
        match LAST_STAMP.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}

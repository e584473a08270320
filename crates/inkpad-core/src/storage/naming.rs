//! Time-based unique file names.

use super::{StorageError, StorageResult};
use std::time::Duration;
use uuid::Uuid;
// std::time::SystemTime panics on wasm32
use web_time::{SystemTime, UNIX_EPOCH};

/// Time-based names tried before falling back to a random suffix.
pub const MAX_NAME_ATTEMPTS: usize = 8;

/// Pause between time-based attempts so the clock can advance.
pub const NAME_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Wait for the clock to advance. Blocking sleeps panic on wasm32, so
/// there the retry happens immediately.
#[cfg(not(target_arch = "wasm32"))]
fn retry_delay() {
    std::thread::sleep(NAME_RETRY_DELAY);
}

#[cfg(target_arch = "wasm32")]
fn retry_delay() {}

/// Claim `<prefix><millis><extension>`.
///
/// `try_claim` creates the entry if the name is free and returns `None` if it
/// is taken. After [`MAX_NAME_ATTEMPTS`] collisions one last name with a
/// random suffix is tried, so a frozen clock cannot stall the caller.
pub fn claim_unique_name<T>(
    prefix: &str,
    extension: &str,
    mut now_millis: impl FnMut() -> u128,
    mut try_claim: impl FnMut(&str) -> StorageResult<Option<T>>,
) -> StorageResult<(String, T)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        if attempt > 0 {
            retry_delay();
        }
        let name = format!("{prefix}{}{extension}", now_millis());
        if let Some(claimed) = try_claim(&name)? {
            return Ok((name, claimed));
        }
        log::debug!("name {name} is taken");
    }

    let name = format!("{prefix}{}-{}{extension}", now_millis(), Uuid::new_v4().simple());
    match try_claim(&name)? {
        Some(claimed) => Ok((name, claimed)),
        None => Err(StorageError::NameExhausted(prefix.to_string())),
    }
}

//! Catch fixtures shared by unit, behaviour and property tests.

use chrono::{DateTime, Utc};

use crate::CatchRecord;

/// Reference instant for fixtures: 2025-06-01T12:00:00Z.
pub const FIXTURE_EPOCH_SECS: i64 = 1_748_779_200;

/// Timestamp `minutes` before [`FIXTURE_EPOCH_SECS`].
#[must_use]
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    let offset = minutes.saturating_mul(60);
    DateTime::<Utc>::from_timestamp(FIXTURE_EPOCH_SECS.saturating_sub(offset), 0)
        .unwrap_or_default()
}

/// A published catch at the given position, logged `minutes` before the
/// fixture epoch. The display name mirrors the user id.
#[must_use]
pub fn catch_at(
    id: &str,
    user_id: &str,
    latitude: f64,
    longitude: f64,
    minutes: i64,
) -> CatchRecord {
    CatchRecord::new(id, user_id, user_id, minutes_ago(minutes)).with_position(latitude, longitude)
}

/// Build `count` catches around one position, newest first, alternating
/// between `users` in round-robin order.
///
/// Each catch is offset northwards by `step_degrees` times its index.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "fixtures spread catches by small degree offsets"
)]
pub fn catches_around(
    prefix: &str,
    users: &[&str],
    latitude: f64,
    longitude: f64,
    count: usize,
    step_degrees: f64,
) -> Vec<CatchRecord> {
    (0..count)
        .map(|n| {
            let user = users
                .get(n.checked_rem(users.len()).unwrap_or(0))
                .copied()
                .unwrap_or("angler");
            let minutes = i64::try_from(n).unwrap_or(i64::MAX);
            catch_at(
                &format!("{prefix}-{n}"),
                user,
                latitude + step_degrees * n as f64,
                longitude,
                minutes,
            )
        })
        .collect()
}

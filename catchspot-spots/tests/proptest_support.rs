//! Proptest strategies producing catch histories around one location.

use catchspot_core::CatchRecord;
use catchspot_core::test_support::{catch_at, minutes_ago};
use proptest::prelude::*;

/// Latitude all generated catches are scattered around.
pub const ORIGIN_LATITUDE: f64 = 55.0;
/// Longitude all generated catches are scattered around.
pub const ORIGIN_LONGITUDE: f64 = 12.0;

const USERS: [&str; 7] = ["ida", "bo", "cy", "dee", "eve", "finn", "gus"];
const SPECIES: [&str; 4] = ["Gedde", "Aborre", "Laks", "Karpe"];

/// Strategy for a catch history of `min_count..=max_count` records.
///
/// Records get unique ids and strictly decreasing timestamps, so the list is
/// newest first. Some records are drafts and some lack coordinates.
pub fn history_strategy(
    min_count: usize,
    max_count: usize,
) -> impl Strategy<Value = Vec<CatchRecord>> {
    proptest::collection::vec(catch_strategy(), min_count..=max_count).prop_map(|catches| {
        catches
            .into_iter()
            .enumerate()
            .map(|(slot, mut record)| {
                record.id = format!("c{slot}");
                record.created_at = minutes_ago(i64::try_from(slot).unwrap_or(i64::MAX));
                record
            })
            .collect()
    })
}

fn catch_strategy() -> impl Strategy<Value = CatchRecord> {
    (
        -0.01_f64..0.01_f64,
        -0.01_f64..0.01_f64,
        0..USERS.len(),
        proptest::option::of(0..SPECIES.len()),
        proptest::option::of(0.1_f64..15.0_f64),
        proptest::option::of(5.0_f64..120.0_f64),
        proptest::bool::weighted(0.9),
        proptest::bool::weighted(0.1),
    )
        .prop_map(
            |(dy, dx, user, species, weight, length, positioned, draft)| {
                let user_id = USERS.get(user).copied().unwrap_or("ida");
                #[expect(
                    clippy::float_arithmetic,
                    reason = "offsets scatter catches around the origin"
                )]
                let mut record = catch_at(
                    "pending",
                    user_id,
                    ORIGIN_LATITUDE + dy,
                    ORIGIN_LONGITUDE + dx,
                    0,
                );
                record.species = species
                    .and_then(|slot| SPECIES.get(slot))
                    .map(|name| (*name).to_owned());
                record.weight_kg = weight;
                record.length_cm = length;
                if !positioned {
                    record.latitude = None;
                }
                record.is_draft = draft;
                record
            },
        )
}

//! Catch records consumed by the spot engine.
//!
//! Records come from an external store and are never mutated here. Only
//! records with a valid position take part in spatial operations.

use chrono::{DateTime, Utc};
use geo::Coord;

/// A logged catch.
///
/// Coordinates are WGS84 degrees. Either coordinate may be missing, in which
/// case [`CatchRecord::position`] returns `None` and the record is ignored by
/// clustering and leaderboards.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use catchspot_core::CatchRecord;
///
/// let caught_at = DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap_or_default();
/// let record = CatchRecord::new("c1", "u1", "Ida", caught_at)
///     .with_species("Gedde")
///     .with_position(55.68, 12.57);
///
/// assert!(record.is_eligible());
/// assert_eq!(record.position().map(|p| p.y), Some(55.68));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CatchRecord {
    /// Unique catch identifier.
    pub id: String,
    /// Identifier of the angler who logged the catch.
    pub user_id: String,
    /// Display name of the angler.
    pub user_name: String,
    /// Avatar URL of the angler, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub user_avatar: Option<String>,
    /// Species name as entered by the angler.
    #[cfg_attr(feature = "serde", serde(default))]
    pub species: Option<String>,
    /// Weight in kilograms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight_kg: Option<f64>,
    /// Length in centimetres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub length_cm: Option<f64>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
    /// When the catch was logged.
    pub created_at: DateTime<Utc>,
    /// Fishing session the catch belongs to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub session_id: Option<String>,
    /// Drafts are unpublished and never aggregated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_draft: bool,
}

impl CatchRecord {
    /// Construct a published catch without measurements or coordinates.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_avatar: None,
            species: None,
            weight_kg: None,
            length_cm: None,
            latitude: None,
            longitude: None,
            created_at,
            session_id: None,
            is_draft: false,
        }
    }

    /// Set the species name.
    #[must_use]
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Set the weight in kilograms.
    #[must_use]
    pub const fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Set the length in centimetres.
    #[must_use]
    pub const fn with_length_cm(mut self, length_cm: f64) -> Self {
        self.length_cm = Some(length_cm);
        self
    }

    /// Set both coordinates.
    #[must_use]
    pub const fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Attach the catch to a fishing session.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the angler's avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.user_avatar = Some(avatar.into());
        self
    }

    /// Mark the catch as an unpublished draft.
    #[must_use]
    pub const fn as_draft(mut self) -> Self {
        self.is_draft = true;
        self
    }

    /// Return the catch position as `x = longitude`, `y = latitude`.
    ///
    /// Returns `None` unless both coordinates are present, finite and within
    /// the WGS84 range.
    #[must_use]
    pub fn position(&self) -> Option<Coord<f64>> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return None;
        };
        is_valid_position(latitude, longitude).then_some(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Report whether the catch can take part in spatial aggregation.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.is_draft && self.position().is_some()
    }
}

/// Report whether a latitude/longitude pair is finite and inside WGS84 bounds.
///
/// # Examples
/// ```
/// use catchspot_core::is_valid_position;
///
/// assert!(is_valid_position(55.0, 12.0));
/// assert!(!is_valid_position(f64::NAN, 12.0));
/// assert!(!is_valid_position(91.0, 12.0));
/// ```
#[must_use]
pub fn is_valid_position(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

//! Single-pass leader clustering of catches into spots.
//!
//! Catches are visited in input order. Each one joins an existing cluster
//! whose centroid lies within the radius, or opens a new cluster anchored at
//! its own coordinates. Clusters are never merged or re-optimised, so the
//! result depends on input order: callers pass catches newest first.
//!
//! # Examples
//! ```
//! use catchspot_core::SpeciesScorer;
//! use catchspot_core::test_support::catch_at;
//! use catchspot_spots::{ClusterMode, ClusterOptions, cluster_catches};
//!
//! let catches = [
//!     catch_at("a", "u1", 55.0000, 12.0000, 0),
//!     catch_at("b", "u1", 55.0001, 12.0001, 10),
//!     catch_at("c", "u1", 56.0000, 13.0000, 20),
//! ];
//! let options = ClusterOptions::new(300.0, ClusterMode::Individual);
//! let clusters = cluster_catches(&catches, &options, &SpeciesScorer);
//!
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].catch_count, 2);
//! assert_eq!(clusters[0].centroid.y, 55.0);
//! ```

use catchspot_core::{CatchRecord, CatchScorer, distance_meters};
use chrono::{DateTime, Utc};
use geo::Coord;
use log::debug;

/// Whether per-angler tallies are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMode {
    /// One user's catches; no per-angler breakdown.
    Individual,
    /// All users' catches with a per-angler breakdown.
    Collective,
}

/// How a cluster's centroid reacts to new members.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CentroidPolicy {
    /// The centroid stays at the first member's coordinates.
    #[default]
    Fixed,
    /// The centroid tracks the mean of member coordinates.
    ///
    /// Members may end up farther than the radius from the final centroid.
    RunningMean,
}

/// Which matching cluster a catch joins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentPolicy {
    /// The first cluster in creation order within the radius.
    #[default]
    FirstFit,
    /// The closest cluster within the radius; earliest wins ties.
    NearestFit,
}

/// Parameters for [`cluster_catches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Maximum distance in meters between a member and its centroid.
    pub radius_meters: f64,
    /// Whether to keep per-angler tallies.
    pub mode: ClusterMode,
    /// Centroid update rule.
    pub centroid: CentroidPolicy,
    /// Cluster selection rule.
    pub assignment: AssignmentPolicy,
}

impl ClusterOptions {
    /// Fixed-centroid, first-fit clustering with the given radius and mode.
    #[must_use]
    pub const fn new(radius_meters: f64, mode: ClusterMode) -> Self {
        Self {
            radius_meters,
            mode,
            centroid: CentroidPolicy::Fixed,
            assignment: AssignmentPolicy::FirstFit,
        }
    }

    /// Replace the centroid policy.
    #[must_use]
    pub const fn with_centroid(mut self, centroid: CentroidPolicy) -> Self {
        self.centroid = centroid;
        self
    }

    /// Replace the assignment policy.
    #[must_use]
    pub const fn with_assignment(mut self, assignment: AssignmentPolicy) -> Self {
        self.assignment = assignment;
        self
    }
}

/// Species observed in a cluster.
///
/// Named species are kept once each in first-seen order. Catches without a
/// species are counted rather than stored under a placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesSet {
    named: Vec<String>,
    unknown: usize,
}

impl SpeciesSet {
    /// Record one catch's species.
    pub fn record(&mut self, species: Option<&str>) {
        match species {
            Some(name) if !self.contains(name) => self.named.push(name.to_owned()),
            Some(_) => {}
            None => self.unknown = self.unknown.saturating_add(1),
        }
    }

    /// Named species in first-seen order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.named
    }

    /// Report whether `name` was observed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.named.iter().any(|known| known == name)
    }

    /// Report whether any catch lacked a species.
    #[must_use]
    pub const fn has_unknown(&self) -> bool {
        self.unknown > 0
    }

    /// Number of catches without a species.
    #[must_use]
    pub const fn unknown_count(&self) -> usize {
        self.unknown
    }
}

/// One angler's contribution to a collective cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnglerTally {
    /// Angler identifier.
    pub user_id: String,
    /// Angler display name.
    pub user_name: String,
    /// Catches by this angler in the cluster.
    pub catch_count: usize,
    /// Sum of this angler's catch scores in the cluster.
    pub total_score: u64,
}

/// A catch assigned to a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMember {
    /// Catch identifier.
    pub catch_id: String,
    /// Catch position.
    pub location: Coord<f64>,
    /// When the catch was logged.
    pub created_at: DateTime<Utc>,
    /// Score awarded to the catch.
    pub score: u32,
}

/// Aggregate of the catches assigned to one spot.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotCluster {
    /// Cluster centre (`x = longitude`, `y = latitude`).
    pub centroid: Coord<f64>,
    /// Number of member catches.
    pub catch_count: usize,
    /// Sum of member scores.
    pub total_score: u64,
    /// Newest member timestamp.
    pub last_activity: DateTime<Utc>,
    /// Species observed among members.
    pub species: SpeciesSet,
    /// Per-angler tallies in first-seen order; empty in individual mode.
    pub anglers: Vec<AnglerTally>,
    /// Members in assignment order.
    pub members: Vec<ClusterMember>,
    /// Largest positive member weight.
    pub biggest_weight_kg: Option<f64>,
    /// Longest positive member length.
    pub longest_length_cm: Option<f64>,
    /// Distinct sessions among members, in first-seen order.
    pub session_ids: Vec<String>,
}

impl SpotCluster {
    fn open(location: Coord<f64>, created_at: DateTime<Utc>) -> Self {
        Self {
            centroid: location,
            catch_count: 0,
            total_score: 0,
            last_activity: created_at,
            species: SpeciesSet::default(),
            anglers: Vec::new(),
            members: Vec::new(),
            biggest_weight_kg: None,
            longest_length_cm: None,
            session_ids: Vec::new(),
        }
    }

    fn absorb(
        &mut self,
        record: &CatchRecord,
        location: Coord<f64>,
        score: u32,
        options: &ClusterOptions,
    ) {
        self.catch_count = self.catch_count.saturating_add(1);
        self.total_score = self.total_score.saturating_add(u64::from(score));
        self.species.record(record.species.as_deref());
        if record.created_at > self.last_activity {
            self.last_activity = record.created_at;
        }
        self.biggest_weight_kg = larger(self.biggest_weight_kg, record.weight_kg);
        self.longest_length_cm = larger(self.longest_length_cm, record.length_cm);
        if let Some(session) = record.session_id.as_deref()
            && !self.session_ids.iter().any(|known| known == session)
        {
            self.session_ids.push(session.to_owned());
        }
        if options.mode == ClusterMode::Collective {
            self.tally(record, score);
        }
        if options.centroid == CentroidPolicy::RunningMean {
            self.centroid = shifted_mean(self.centroid, location, self.catch_count);
        }
        self.members.push(ClusterMember {
            catch_id: record.id.clone(),
            location,
            created_at: record.created_at,
            score,
        });
    }

    fn tally(&mut self, record: &CatchRecord, score: u32) {
        let existing = self
            .anglers
            .iter_mut()
            .find(|angler| angler.user_id == record.user_id);
        let angler = match existing {
            Some(angler) => angler,
            None => {
                self.anglers.push(AnglerTally {
                    user_id: record.user_id.clone(),
                    user_name: record.user_name.clone(),
                    catch_count: 0,
                    total_score: 0,
                });
                let Some(angler) = self.anglers.last_mut() else {
                    return;
                };
                angler
            }
        };
        angler.catch_count = angler.catch_count.saturating_add(1);
        angler.total_score = angler.total_score.saturating_add(u64::from(score));
    }

    /// Number of distinct anglers (collective mode).
    #[must_use]
    pub fn angler_count(&self) -> usize {
        self.anglers.len()
    }

    /// Mean member score, rounded half up.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "averages of bounded non-negative scores are rounded back to integers"
    )]
    pub fn average_score(&self) -> u64 {
        if self.catch_count == 0 {
            return 0;
        }
        let mean = self.total_score as f64 / self.catch_count as f64;
        (mean + 0.5).floor() as u64
    }

    /// Up to `limit` members, newest first.
    #[must_use]
    pub fn recent_members(&self, limit: usize) -> Vec<&ClusterMember> {
        let mut members: Vec<&ClusterMember> = self.members.iter().collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        members.truncate(limit);
        members
    }
}

/// Incremental leader clustering over a stream of catches.
///
/// Clusters live in a `Vec` in creation order and are addressed by index.
pub struct SpotAccumulator<'s, S: CatchScorer + ?Sized> {
    options: ClusterOptions,
    scorer: &'s S,
    clusters: Vec<SpotCluster>,
}

impl<S: CatchScorer + ?Sized> std::fmt::Debug for SpotAccumulator<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotAccumulator")
            .field("options", &self.options)
            .field("clusters", &self.clusters.len())
            .finish_non_exhaustive()
    }
}

impl<'s, S: CatchScorer + ?Sized> SpotAccumulator<'s, S> {
    /// Start with no clusters.
    #[must_use]
    pub const fn new(options: ClusterOptions, scorer: &'s S) -> Self {
        Self {
            options,
            scorer,
            clusters: Vec::new(),
        }
    }

    /// Assign `record` to a cluster and return that cluster's index.
    ///
    /// Drafts and records without a valid position are skipped and yield
    /// `None`.
    pub fn push(&mut self, record: &CatchRecord) -> Option<usize> {
        let location = match record.position() {
            Some(location) if !record.is_draft => location,
            _ => {
                debug!("Skipped catch {}: draft or missing coordinates", record.id);
                return None;
            }
        };
        let score = self.scorer.score(record);
        let slot = match self.matching_cluster(location) {
            Some(slot) => slot,
            None => {
                self.clusters
                    .push(SpotCluster::open(location, record.created_at));
                self.clusters.len().saturating_sub(1)
            }
        };
        let options = self.options;
        let cluster = self.clusters.get_mut(slot)?;
        cluster.absorb(record, location, score, &options);
        Some(slot)
    }

    fn matching_cluster(&self, location: Coord<f64>) -> Option<usize> {
        let radius = self.options.radius_meters;
        let mut within = self
            .clusters
            .iter()
            .enumerate()
            .map(|(slot, cluster)| (slot, distance_meters(location, cluster.centroid)))
            .filter(|(_, distance)| *distance <= radius);
        match self.options.assignment {
            AssignmentPolicy::FirstFit => within.next().map(|(slot, _)| slot),
            AssignmentPolicy::NearestFit => within
                .reduce(|best, candidate| {
                    if candidate.1 < best.1 {
                        candidate
                    } else {
                        best
                    }
                })
                .map(|(slot, _)| slot),
        }
    }

    /// Clusters formed so far, in creation order.
    #[must_use]
    pub fn clusters(&self) -> &[SpotCluster] {
        &self.clusters
    }

    /// Finish and return all clusters, in creation order.
    #[must_use]
    pub fn into_clusters(self) -> Vec<SpotCluster> {
        self.clusters
    }
}

/// Cluster `catches` in input order. Clusters are returned unsorted, in
/// creation order, singletons included.
#[must_use]
pub fn cluster_catches<S>(
    catches: &[CatchRecord],
    options: &ClusterOptions,
    scorer: &S,
) -> Vec<SpotCluster>
where
    S: CatchScorer + ?Sized,
{
    let mut accumulator = SpotAccumulator::new(*options, scorer);
    for record in catches {
        let _ = accumulator.push(record);
    }
    accumulator.into_clusters()
}

fn larger(current: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (current, candidate.filter(|value| *value > 0.0)) {
        (Some(best), Some(value)) if value > best => Some(value),
        (None, Some(value)) => Some(value),
        (best, _) => best,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "running means are floating-point by nature"
)]
fn shifted_mean(mean: Coord<f64>, sample: Coord<f64>, count: usize) -> Coord<f64> {
    let n = count.max(1) as f64;
    Coord {
        x: mean.x + (sample.x - mean.x) / n,
        y: mean.y + (sample.y - mean.y) / n,
    }
}

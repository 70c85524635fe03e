//! Severity classification and tier weights for surveillance events.
//!
//! Provides the [`SeverityTier`] enum, the [`SeverityTable`] that maps raw
//! event types onto tiers, and the [`WeightTable`] used by the risk scorer.
//! Both tables are immutable data owned by the analytics engine: classifying
//! a new event type means editing the table (or `SEVERITY_OVERRIDES`), never
//! the scoring code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Weight contributed by each `low` event.
pub const WEIGHT_LOW: i64 = 1;

/// Weight contributed by each `medium` event.
pub const WEIGHT_MEDIUM: i64 = 3;

/// Weight contributed by each `high` event.
pub const WEIGHT_HIGH: i64 = 7;

/// Built-in event type classification. Anything not listed here is `low`.
pub const DEFAULT_SEVERITIES: &[(&str, SeverityTier)] = &[
    ("loitering", SeverityTier::Medium),
    ("ppe_missing", SeverityTier::Medium),
    ("intrusion", SeverityTier::High),
    ("fall", SeverityTier::High),
    ("camera_tamper", SeverityTier::High),
    ("abandoned_object", SeverityTier::High),
    ("violence_proxy", SeverityTier::High),
];

// ---------------------------------------------------------------------------
// SeverityTier
// ---------------------------------------------------------------------------

/// Coarse risk classification derived from an event type.
///
/// Variant order is the canonical output order (`low`, `medium`, `high`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// All tiers in canonical order.
    pub const ALL: [SeverityTier; 3] = [SeverityTier::Low, SeverityTier::Medium, SeverityTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Low => "low",
            SeverityTier::Medium => "medium",
            SeverityTier::High => "high",
        }
    }

    /// Parse a tier name, case-insensitively. Accepts `med` as an alias for
    /// `medium`. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(SeverityTier::Low),
            "medium" | "med" => Some(SeverityTier::Medium),
            "high" => Some(SeverityTier::High),
            _ => None,
        }
    }

    /// Position in [`SeverityTier::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            SeverityTier::Low => 0,
            SeverityTier::Medium => 1,
            SeverityTier::High => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// SeverityTable
// ---------------------------------------------------------------------------

/// Lookup table from event type to [`SeverityTier`].
///
/// Lookups are exact (case-sensitive) on the event type string. Unknown
/// types classify as [`SeverityTier::Low`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    tiers: HashMap<String, SeverityTier>,
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_SEVERITIES.iter().map(|&(t, s)| (t, s)))
    }
}

impl SeverityTable {
    /// A table with no entries: every event type classifies as `low`.
    pub fn empty() -> Self {
        Self {
            tiers: HashMap::new(),
        }
    }

    /// Build a table from `(event_type, tier)` pairs. Later pairs win.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SeverityTier)>,
        K: Into<String>,
    {
        Self {
            tiers: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Merge overrides of the form `type=tier,type=tier` on top of this table.
    ///
    /// Whitespace around entries is ignored, as are empty entries, so an
    /// empty string is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::severity::{SeverityTable, SeverityTier};
    ///
    /// let table = SeverityTable::default()
    ///     .with_overrides("loitering=high, smoke=medium")
    ///     .unwrap();
    /// assert_eq!(table.classify("loitering"), SeverityTier::High);
    /// assert_eq!(table.classify("smoke"), SeverityTier::Medium);
    /// ```
    pub fn with_overrides(mut self, overrides: &str) -> Result<Self, CoreError> {
        for entry in overrides.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (event_type, tier) = entry.split_once('=').ok_or_else(|| {
                CoreError::Validation(format!(
                    "severity override '{entry}' must have the form type=tier"
                ))
            })?;

            let event_type = event_type.trim();
            if event_type.is_empty() {
                return Err(CoreError::Validation(format!(
                    "severity override '{entry}' has an empty event type"
                )));
            }

            let tier = SeverityTier::parse(tier).ok_or_else(|| {
                CoreError::Validation(format!(
                    "severity override '{entry}' has unknown tier '{}', expected low, medium or high",
                    tier.trim()
                ))
            })?;

            self.tiers.insert(event_type.to_string(), tier);
        }
        Ok(self)
    }

    /// Classify an event type. Never fails; unknown types are `low`.
    pub fn classify(&self, event_type: &str) -> SeverityTier {
        self.tiers
            .get(event_type)
            .copied()
            .unwrap_or(SeverityTier::Low)
    }

    /// Number of explicitly classified event types.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// WeightTable
// ---------------------------------------------------------------------------

/// Per-tier weights used for weighted risk accumulation.
///
/// Serialised verbatim into risk responses (`{"low":1,"medium":3,"high":7}`)
/// so consumers can audit how a score was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightTable {
    low: i64,
    medium: i64,
    high: i64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            low: WEIGHT_LOW,
            medium: WEIGHT_MEDIUM,
            high: WEIGHT_HIGH,
        }
    }
}

impl WeightTable {
    pub fn weight(&self, tier: SeverityTier) -> i64 {
        match tier {
            SeverityTier::Low => self.low,
            SeverityTier::Medium => self.medium,
            SeverityTier::High => self.high,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Event risk and temporal analytics domain logic.
//!
//! Pure classification, scoring and matrix building over grouped event
//! counts, plus the [`aggregation::EventStore`] boundary those counts come
//! through and the [`analytics::AnalyticsEngine`] that ties them together.

pub mod aggregation;
pub mod analytics;
pub mod error;
pub mod event;
pub mod memory_store;
pub mod risk;
pub mod severity;
pub mod summary;
pub mod temporal_matrix;
pub mod types;
pub mod window;

//! Row structs for the `events` table and its grouped-count projections.

pub mod event;

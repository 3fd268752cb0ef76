#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation, filtering, and map marker selection over energy projects.
//!
//! Every function here is pure over an immutable project slice: summaries
//! and marker lists are computed fresh on each call, and filtered views
//! borrow from the caller's collection without copying projects.

pub mod filter;
pub mod insights;
pub mod markers;
pub mod options;
pub mod palette;
pub mod summary;

pub use filter::{filter, filtered_summary, is_district_heating, matches};
pub use insights::insights;
pub use markers::{markers, select, with_valid_coordinates};
pub use options::filter_options;
pub use palette::{status_color, technology_color};
pub use summary::summarize;

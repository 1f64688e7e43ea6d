// crates/isbmap-core/src/lib.rs

//! # isbmap-core
//!
//! Core engine for the Islamabad facility map: an in-memory store of
//! geo-tagged facility records (hospitals, police stations, parks, mosques,
//! schools, colleges, universities) with free-text query parsing,
//! multi-criteria filtering and distance ranking.
//!
//! The browser shell (see `isbmap-wasm`) owns rendering, persistence and
//! routing; this crate only ever consumes static GeoJSON documents and
//! returns plain data.

pub mod engine;
pub mod error;
pub mod export;
pub mod favorites;
pub mod geo;
pub mod model;
pub mod query;
pub mod route;
pub mod session;
pub mod store;
pub mod text;

// Re-exports
pub use crate::error::{Result, StoreError};
pub use crate::engine::{RankedFacility, SearchFilters};
pub use crate::model::{Category, Facility};
pub use crate::query::{parse_query, ParsedQuery};
pub use crate::session::Session;
pub use crate::store::{FacilityStore, LoadReport, LoadState, StoreStats};

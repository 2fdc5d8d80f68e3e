//! Data-orchestration core for an OMDb-backed movie catalog browser.
//!
//! The crate covers the layer between a UI and the provider: the wire client
//! ([`omdb`]), normalization of the provider's ad-hoc format ([`normalize`]),
//! search/pagination/actor-fallback orchestration ([`catalog`]), a durable
//! de-duplicated favorites collection ([`favorites`]), and the transient
//! UI-facing state it all feeds ([`store`]). Presentation is someone else's
//! job.

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod models;
pub mod normalize;
pub mod omdb;
pub mod store;

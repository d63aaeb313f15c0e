//! Catalog browsing and a local collection of caught creatures
//!
//! [`catalog::PokeApiClient`] pages through the remote PokeAPI listing and
//! fetches per-creature detail. [`collection::CollectionStore`] keeps the
//! caught creatures as one JSON blob in a [`traits::PreferenceStore`].
//! [`trainer::Trainer`] ties both to the catch, rename and release rules.

pub mod catalog;
pub mod collection;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod rules;
pub mod trainer;
pub mod traits;

//! Normalization of Ember generation records into canonical production modes.
//!
//! The heart of the crate is [`mode::classifier::ModeClassifier`], which maps a
//! `(zone_key, raw_mode)` pair onto one label using three injected reference
//! tables ([`mode::tables::ModeTables`]). The remaining modules are the
//! plumbing the `ember-modes` binary needs around it.

pub mod config;
pub mod error;
pub mod input;
pub mod mode;
pub mod models;
pub mod report;

//! Shipping Engine library crate.
//!
//! This crate exposes the core shipping rate resolution engine and
//! API components as reusable modules.  External applications may
//! depend on the `shipping_engine` crate and call into
//! `engine::compute_quote` directly with their own configuration
//! snapshot, or embed the API via `api::build_router`.

pub mod models;
pub mod error;
pub mod snapshot;
pub mod weight;
pub mod charges;
pub mod engine;
pub mod api;

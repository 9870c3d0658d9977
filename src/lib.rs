//! `ChemStock` - client for a B2B marketplace of dyes and chemicals
//!
//! This crate talks to the marketplace's REST backend on behalf of buyers,
//! sellers, and admins: it browses and filters the catalog, places orders and
//! stock requests, and runs the seller and admin dashboards. Session state
//! (logged-in user, display currency, tracked requests) is persisted in a local
//! `SQLite` store.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// REST client for the marketplace backend
pub mod api;
/// Command-line interface
pub mod cli;
/// Configuration management for the backend URL and the session store
pub mod config;
/// Core client logic - forms, pagination, currency, catalog queries, access, and links
pub mod core;
/// SeaORM entity definitions for the session store
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Marketplace data model as returned by the backend
pub mod models;
/// User-facing notifications
pub mod notify;
/// Persisted client session
pub mod store;
/// Page controllers binding the API, local state, and notifications
pub mod views;

/// Scripted transport, in-memory store, and recording notifier for tests
#[cfg(test)]
pub mod test_utils;

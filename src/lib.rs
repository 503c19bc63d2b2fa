//! Storefront state core.
//!
//! A static product catalog, a concurrency-safe favorites store with a
//! multicast change feed, and a projector that merges both into
//! immutable view-state snapshots for presentation.

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod shutdown;
pub mod view;

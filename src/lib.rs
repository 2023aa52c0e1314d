//! Synchronizes DNS zones with the local DNS lists of a Pi-hole.
//!
//! Pi-hole keeps its local records as two flat lists, `"<ip> <name>"` host
//! lines and `"<name>,<target>"` CNAME lines. [`provider::PiholeProvider`]
//! reads those lists into per-zone A, AAAA and CNAME records and writes
//! planned changes back as one batched update.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod plan;
pub mod provider;
pub mod translate;
pub mod zone;

#[cfg(test)]
mod tests;

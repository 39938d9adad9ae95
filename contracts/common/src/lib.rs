//! Shared building blocks for the crowdsale contract suite.
//!
//! This crate provides:
//! - [`CrowdsaleError`] - the error codes returned by every contract.
//! - [`Tier`], [`RateInfo`], [`LockClass`] and [`FounderLock`] - contract
//!   types that cross contract boundaries.
//! - [`interfaces`] - cross-contract clients for the pricing strategy and
//!   the gated token.
//! - [`ttl`] - storage TTL bumping helpers.

#![no_std]

pub mod errors;
pub mod interfaces;
pub mod ttl;
pub mod types;

pub use errors::*;
pub use interfaces::*;
pub use types::*;

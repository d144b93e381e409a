//! # IO Module
//!
//! Interface layer that exposes backend functionality to UI clients.
//! Currently a single REST API; the domain layer underneath is surface
//! agnostic, so additional interfaces can be added without touching it.

pub mod rest;

pub use rest::*;

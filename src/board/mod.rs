//! Client-side kanban board state.
//!
//! The board mirrors tasks held by a remote persistence service, grouped
//! into ordered columns. Edits are applied locally first and persisted in
//! the background, with rollback when persistence fails. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The store and its operations in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Taskboard: client-side state for a kanban task board.
//!
//! This crate keeps an in-memory mirror of a remote task list, grouped into
//! ordered columns, and applies user edits optimistically before persisting
//! them through an abstract gateway. Remote patches from other clients are
//! merged into the same state.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, comments, columns and patches with no I/O
//! - **Ports**: Abstract trait interfaces for persistence and push channels
//! - **Adapters**: In-memory implementations of the ports
//!
//! # Modules
//!
//! - [`board`]: Board state, optimistic mutations and reconciliation

pub mod board;

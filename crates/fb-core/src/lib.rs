//! # fb-core
//!
//! Core types, status workflow, and error types for the feedback board.
//!
//! This crate provides the foundational types shared across all crates:
//! - The `FeedbackItem` entity and its validated creation input
//! - `FeedbackStatus` with its transition table
//! - Listing query, sort, and pagination types
//! - Bulk update and statistics response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod query;
pub mod responses;

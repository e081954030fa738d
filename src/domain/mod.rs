//! Core domain types and logic.

pub mod error;
pub mod pipeline;
pub mod repair;
pub mod sector;
pub mod table;

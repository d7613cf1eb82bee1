//! # lookup-core
//!
//! Core types for the persons lookup workspace.
//!
//! This crate has no I/O. It provides:
//! - The search-type resolver that classifies free-text input (BYU ID, net ID,
//!   email, name) and builds the matching persons API query
//! - Typed person records and the paged result shape returned by searches

pub mod person;
pub mod search_type;

pub use person::{Address, EmployeeSummary, Person, PersonPage};
pub use search_type::{SearchKind, SearchQuery, resolve_search_type};

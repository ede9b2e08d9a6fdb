//! Laneflow Core Types and Definitions
//!
//! This crate provides the foundational types for Laneflow swimlane workflows.
//! It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`]) and graph
//!   node identifiers ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: Actors and steps supplied by callers ([`model`] module)
//! - **Draw**: Node and edge template tags for renderers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;

//! graph-objects - An object-graph mapping layer over a property-graph traversal engine
//!
//! This crate lets callers describe traversals against a property graph and
//! receive strongly-typed domain objects instead of raw vertices, edges and
//! property maps. The traversal engine itself is an injected collaborator
//! behind the [`traversal::TraversalSource`] trait.

pub mod config;
pub mod core;
pub mod parser;
pub mod provider;
pub mod query;
pub mod traversal;

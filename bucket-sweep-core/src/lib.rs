#![doc = "bucket-sweep-core: core pipeline library for bucket-sweep."]

//! This crate contains the traversal, filtering and upload-orchestration
//! logic for bucket-sweep, independent of any concrete storage transport.
//! The storage backend plugs in through [`contract::ObjectStore`].
//!
//! # Usage
//! Add this as a dependency for the pipeline, config and contract types; pair
//! it with an `ObjectStore` implementation (or the exported mock in tests).

pub mod config;
pub mod contract;
pub mod filter;
pub mod pipeline;
pub mod walker;
pub mod worker;

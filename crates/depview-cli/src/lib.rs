//! Workspace analysis for the `depview` binary.
//!
//! The pipeline walks a Go workspace for modules, asks the Go toolchain for
//! each module's packages, assembles the internal dependency graph, and
//! hands the serialized bundle to the HTML renderer.

pub mod analyze;
pub mod config;
pub mod discover;
pub mod golist;
pub mod render;

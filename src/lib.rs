// ABOUTME: Library crate for the Konnektr resource-creation wizard
// Exposes the flow controller, resource catalog, configuration and CLI plumbing

#![allow(missing_docs)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod wizard;

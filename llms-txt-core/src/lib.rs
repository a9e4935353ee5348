#![doc = "llms-txt-core: core pipeline library for llms-txt."]

//! This crate contains the whole content pipeline: metadata extraction,
//! markup stripping, title/description resolution, output path
//! normalization, per-file processing and `llms.txt` rendering.
//! CLI concerns (argument parsing, config files, environment) live in the
//! `llms-txt` crate.
//!
//! # Usage
//! Build a [`config::GeneratorConfig`] and call [`generate::generate`] with a
//! [`discovery::GlobDiscovery`] and a [`store::FsStore`], or with your own
//! implementations of the [`contract`] traits.

pub mod config;
pub mod contract;
pub mod corpus;
pub mod discovery;
pub mod frontmatter;
pub mod generate;
pub mod index;
pub mod markup;
pub mod paths;
pub mod resolve;
pub mod store;

pub use config::GeneratorConfig;
pub use contract::{GenerateError, ManifestEntry, MetaValue, Metadata};
pub use generate::{generate, GenerateReport};

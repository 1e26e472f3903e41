//! Sidebar assembly for documentation sites.
//!
//! This crate provides:
//! - [`SidebarAssembler`]: composes a [`SidebarStructure`] from a
//!   [`Config`](sidebar_config::Config), indexing directory sections with
//!   [`sidebar_index::PathIndexer`]
//! - [`render_export`] / [`write_export`]: the structure as a JS module or
//!   JSON document, under a conventional export name
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sidebar_config::Config;
//! use sidebar_site::{SidebarAssembler, render_export};
//!
//! let config = Config::builtin(Path::new("."));
//! let sidebar = SidebarAssembler::new(&config).assemble()?;
//! print!("{}", render_export(&sidebar, &config.export)?);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod export;
mod structure;

pub use assembler::{AssembleError, SidebarAssembler, indexer_settings_from_config};
pub use export::{ExportError, render_export, write_export};
pub use structure::{SidebarEntry, SidebarStructure};

//! Scaffolding of a new `.agent-console/` directory.
//!
//! Generates a starter configuration from embedded templates:
//! - Global configuration (`config.toml`)
//! - Agent definitions (`agents/*.md`)
//! - Pipelines (`pipelines/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use ac_core::init::{generate_console_structure, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_console_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_console_structure, InitOptions};
pub use templates::{get_template, list_templates};

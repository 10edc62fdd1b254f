//! Configuration for the generator and generated tests.
//!
//! - Schema in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! The config file is optional: without `.wfx/config.yml` every setting has
//! its default.
//!
//! # Example
//!
//! ```
//! use std::fs;
//! use tempfile::TempDir;
//! use workflow_fixtures::config::load_config;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".wfx")).unwrap();
//! fs::write(temp.path().join(".wfx/config.yml"), "timeout_secs: 90").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.timeout_secs, 90);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{config_path, find_project_root, load_config, parse_config, CONFIG_DIR};
pub use schema::{HarnessConfig, ProjectPaths};

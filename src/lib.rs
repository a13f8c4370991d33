#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod android;
pub mod builder;
pub mod config;
pub mod document;
pub mod ios;
pub mod links;
pub mod models;
pub mod platform;
pub mod project;

pub use builder::{BuildResult, PrepareBuilder, PrepareReport};
pub use config::{OutputLayout, ProjectConfig};
pub use document::ConfigElement;
pub use links::{DEFAULT_SCHEME, WILDCARD_PATH, extract_paths, get_universal_links};
pub use models::{Advisory, Extraction, HostEntry, UniversalLinksConfig};
pub use platform::Platform;
pub use project::{CONFIG_FILE_NAME, ConfigError, ConfigXml, WidgetInfo};

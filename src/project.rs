//! Access to the project's `config.xml`.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;
use thiserror::Error;

use crate::document::ConfigElement;
use crate::platform::Platform;

/// File name of the project configuration document.
pub const CONFIG_FILE_NAME: &str = "config.xml";

/// Errors raised while loading the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the document from disk.
  #[error("failed to read {}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The document is not well-formed XML.
  #[error("failed to parse {}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: roxmltree::Error,
  },
}

/// Raw `config.xml` contents, parsed on demand.
#[derive(Debug, Clone)]
pub struct ConfigXml {
  path: PathBuf,
  text: String,
}

impl ConfigXml {
  /// Load `file_name` from the project root.
  pub fn load(project_root: &Path, file_name: &str) -> Result<Self, ConfigError> {
    Self::from_path(project_root.join(file_name))
  }

  /// Load the document from an explicit path.
  pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let path = path.into();
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
      path: path.clone(),
      source,
    })?;
    Ok(Self { path, text })
  }

  #[cfg(test)]
  fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      text: text.into(),
    }
  }

  /// Parse the document into a queryable tree.
  pub fn document(&self) -> Result<Document<'_>, ConfigError> {
    Document::parse(&self.text).map_err(|source| ConfigError::Parse {
      path: self.path.clone(),
      source,
    })
  }
}

/// Identity information carried on the `<widget>` root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetInfo {
  id: String,
  android_package: Option<String>,
  ios_bundle: Option<String>,
  name: String,
}

impl WidgetInfo {
  /// Read identity attributes from the document root.
  pub fn from_root<E: ConfigElement>(root: &E) -> Self {
    Self {
      id: root.attribute("id").unwrap_or_default().to_string(),
      android_package: root
        .non_empty_attribute("android-packageName")
        .map(str::to_owned),
      ios_bundle: root
        .non_empty_attribute("ios-CFBundleIdentifier")
        .map(str::to_owned),
      name: root
        .find("name")
        .and_then(|node| node.text().map(|text| text.trim().to_string()))
        .unwrap_or_default(),
    }
  }

  /// Package or bundle identifier for the platform, falling back to the widget id.
  pub fn package_name(&self, platform: Platform) -> &str {
    let specific = match platform {
      Platform::Android => self.android_package.as_deref(),
      Platform::Ios => self.ios_bundle.as_deref(),
    };
    specific.unwrap_or(self.id.as_str())
  }

  /// Display name of the project, used for platform project directories.
  pub fn project_name(&self) -> &str {
    &self.name
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  const WIDGET: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="com.example.app" android-packageName="com.example.android" version="1.0.0" xmlns="http://www.w3.org/ns/widgets">
  <name> Example App </name>
</widget>"#;

  #[test]
  fn resolves_platform_package_names() {
    let config = ConfigXml::from_text("config.xml", WIDGET);
    let doc = config.document().unwrap();
    let info = WidgetInfo::from_root(&doc.root_element());

    assert_eq!(info.package_name(Platform::Android), "com.example.android");
    assert_eq!(info.package_name(Platform::Ios), "com.example.app");
    assert_eq!(info.project_name(), "Example App");
  }

  #[test]
  fn missing_file_reports_io_error() {
    let temp = tempdir().expect("failed to create temp dir");
    let err = ConfigXml::load(temp.path(), CONFIG_FILE_NAME).unwrap_err();

    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("config.xml"));
  }

  #[test]
  fn malformed_document_reports_parse_error() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join(CONFIG_FILE_NAME), "<widget><universal-links></widget>")
      .expect("failed to write config");

    let config = ConfigXml::load(temp.path(), CONFIG_FILE_NAME).unwrap();
    let err = config.document().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }
}

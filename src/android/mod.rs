//! Android artifacts: manifest intent filters and the web hook page.

pub mod manifest;
pub mod web_hook;

pub use manifest::{patch_android_manifest, write_android_manifest};
pub use web_hook::{generate_android_web_hook, render_android_web_hook};

use crate::links::WILDCARD_PATH;

/// How a declared path is expressed in Android `<data>` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AndroidPath {
  /// Every path under the host; no path attribute is emitted.
  Any,
  /// Exact path, emitted as `android:path`.
  Literal(String),
  /// Glob translated to `android:pathPattern`.
  Pattern(String),
}

impl AndroidPath {
  /// Translate a declared path, turning `*` into `.*` and anchoring at `/`.
  pub fn from_declared(path: &str) -> Self {
    if path == WILDCARD_PATH {
      return Self::Any;
    }

    let anchored = |value: String| {
      if value.starts_with('/') {
        value
      } else {
        format!("/{value}")
      }
    };

    if path.contains('*') {
      Self::Pattern(anchored(path.replace('*', ".*")))
    } else {
      Self::Literal(anchored(path.to_string()))
    }
  }

  /// Name of the `<data>` attribute carrying the path, if any.
  pub fn attribute_name(&self) -> Option<&'static str> {
    match self {
      Self::Any => None,
      Self::Literal(_) => Some("path"),
      Self::Pattern(_) => Some("pathPattern"),
    }
  }

  /// Path value as written to the manifest or link tag. Empty for [`AndroidPath::Any`].
  pub fn value(&self) -> &str {
    match self {
      Self::Any => "",
      Self::Literal(value) | Self::Pattern(value) => value,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::AndroidPath;

  #[test]
  fn wildcard_matches_everything() {
    let path = AndroidPath::from_declared("*");
    assert_eq!(path, AndroidPath::Any);
    assert_eq!(path.attribute_name(), None);
    assert_eq!(path.value(), "");
  }

  #[test]
  fn literal_paths_are_anchored() {
    assert_eq!(
      AndroidPath::from_declared("news/today"),
      AndroidPath::Literal("/news/today".into())
    );
    assert_eq!(
      AndroidPath::from_declared("/news"),
      AndroidPath::Literal("/news".into())
    );
  }

  #[test]
  fn globs_become_patterns() {
    let path = AndroidPath::from_declared("/news/*/comments/*");
    assert_eq!(path, AndroidPath::Pattern("/news/.*/comments/.*".into()));
    assert_eq!(path.attribute_name(), Some("pathPattern"));
  }
}

//! Data structures produced while reading the `<universal-links>` declaration.

use std::fmt;

use serde::Serialize;

/// Normalised contents of the `<universal-links>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalLinksConfig {
  /// Hosts in document order. Duplicates are kept.
  pub hosts: Vec<HostEntry>,
  /// Apple developer team identifier, when declared with a non-empty value.
  pub ios_team_id: Option<String>,
}

/// A single domain eligible for deep-link handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
  /// URL scheme, `http` unless declared otherwise.
  pub scheme: String,
  /// Host name, possibly blank.
  pub name: String,
  /// Allowed paths. `["*"]` (every path) when the host declares no `<path>` children;
  /// empty when none of its `<path>` children carries a `url`.
  pub paths: Vec<String>,
}

impl HostEntry {
  /// Returns `true` when the host accepts every path.
  pub fn matches_all_paths(&self) -> bool {
    self.paths.len() == 1 && self.paths[0] == crate::links::WILDCARD_PATH
  }
}

/// Non-fatal findings reported while reading the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
  /// The configuration document has no `<universal-links>` element.
  MissingDeclaration,
  /// The declaration exists but lists no `<host>` elements.
  NoHosts,
}

impl fmt::Display for Advisory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingDeclaration => write!(
        f,
        "<universal-links> tag is not set in the config.xml. Universal Links plugin is not going to work."
      ),
      Self::NoHosts => write!(
        f,
        "No host is specified in the config.xml. Universal Links plugin is not going to work."
      ),
    }
  }
}

/// Result of reading the declaration: the links, if declared, plus any advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
  /// `None` when the document carries no declaration at all.
  pub links: Option<UniversalLinksConfig>,
  /// Advisories collected along the way.
  pub advisories: Vec<Advisory>,
}

impl Extraction {
  pub(crate) fn present(links: UniversalLinksConfig) -> Self {
    Self {
      links: Some(links),
      advisories: Vec::new(),
    }
  }

  pub(crate) fn absent(advisory: Advisory) -> Self {
    Self {
      links: None,
      advisories: vec![advisory],
    }
  }
}

//! `apple-app-site-association` payloads, one per declared host.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::OutputLayout;
use crate::models::{HostEntry, UniversalLinksConfig};

/// Placeholder used when no team id is declared.
pub const TEAM_ID_PLACEHOLDER: &str = "<YOUR_TEAM_ID_FROM_MEMBER_CENTER>";

/// Top-level association document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteAssociation {
  /// Universal link section.
  pub applinks: AppLinks,
}

/// `applinks` section of the association document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppLinks {
  /// Always empty; kept for older iOS releases that require the key.
  pub apps: Vec<String>,
  /// Per-app path rules.
  pub details: Vec<AppLinkDetail>,
}

/// Paths a single app handles for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppLinkDetail {
  /// `<team id>.<bundle id>`.
  #[serde(rename = "appID")]
  pub app_id: String,
  /// Path patterns handled by the app.
  pub paths: Vec<String>,
}

/// Application identifier combining the team id (or a placeholder) and bundle id.
pub fn app_id(team_id: Option<&str>, bundle_id: &str) -> String {
  format!("{}.{bundle_id}", team_id.unwrap_or(TEAM_ID_PLACEHOLDER))
}

/// Association document for a host.
///
/// A host matching every path also lists `/` so the bare domain opens the app.
pub fn site_association_for_host(app_id: &str, host: &HostEntry) -> SiteAssociation {
  let mut paths = host.paths.clone();
  if host.matches_all_paths() {
    paths.push("/".to_string());
  }

  SiteAssociation {
    applinks: AppLinks {
      apps: Vec::new(),
      details: vec![AppLinkDetail {
        app_id: app_id.to_string(),
        paths,
      }],
    },
  }
}

/// Replace the association directory with one file per host.
pub fn generate_site_association_files(
  layout: &OutputLayout,
  app_id: &str,
  links: &UniversalLinksConfig,
) -> Result<Vec<PathBuf>> {
  let dir = &layout.ios_association_dir;
  match fs::remove_dir_all(dir) {
    Ok(()) => {}
    Err(err) if err.kind() == ErrorKind::NotFound => {}
    Err(err) => {
      return Err(err).with_context(|| format!("failed to remove {}", dir.display()));
    }
  }
  fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

  let mut written = Vec::new();
  for host in &links.hosts {
    let path = layout.association_file(&host.name);
    let json = serde_json::to_string_pretty(&site_association_for_host(app_id, host))?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    written.push(path);
  }

  Ok(written)
}

//! Tool configuration describing where generated artifacts are written.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::project::CONFIG_FILE_NAME;

const DEFAULT_CONFIG_FILE: &str = "universal-links.config.json";

/// Discoverable configuration describing the platform project layout and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Configuration document holding the `<universal-links>` declaration.
  pub config_file: String,
  /// Android manifest patched with intent filters.
  pub android_manifest_path: String,
  /// Directory receiving the generated web hook files.
  pub web_hooks_dir: String,
  /// File name of the Android web hook page, written below `<web_hooks_dir>/android`.
  pub android_web_hook_file: String,
  /// Optional handlebars template replacing the built-in web hook page.
  pub android_web_hook_template: Option<String>,
  /// Root of the generated iOS platform project.
  pub ios_platform_dir: String,
  /// Entitlements files updated inside the iOS project directory.
  pub ios_entitlements_files: Vec<String>,
  /// Suffix of each generated app site association file.
  pub association_file_name: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      config_file: CONFIG_FILE_NAME.into(),
      android_manifest_path: "platforms/android/app/src/main/AndroidManifest.xml".into(),
      web_hooks_dir: "ul_web_hooks".into(),
      android_web_hook_file: "android_web_hook.html".into(),
      android_web_hook_template: None,
      ios_platform_dir: "platforms/ios".into(),
      ios_entitlements_files: vec![
        "Entitlements-Debug.plist".into(),
        "Entitlements-Release.plist".into(),
      ],
      association_file_name: "apple-app-site-association".into(),
    }
  }
}

impl ProjectConfig {
  /// Attempt to load configuration from the project root.
  ///
  /// A missing or unreadable file falls back to the default Cordova layout.
  pub fn discover(project_root: &Path) -> Self {
    let candidate = project_root.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Some(config) => {
        tracing::debug!("Loaded tool configuration from {}", candidate.display());
        config
      }
      None => {
        if candidate.exists() {
          tracing::warn!(
            "Ignoring {} because it could not be parsed; using defaults",
            candidate.display()
          );
        }
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Resolve every configured location against the project root.
  pub fn into_layout(self, project_root: &Path) -> OutputLayout {
    let web_hooks = project_root.join(&self.web_hooks_dir);
    OutputLayout {
      config_xml: project_root.join(&self.config_file),
      android_manifest: project_root.join(&self.android_manifest_path),
      android_web_hook: web_hooks.join("android").join(&self.android_web_hook_file),
      android_web_hook_template: self
        .android_web_hook_template
        .map(|template| project_root.join(template)),
      ios_association_dir: web_hooks.join("ios"),
      association_file_name: self.association_file_name,
      ios_platform_dir: project_root.join(&self.ios_platform_dir),
      ios_entitlements_files: self.ios_entitlements_files,
    }
  }
}

/// Absolute locations of every input and output used by the prepare step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
  /// Project configuration document.
  pub config_xml: PathBuf,
  /// Android manifest to patch.
  pub android_manifest: PathBuf,
  /// Generated Android web hook page.
  pub android_web_hook: PathBuf,
  /// Custom web hook template, if configured.
  pub android_web_hook_template: Option<PathBuf>,
  /// Directory holding generated app site association files.
  pub ios_association_dir: PathBuf,
  /// Suffix of each app site association file name.
  pub association_file_name: String,
  /// Root of the generated iOS platform project.
  pub ios_platform_dir: PathBuf,
  /// Entitlements file names inside the iOS project directory.
  pub ios_entitlements_files: Vec<String>,
}

impl OutputLayout {
  /// Entitlements files for the named iOS project.
  pub fn entitlements_paths(&self, project_name: &str) -> Vec<PathBuf> {
    let project_dir = self.ios_platform_dir.join(project_name);
    self
      .ios_entitlements_files
      .iter()
      .map(|file| project_dir.join(file))
      .collect()
  }

  /// App site association file for a single host.
  pub fn association_file(&self, host_name: &str) -> PathBuf {
    self
      .ios_association_dir
      .join(format!("{host_name}#{}", self.association_file_name))
  }
}

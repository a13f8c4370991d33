//! HTML page listing the `<link rel="alternate">` tags each host has to serve.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::android::AndroidPath;
use crate::config::OutputLayout;
use crate::models::UniversalLinksConfig;

const DEFAULT_TEMPLATE: &str = include_str!("../../assets/android/android_web_hook.html.hbs");

#[derive(Serialize)]
struct WebHookData<'a> {
  package_name: &'a str,
  links: Vec<String>,
}

/// `android-app://` URLs for every host and path, in declaration order.
pub fn android_app_links(package_name: &str, links: &UniversalLinksConfig) -> Vec<String> {
  links
    .hosts
    .iter()
    .flat_map(|host| {
      host.paths.iter().map(move |declared| {
        format!(
          "android-app://{package_name}/{}/{}{}",
          host.scheme,
          host.name,
          AndroidPath::from_declared(declared).value()
        )
      })
    })
    .collect()
}

/// Render the web hook page from a handlebars template.
///
/// The template receives `package_name` and `links`, the list of `android-app://` URLs.
pub fn render_android_web_hook(
  template: &str,
  package_name: &str,
  links: &UniversalLinksConfig,
) -> Result<String> {
  let hbs = Handlebars::new();
  let rendered = hbs.render_template(template, &WebHookData {
    package_name,
    links: android_app_links(package_name, links),
  })?;
  Ok(rendered)
}

/// Write the web hook page to its configured location.
pub fn generate_android_web_hook(
  layout: &OutputLayout,
  package_name: &str,
  links: &UniversalLinksConfig,
) -> Result<()> {
  let template = match &layout.android_web_hook_template {
    Some(path) => fs::read_to_string(path)
      .with_context(|| format!("failed to read web hook template {}", path.display()))?,
    None => DEFAULT_TEMPLATE.to_string(),
  };

  let html = render_android_web_hook(&template, package_name, links)?;
  write_file(&layout.android_web_hook, &html)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

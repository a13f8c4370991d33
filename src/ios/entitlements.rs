//! Associated domains entitlement for the generated Xcode project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plist::{Dictionary, Value};

use crate::models::UniversalLinksConfig;

/// Entitlement key listing the domains the app may handle links for.
pub const ASSOCIATED_DOMAINS_KEY: &str = "com.apple.developer.associated-domains";

/// `applinks:` entries for each host, without duplicates and in first-seen order.
pub fn associated_domains(links: &UniversalLinksConfig) -> Vec<String> {
  let mut domains: Vec<String> = Vec::new();
  for host in &links.hosts {
    let entry = format!("applinks:{}", host.name);
    if !domains.contains(&entry) {
      domains.push(entry);
    }
  }
  domains
}

/// Set the associated domains entitlement, keeping every other key in the file.
pub fn write_entitlements(path: &Path, links: &UniversalLinksConfig) -> Result<()> {
  let mut entitlements = read_entitlements(path)?;
  let domains: Vec<Value> = associated_domains(links)
    .into_iter()
    .map(Value::String)
    .collect();
  entitlements.insert(ASSOCIATED_DOMAINS_KEY.to_string(), Value::Array(domains));

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  Value::Dictionary(entitlements)
    .to_file_xml(path)
    .with_context(|| format!("failed to write {}", path.display()))
}

fn read_entitlements(path: &Path) -> Result<Dictionary> {
  if !path.exists() {
    return Ok(Dictionary::new());
  }

  Value::from_file(path)
    .with_context(|| format!("failed to read {}", path.display()))?
    .into_dictionary()
    .ok_or_else(|| anyhow!("{} does not contain a plist dictionary", path.display()))
}

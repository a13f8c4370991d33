//! Prepare-phase orchestrator that turns the `<universal-links>` declaration into platform files.

use std::path::PathBuf;

use crate::android::{generate_android_web_hook, write_android_manifest};
use crate::config::{OutputLayout, ProjectConfig};
use crate::ios::{app_id, generate_site_association_files, write_entitlements};
use crate::links::get_universal_links;
use crate::models::{Advisory, Extraction, UniversalLinksConfig};
use crate::platform::Platform;
use crate::project::{ConfigXml, WidgetInfo};

/// Generic build result type used across the crate.
pub type BuildResult<T> = anyhow::Result<T>;

/// Outcome of a prepare run.
#[derive(Debug, Clone, Default)]
pub struct PrepareReport {
  /// Normalised declaration, or `None` when the project declares nothing.
  pub links: Option<UniversalLinksConfig>,
  /// Advisories raised while reading the declaration.
  pub advisories: Vec<Advisory>,
  /// Files created or rewritten, in the order they were written.
  pub written: Vec<PathBuf>,
}

impl PrepareReport {
  /// Returns `true` when generation was skipped.
  pub fn is_skipped(&self) -> bool {
    self.written.is_empty() && !self.advisories.is_empty()
  }
}

/// High-level helper invoked once per prepare run.
pub struct PrepareBuilder {
  layout: OutputLayout,
}

impl PrepareBuilder {
  /// Create a builder for the project with an explicit configuration.
  pub fn new(project_root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
    let project_root: PathBuf = project_root.into();
    Self {
      layout: config.into_layout(&project_root),
    }
  }

  /// Create a builder using the configuration discovered in the project root.
  pub fn discover(project_root: impl Into<PathBuf>) -> Self {
    let project_root = project_root.into();
    let config = ProjectConfig::discover(&project_root);
    Self::new(project_root, config)
  }

  /// Resolved input and output locations.
  pub fn layout(&self) -> &OutputLayout {
    &self.layout
  }

  /// Read and normalise the declaration without writing anything.
  pub fn inspect(&self) -> BuildResult<Extraction> {
    let config_xml = ConfigXml::from_path(&self.layout.config_xml)?;
    let doc = config_xml.document()?;
    let extraction = get_universal_links(&doc.root_element());
    report_advisories(&extraction.advisories);
    Ok(extraction)
  }

  /// Generate artifacts for each requested platform.
  pub fn build(&self, platforms: &[Platform]) -> BuildResult<PrepareReport> {
    let config_xml = ConfigXml::from_path(&self.layout.config_xml)?;
    let doc = config_xml.document()?;
    let root = doc.root_element();
    let widget = WidgetInfo::from_root(&root);

    let Extraction {
      links,
      mut advisories,
    } = get_universal_links(&root);

    let Some(links) = links else {
      report_advisories(&advisories);
      return Ok(PrepareReport {
        links: None,
        advisories,
        written: Vec::new(),
      });
    };

    if links.hosts.is_empty() {
      advisories.push(Advisory::NoHosts);
      report_advisories(&advisories);
      return Ok(PrepareReport {
        links: Some(links),
        advisories,
        written: Vec::new(),
      });
    }

    report_advisories(&advisories);
    let mut written = Vec::new();
    for platform in platforms {
      tracing::info!("Activating universal links for {platform}");
      match platform {
        Platform::Android => self.activate_android(&widget, &links, &mut written)?,
        Platform::Ios => self.activate_ios(&widget, &links, &mut written)?,
      }
    }

    Ok(PrepareReport {
      links: Some(links),
      advisories,
      written,
    })
  }

  fn activate_android(
    &self,
    widget: &WidgetInfo,
    links: &UniversalLinksConfig,
    written: &mut Vec<PathBuf>,
  ) -> BuildResult<()> {
    let manifest = &self.layout.android_manifest;
    write_android_manifest(manifest, links)?;
    tracing::debug!("Updated {}", manifest.display());
    written.push(manifest.clone());

    generate_android_web_hook(&self.layout, widget.package_name(Platform::Android), links)?;
    tracing::debug!("Generated {}", self.layout.android_web_hook.display());
    written.push(self.layout.android_web_hook.clone());
    Ok(())
  }

  fn activate_ios(
    &self,
    widget: &WidgetInfo,
    links: &UniversalLinksConfig,
    written: &mut Vec<PathBuf>,
  ) -> BuildResult<()> {
    for path in self.layout.entitlements_paths(widget.project_name()) {
      write_entitlements(&path, links)?;
      tracing::debug!("Updated {}", path.display());
      written.push(path);
    }

    let application_id = app_id(
      links.ios_team_id.as_deref(),
      widget.package_name(Platform::Ios),
    );
    for path in generate_site_association_files(&self.layout, &application_id, links)? {
      tracing::debug!("Generated {}", path.display());
      written.push(path);
    }
    Ok(())
  }
}

fn report_advisories(advisories: &[Advisory]) {
  for advisory in advisories {
    tracing::warn!("{advisory}");
  }
}

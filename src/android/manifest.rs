//! Patch `AndroidManifest.xml` with intent filters for every declared host and path.

use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use handlebars::Handlebars;
use regex::Regex;
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::android::AndroidPath;
use crate::document::ConfigElement;
use crate::models::UniversalLinksConfig;

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

const ACTION_MAIN: &str = "android.intent.action.MAIN";
const ACTION_VIEW: &str = "android.intent.action.VIEW";
const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";
const CATEGORY_DEFAULT: &str = "android.intent.category.DEFAULT";
const CATEGORY_BROWSABLE: &str = "android.intent.category.BROWSABLE";

const INTENT_FILTER_TEMPLATE: &str = include_str!("../../assets/android/intent_filter.xml.hbs");

#[derive(Serialize)]
struct IntentFilterData<'a> {
  host: &'a str,
  scheme: &'a str,
  path_attribute: Option<&'static str>,
  path: &'a str,
}

/// Rewrite the manifest on disk in place.
pub fn write_android_manifest(path: &Path, links: &UniversalLinksConfig) -> Result<()> {
  let source =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let patched = patch_android_manifest(&source, links)
    .with_context(|| format!("failed to patch {}", path.display()))?;
  fs::write(path, patched).with_context(|| format!("failed to write {}", path.display()))
}

/// Replace previously generated intent filters with filters for `links`.
///
/// The launcher activity is switched to `singleTask` so that opened links reuse the running
/// instance. Any VIEW/DEFAULT/BROWSABLE filter carrying `<data>` is treated as generated and
/// removed, which keeps repeated runs stable.
pub fn patch_android_manifest(source: &str, links: &UniversalLinksConfig) -> Result<String> {
  let doc = Document::parse(source).context("AndroidManifest.xml is not well-formed")?;
  let activity = doc
    .descendants()
    .find(is_launcher_activity)
    .ok_or_else(|| anyhow!("failed to locate the launcher activity in AndroidManifest.xml"))?;

  let activity_start = activity.range().start;
  let start_tag_end = activity
    .first_child()
    .map(|child| child.range().start)
    .ok_or_else(|| anyhow!("launcher activity has no children"))?;
  let indent = activity
    .children()
    .find(|child| child.is_element())
    .map(|child| line_indent(source, child.range().start))
    .unwrap_or_default();

  let mut edits: Vec<(Range<usize>, String)> = vec![(
    activity_start..start_tag_end,
    with_single_task_launch_mode(&source[activity_start..start_tag_end]),
  )];

  for stale in doc.descendants().filter(is_universal_link_filter) {
    edits.push((widen_to_line(source, stale.range()), String::new()));
  }

  let insert_at = closing_insertion_point(activity);
  edits.push((insert_at..insert_at, render_intent_filters(links, &indent)?));

  edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
  let mut patched = source.to_string();
  for (range, replacement) in edits {
    patched.replace_range(range, &replacement);
  }

  Ok(patched)
}

fn render_intent_filters(links: &UniversalLinksConfig, indent: &str) -> Result<String> {
  let hbs = Handlebars::new();
  let mut rendered = String::new();

  for host in &links.hosts {
    for declared in &host.paths {
      let path = AndroidPath::from_declared(declared);
      let filter = hbs.render_template(INTENT_FILTER_TEMPLATE, &IntentFilterData {
        host: &host.name,
        scheme: &host.scheme,
        path_attribute: path.attribute_name(),
        path: path.value(),
      })?;

      for line in filter.trim_end().lines() {
        rendered.push('\n');
        rendered.push_str(indent);
        rendered.push_str(line);
      }
    }
  }

  Ok(rendered)
}

fn launch_mode_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r#"android:launchMode\s*=\s*("[^"]*"|'[^']*')"#).expect("invalid launchMode regex")
  })
}

fn with_single_task_launch_mode(start_tag: &str) -> String {
  let pattern = launch_mode_pattern();
  if pattern.is_match(start_tag) {
    pattern
      .replace(start_tag, r#"android:launchMode="singleTask""#)
      .into_owned()
  } else {
    start_tag.replacen("<activity", r#"<activity android:launchMode="singleTask""#, 1)
  }
}

fn is_launcher_activity(node: &Node) -> bool {
  node.is_element()
    && node.tag_name().name() == "activity"
    && node.find_all("intent-filter").iter().any(|filter| {
      declares(filter, "action", ACTION_MAIN) && declares(filter, "category", CATEGORY_LAUNCHER)
    })
}

fn is_universal_link_filter(node: &Node) -> bool {
  node.is_element()
    && node.tag_name().name() == "intent-filter"
    && declares(node, "action", ACTION_VIEW)
    && declares(node, "category", CATEGORY_DEFAULT)
    && declares(node, "category", CATEGORY_BROWSABLE)
    && matches!(node.find_all("data").as_slice(), [data] if has_host_and_scheme(data))
}

fn has_host_and_scheme(data: &Node) -> bool {
  [(ANDROID_NS, "host"), (ANDROID_NS, "scheme")]
    .into_iter()
    .all(|name| data.attribute(name).is_some_and(|value| !value.is_empty()))
}

fn declares(filter: &Node, tag: &str, value: &str) -> bool {
  filter
    .find_all(tag)
    .iter()
    .any(|child| child.attribute((ANDROID_NS, "name")) == Some(value))
}

/// Position right before the activity's closing tag, ahead of any trailing indentation.
fn closing_insertion_point(activity: Node) -> usize {
  match activity.last_child() {
    Some(last) if last.is_text() && last.text().is_some_and(|text| text.trim().is_empty()) => {
      last.range().start
    }
    Some(last) => last.range().end,
    None => activity.range().end,
  }
}

/// Extend a node range backwards over its indentation and the preceding line break.
fn widen_to_line(source: &str, range: Range<usize>) -> Range<usize> {
  let before = source[..range.start].trim_end_matches([' ', '\t']);
  let Some(without_newline) = before.strip_suffix('\n') else {
    return range;
  };
  let start = without_newline
    .strip_suffix('\r')
    .unwrap_or(without_newline)
    .len();
  start..range.end
}

fn line_indent(source: &str, position: usize) -> String {
  let line_start = source[..position].rfind('\n').map_or(0, |index| index + 1);
  source[line_start..position]
    .chars()
    .take_while(|c| *c == ' ' || *c == '\t')
    .collect()
}

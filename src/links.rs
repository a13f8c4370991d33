//! Normalise the `<universal-links>` declaration into [`UniversalLinksConfig`].

use crate::document::ConfigElement;
use crate::models::{Advisory, Extraction, HostEntry, UniversalLinksConfig};

/// Scheme applied to hosts that do not declare one.
pub const DEFAULT_SCHEME: &str = "http";

/// Path value that matches every path under a host.
pub const WILDCARD_PATH: &str = "*";

const DECLARATION_TAG: &str = "universal-links";
const TEAM_ID_TAG: &str = "ios-team-id";
const HOST_TAG: &str = "host";
const PATH_TAG: &str = "path";

/// Read the `<universal-links>` block below the document root.
///
/// Missing or empty attributes degrade to their defaults. The only advisory raised here is
/// [`Advisory::MissingDeclaration`]; deciding what to do about an empty host list is left to
/// the caller.
pub fn get_universal_links<E: ConfigElement>(root: &E) -> Extraction {
  let Some(declaration) = root.find(DECLARATION_TAG) else {
    return Extraction::absent(Advisory::MissingDeclaration);
  };

  let ios_team_id = declaration
    .find(TEAM_ID_TAG)
    .and_then(|node| node.non_empty_attribute("value").map(str::to_owned));

  let hosts = declaration
    .find_all(HOST_TAG)
    .iter()
    .map(host_entry)
    .collect();

  Extraction::present(UniversalLinksConfig { hosts, ios_team_id })
}

fn host_entry<E: ConfigElement>(host: &E) -> HostEntry {
  HostEntry {
    scheme: host
      .non_empty_attribute("scheme")
      .unwrap_or(DEFAULT_SCHEME)
      .to_string(),
    name: host.attribute("name").unwrap_or_default().to_string(),
    paths: extract_paths(host),
  }
}

/// Collect the `url` of every `<path>` child, collapsing to the wildcard when present.
pub fn extract_paths<E: ConfigElement>(host: &E) -> Vec<String> {
  let nodes = host.find_all(PATH_TAG);
  if nodes.is_empty() {
    return vec![WILDCARD_PATH.to_string()];
  }

  let urls: Vec<String> = nodes
    .iter()
    .filter_map(|node| node.non_empty_attribute("url"))
    .map(str::to_owned)
    .collect();

  if urls.iter().any(|url| url == WILDCARD_PATH) {
    return vec![WILDCARD_PATH.to_string()];
  }

  urls
}

#[cfg(test)]
mod tests {
  use super::*;
  use roxmltree::Document;

  fn extract(xml: &str) -> Extraction {
    let doc = Document::parse(xml).unwrap();
    get_universal_links(&doc.root_element())
  }

  fn links(xml: &str) -> UniversalLinksConfig {
    extract(xml).links.expect("declaration should be present")
  }

  fn host(scheme: &str, paths: &[&str]) -> HostEntry {
    HostEntry {
      scheme: scheme.into(),
      name: "*.users.example.com".into(),
      paths: paths.iter().map(|p| p.to_string()).collect(),
    }
  }

  #[test]
  fn absent_when_declaration_is_missing() {
    let extraction = extract(r#"<widget id="com.example"><name>Demo</name></widget>"#);

    assert_eq!(extraction.links, None);
    assert_eq!(extraction.advisories, vec![Advisory::MissingDeclaration]);
  }

  #[test]
  fn empty_declaration_is_present_but_empty() {
    let extraction = extract("<widget><universal-links/></widget>");

    assert_eq!(extraction.links, Some(UniversalLinksConfig::default()));
    assert!(extraction.advisories.is_empty());
  }

  #[test]
  fn reads_team_id() {
    let result = links(r#"<widget><universal-links><ios-team-id value="foobar"/></universal-links></widget>"#);
    assert_eq!(result, UniversalLinksConfig {
      hosts: Vec::new(),
      ios_team_id: Some("foobar".into()),
    });
  }

  #[test]
  fn empty_team_id_is_treated_as_missing() {
    let result = links(r#"<widget><universal-links><ios-team-id value=""/></universal-links></widget>"#);
    assert_eq!(result.ios_team_id, None);

    let result = links(r#"<widget><universal-links><ios-team-id/></universal-links></widget>"#);
    assert_eq!(result.ios_team_id, None);
  }

  #[test]
  fn defaults_scheme_and_paths() {
    let result = links(
      r#"<widget><universal-links><host name="*.users.example.com"/></universal-links></widget>"#,
    );
    assert_eq!(result.hosts, vec![host("http", &["*"])]);
    assert!(result.hosts[0].matches_all_paths());
  }

  #[test]
  fn empty_scheme_falls_back_to_default() {
    let result = links(
      r#"<widget><universal-links><host scheme="" name="*.users.example.com"/></universal-links></widget>"#,
    );
    assert_eq!(result.hosts[0].scheme, "http");
  }

  #[test]
  fn keeps_declared_scheme_verbatim() {
    let result = links(
      r#"<widget><universal-links>
        <host scheme="https" name="*.users.example.com"/>
        <host scheme="HTTPS" name="*.users.example.com"/>
      </universal-links></widget>"#,
    );
    assert_eq!(result.hosts[0].scheme, "https");
    assert_eq!(result.hosts[1].scheme, "HTTPS");
  }

  #[test]
  fn missing_name_becomes_blank() {
    let result = links("<widget><universal-links><host/></universal-links></widget>");
    assert_eq!(result.hosts[0].name, "");
  }

  #[test]
  fn keeps_declared_paths() {
    let result = links(
      r#"<widget><universal-links>
        <host scheme="https" name="*.users.example.com">
          <path url="/some/path1"/>
        </host>
      </universal-links></widget>"#,
    );
    assert_eq!(result.hosts, vec![host("https", &["/some/path1"])]);
  }

  #[test]
  fn wildcard_path_wins_over_explicit_paths() {
    let result = links(
      r#"<widget><universal-links>
        <host scheme="https" name="*.users.example.com">
          <path url="/some/path1"/>
          <path url="*"/>
          <path url="/some/path2"/>
        </host>
      </universal-links></widget>"#,
    );
    assert_eq!(result.hosts, vec![host("https", &["*"])]);
  }

  #[test]
  fn drops_paths_without_url() {
    let result = links(
      r#"<widget><universal-links>
        <host scheme="https" name="*.users.example.com">
          <path url="/some/path1"/>
          <path/>
          <path url=""/>
          <path url="/some/path3"/>
        </host>
      </universal-links></widget>"#,
    );
    assert_eq!(result.hosts, vec![host("https", &["/some/path1", "/some/path3"])]);
  }

  #[test]
  fn paths_without_any_url_leave_an_empty_list() {
    let result = links(
      r#"<widget><universal-links><host name="a.example.com"><path/></host></universal-links></widget>"#,
    );
    assert!(result.hosts[0].paths.is_empty());
  }

  #[test]
  fn preserves_host_order_and_duplicates() {
    let result = links(
      r#"<widget><universal-links>
        <host name="b.example.com"/>
        <host name="a.example.com" event="ignored"/>
        <host name="b.example.com"/>
      </universal-links></widget>"#,
    );
    let names: Vec<&str> = result.hosts.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["b.example.com", "a.example.com", "b.example.com"]);
  }

  #[test]
  fn ignores_nested_declarations() {
    let extraction = extract("<widget><platform><universal-links/></platform></widget>");
    assert_eq!(extraction.links, None);
  }

  #[test]
  fn repeated_reads_are_equal() {
    let xml = r#"<widget><universal-links>
      <ios-team-id value="TEAM"/>
      <host scheme="https" name="example.com"><path url="/a"/></host>
    </universal-links></widget>"#;
    assert_eq!(extract(xml), extract(xml));
  }

  #[test]
  fn serialises_with_camel_case_keys() {
    let result = links(r#"<widget><universal-links><host name="example.com"/></universal-links></widget>"#);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({
      "hosts": [{"scheme": "http", "name": "example.com", "paths": ["*"]}],
      "iosTeamId": null
    }));
  }
}

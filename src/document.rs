//! Minimal element query surface used when reading project configuration documents.

use roxmltree::Node;

/// Structural lookups over a parsed configuration document.
///
/// Lookups only consider direct children of the element and match on the local tag
/// name, so namespaced roots such as Cordova's `<widget xmlns="...">` resolve the same
/// way as plain documents.
pub trait ConfigElement: Sized {
  /// First direct child element with the given tag name.
  fn find(&self, tag: &str) -> Option<Self>;

  /// Every direct child element with the given tag name, in document order.
  fn find_all(&self, tag: &str) -> Vec<Self>;

  /// Raw attribute value, if the attribute is declared on the element.
  fn attribute(&self, name: &str) -> Option<&str>;

  /// Text content of the element.
  fn text(&self) -> Option<&str>;

  /// Attribute value, treating an empty string the same as a missing attribute.
  fn non_empty_attribute(&self, name: &str) -> Option<&str> {
    self.attribute(name).filter(|value| !value.is_empty())
  }
}

impl<'a, 'input> ConfigElement for Node<'a, 'input> {
  fn find(&self, tag: &str) -> Option<Self> {
    self
      .children()
      .find(|child| child.is_element() && child.tag_name().name() == tag)
  }

  fn find_all(&self, tag: &str) -> Vec<Self> {
    self
      .children()
      .filter(|child| child.is_element() && child.tag_name().name() == tag)
      .collect()
  }

  fn attribute(&self, name: &str) -> Option<&str> {
    Node::attribute(self, name)
  }

  fn text(&self) -> Option<&str> {
    Node::text(self)
  }
}

#[cfg(test)]
mod tests {
  use super::ConfigElement;
  use roxmltree::Document;

  #[test]
  fn finds_direct_children_only() {
    let doc = Document::parse(
      r#"<widget><host name="a"><host name="nested"/></host><host name="b"/></widget>"#,
    )
    .unwrap();
    let root = doc.root_element();

    let names: Vec<&str> = root
      .find_all("host")
      .iter()
      .filter_map(|host| host.attribute("name"))
      .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(root.find("host").and_then(|h| h.attribute("name")), Some("a"));
    assert!(root.find("path").is_none());
  }

  #[test]
  fn matches_local_names_under_default_namespace() {
    let doc = Document::parse(
      r#"<widget xmlns="http://www.w3.org/ns/widgets"><name>Demo</name></widget>"#,
    )
    .unwrap();

    let name = doc.root_element().find("name").unwrap();
    assert_eq!(ConfigElement::text(&name), Some("Demo"));
  }

  #[test]
  fn empty_attributes_are_treated_as_missing() {
    let doc = Document::parse(r#"<ios-team-id value=""/>"#).unwrap();
    let root = doc.root_element();

    assert_eq!(ConfigElement::attribute(&root, "value"), Some(""));
    assert_eq!(root.non_empty_attribute("value"), None);
  }
}

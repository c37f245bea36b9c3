//! A small mutable XML tree on top of `quick-xml`.
//!
//! Elements are kept with their attributes in document order. Everything that
//! is not an element (declarations, text, comments, doctypes, ...) is stored as
//! the raw event and written back unchanged.

use std::io::Write;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::XmlError;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Other(Event<'static>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Qualified name, including any namespace prefix.
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style [`Element::set_attr`].
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// The namespace prefix of the element name, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// The element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Unescaped value of the attribute `key`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_owned(), value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Namespace prefixes declared on this element, `""` for the default
    /// namespace, with their URIs.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes().filter_map(|(key, uri)| match key.strip_prefix("xmlns") {
            Some("") => Some(("", uri)),
            Some(rest) => rest.strip_prefix(':').map(|prefix| (prefix, uri)),
            None => None,
        })
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    /// First element in document order, this one included, that matches.
    pub fn find_mut<P>(&mut self, predicate: &P) -> Option<&mut Element>
    where
        P: Fn(&Element) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        find_in(&mut self.children, predicate)
    }

    /// Serializes this element and its descendants, without XML declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn from_start(start: &BytesStart) -> Result<Self, XmlError> {
        let name = std::str::from_utf8(start.name().into_inner())?.to_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.into_inner())?.to_owned();
            let raw = std::str::from_utf8(&attr.value)?;
            attributes.push((key, unescape(raw)?.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }
        Ok(())
    }
}

impl Node {
    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        match self {
            Node::Element(element) => element.write_to(writer),
            Node::Other(event) => {
                writer.write_event(event.clone())?;
                Ok(())
            }
        }
    }
}

fn find_in<'a, P>(nodes: &'a mut [Node], predicate: &P) -> Option<&'a mut Element>
where
    P: Fn(&Element) -> bool,
{
    for node in nodes {
        if let Node::Element(element) = node {
            if let Some(found) = element.find_mut(predicate) {
                return Some(found);
            }
        }
    }
    None
}

/// Namespace bindings in scope, innermost last.
type Scope = Vec<(String, String)>;

fn lookup<'a>(scope: &'a Scope, prefix: &str) -> Option<&'a str> {
    scope
        .iter()
        .rev()
        .find(|(p, _)| p == prefix)
        .map(|(_, uri)| uri.as_str())
}

fn find_ns_in<'a>(
    nodes: &'a mut [Node],
    scope: &Scope,
    namespace: &str,
    local_name: &str,
) -> Option<&'a mut Element> {
    for node in nodes {
        if let Node::Element(element) = node {
            let mut scope = scope.clone();
            scope.extend(
                element
                    .namespace_declarations()
                    .map(|(prefix, uri)| (prefix.to_owned(), uri.to_owned())),
            );
            let prefix = element.prefix().unwrap_or("");
            if element.local_name() == local_name && lookup(&scope, prefix) == Some(namespace) {
                return Some(element);
            }
            if let Some(found) = find_ns_in(&mut element.children, &scope, namespace, local_name) {
                return Some(found);
            }
        }
    }
    None
}

/// A parsed XML document: the prolog, the root element and anything after it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Parses a byte stream into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] for malformed XML, invalid UTF-8 in names or
    /// attributes, and unbalanced tags.
    pub fn parse(bytes: &[u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(bytes);
        let mut open: Vec<Element> = Vec::new();
        let mut nodes = Vec::new();

        loop {
            let node = match reader.read_event()? {
                Event::Start(start) => {
                    open.push(Element::from_start(&start)?);
                    continue;
                }
                Event::Empty(start) => Node::Element(Element::from_start(&start)?),
                Event::End(end) => {
                    let element = open.pop().ok_or_else(|| {
                        let name = String::from_utf8_lossy(end.name().into_inner());
                        XmlError::UnexpectedEnd(name.into_owned())
                    })?;
                    Node::Element(element)
                }
                Event::Eof => break,
                other => Node::Other(other.into_owned()),
            };
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => nodes.push(node),
            }
        }

        if let Some(element) = open.pop() {
            return Err(XmlError::Unclosed(element.name));
        }
        Ok(Self { nodes })
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    /// First element in document order that matches.
    pub fn find_mut<P>(&mut self, predicate: P) -> Option<&mut Element>
    where
        P: Fn(&Element) -> bool,
    {
        find_in(&mut self.nodes, &predicate)
    }

    /// First element in document order with the given local name whose
    /// prefix, or the default namespace, resolves to `namespace`.
    pub fn find_ns_mut(&mut self, namespace: &str, local_name: &str) -> Option<&mut Element> {
        find_ns_in(&mut self.nodes, &Scope::new(), namespace, local_name)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            node.write_to(&mut writer)?;
        }
        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\"><title>a &amp; b</title><g id=\"x\"><rect fill=\"red\"/></g></svg>";

    #[test]
    fn test_parse_tree() {
        let doc = Document::parse(SAMPLE.as_bytes()).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.name, "svg");
        assert_eq!(root.attr("width"), Some("10"));
        let names: Vec<_> = root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["title", "g"]);
    }

    #[test]
    fn test_round_trip() {
        let doc = Document::parse(SAMPLE.as_bytes()).unwrap();
        let bytes = doc.to_bytes().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), SAMPLE);
    }

    #[test]
    fn test_find_mut_and_append() {
        let mut doc = Document::parse(SAMPLE.as_bytes()).unwrap();
        let group = doc.find_mut(|e| e.attr("id") == Some("x")).unwrap();
        group.append(Element::new("circle").with_attr("r", "1"));

        let bytes = doc.root().unwrap().to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with("<g id=\"x\"><rect fill=\"red\"/><circle r=\"1\"/></g></svg>"));
        assert!(!text.starts_with("<?xml"));
    }

    #[test]
    fn test_attribute_escaping() {
        let doc = Document::parse(b"<a title=\"x &lt; y\"/>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.attr("title"), Some("x < y"));
        assert_eq!(root.to_bytes().unwrap(), b"<a title=\"x &lt; y\"/>");
    }

    #[test]
    fn test_set_attr_keeps_order() {
        let mut element = Element::new("a").with_attr("x", "1").with_attr("y", "2");
        element.set_attr("x", "3");
        let attrs: Vec<_> = element.attributes().collect();
        assert_eq!(attrs, [("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_prefixed_names() {
        let element = Element::new("svg:svg");
        assert_eq!(element.prefix(), Some("svg"));
        assert_eq!(element.local_name(), "svg");
        assert_eq!(Element::new("svg").prefix(), None);
    }

    #[test]
    fn test_namespace_declarations() {
        let doc = Document::parse(b"<a xmlns=\"urn:a\" xmlns:b=\"urn:b\" xmlnsx=\"no\" id=\"1\"/>");
        let doc = doc.unwrap();
        let decls: Vec<_> = doc.root().unwrap().namespace_declarations().collect();
        assert_eq!(decls, [("", "urn:a"), ("b", "urn:b")]);
    }

    #[test]
    fn test_find_ns_mut() {
        let mut doc = Document::parse(
            b"<r xmlns:x=\"urn:x\"><e/><y:e xmlns:y=\"urn:y\"/><x:e id=\"found\"/></r>",
        )
        .unwrap();
        let found = doc.find_ns_mut("urn:x", "e").unwrap();
        assert_eq!(found.attr("id"), Some("found"));
        assert!(doc.find_ns_mut("urn:z", "e").is_none());
    }

    #[test]
    fn test_find_ns_mut_default_namespace_scope() {
        let mut doc =
            Document::parse(b"<r><e xmlns=\"urn:d\"><f/></e><f id=\"outside\"/></r>").unwrap();
        let found = doc.find_ns_mut("urn:d", "f").unwrap();
        assert_eq!(found.attr("id"), None);

        let mut doc = Document::parse(b"<e xmlns=\"urn:d\"><f xmlns=\"\"/></e>").unwrap();
        assert!(doc.find_ns_mut("urn:d", "f").is_none());
    }

    #[test]
    fn test_malformed() {
        assert!(Document::parse(b"<a><b></a>").is_err());
        assert!(Document::parse(b"<a>").is_err());
    }
}

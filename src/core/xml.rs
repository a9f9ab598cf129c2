//! A small owned XML element tree with a `quick-xml` reader and writer.

use crate::error::{ExportError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::path::Path;

/// An element with ordered attributes, optional text and child elements.
///
/// Mixed content is not modelled: text directly inside an element is
/// concatenated into `text`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute, replacing an existing one with the same key
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child and return it for further filling
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append an empty child element named `name`
    pub fn child(&mut self, name: &str) -> &mut Element {
        self.push(Element::new(name))
    }

    /// Append `<name>text</name>`
    pub fn text_child(&mut self, name: &str, text: impl Into<String>) -> &mut Element {
        let mut element = Element::new(name);
        element.text = Some(text.into());
        self.push(element)
    }

    /// Append `<name>text</name>` only when there is a non-empty value
    pub fn opt_text_child(&mut self, name: &str, text: Option<impl AsRef<str>>) {
        if let Some(text) = text {
            let text = text.as_ref();
            if !text.is_empty() {
                self.text_child(name, text);
            }
        }
    }

    /// Element name without any namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Namespace prefix of the element name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// First child whose local name equals `name`, ignoring case
    pub fn find_child_ci(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.local_name().eq_ignore_ascii_case(name))
    }

    /// First child matching any of `names`, trying names in order
    pub fn find_any_child_ci(&self, names: &[&str]) -> Option<&Element> {
        names.iter().find_map(|name| self.find_child_ci(name))
    }

    /// Child by exact local name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.local_name() == name)
    }

    /// Text of the child with exact local name `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find_child(name).and_then(|child| child.text.as_deref())
    }

    /// Namespace URI bound to this element's own prefix (or the default namespace)
    pub fn namespace_uri(&self) -> Option<&str> {
        let key: Cow<'_, str> = match self.prefix() {
            Some(prefix) => Cow::Owned(format!("xmlns:{}", prefix)),
            None => Cow::Borrowed("xmlns"),
        };
        self.attr(&key).filter(|uri| !uri.is_empty())
    }
}

pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}

/// Parse a complete document and return its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = start_element(&e)?;
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ExportError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ExportError::Xml(err.to_string()))?;
                append_text(&mut stack, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&mut stack, &text);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExportError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    err
                )))
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ExportError::Xml("unclosed element at end of document".to_string()));
    }
    root.ok_or_else(|| ExportError::Xml("document has no root element".to_string()))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ExportError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ExportError::Xml(err.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ExportError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Serialize with an XML declaration and two-space indentation.
pub fn to_xml_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|err| ExportError::Xml(err.to_string()))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|err| ExportError::Xml(err.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if text.is_none() && element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|err| ExportError::Xml(err.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|err| ExportError::Xml(err.to_string()))?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|err| ExportError::Xml(err.to_string()))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|err| ExportError::Xml(err.to_string()))
}

/// Write the tree to `path`, creating parent directories as needed.
pub fn save_xml(root: &Element, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let xml = to_xml_string(root)?;
    write_file(path, xml.as_bytes())
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| ExportError::io(parent, err))?;
    }
    std::fs::write(path, contents).map_err(|err| ExportError::io(path, err))
}

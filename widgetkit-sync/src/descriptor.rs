//! Project descriptor codec.
//!
//! The descriptor is an MSBuild-style project document. Only two levels are
//! interpreted: `<Project>` and its `<ItemGroup>` children, whose child
//! elements are declarations carrying an `Include` storage path. Everything
//! else is carried through untouched.
//!
//! Elements are matched by local name, so namespaced and SDK-style projects
//! behave the same. Declarations are appended to the first `<ItemGroup>`.

use std::borrow::Cow;
use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;
use xml::attribute::{Attribute, OwnedAttribute};
use xml::name::{Name, OwnedName};
use xml::namespace::Namespace;
use xml::reader::{EventReader, ParserConfig, XmlEvent as ReaderEvent};
use xml::writer::{EmitterConfig, EventWriter, XmlEvent as WriterEvent};
use xmltree::{Element, XMLNode};

use crate::error::{io_err, SyncError};
use crate::paths::normalize;

pub const PROJECT: &str = "Project";
pub const ITEM_GROUP: &str = "ItemGroup";
pub const EMBEDDED_RESOURCE: &str = "EmbeddedResource";
pub const INCLUDE: &str = "Include";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DEFAULT_INDENT: &str = "  ";

/// Codec-level failures.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed descriptor: {0}")]
    Parse(#[from] xml::reader::Error),

    #[error("malformed descriptor: {0}")]
    Structure(&'static str),

    #[error("failed to serialize descriptor: {0}")]
    Write(#[from] xml::writer::Error),

    #[error("descriptor I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One declaration: its element kind and storage path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: String,
    pub path: String,
}

/// Byte-level layout of the source document, replayed on write.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    bom: bool,
    /// The `<?xml ...?>` declaration exactly as written, if there was one.
    declaration: Option<String>,
    line_separator: &'static str,
    indent: String,
    trailing_newline: bool,
}

impl Layout {
    fn detect(body: &[u8], bom: bool) -> Self {
        let declaration = body
            .strip_prefix(b"<?xml")
            .filter(|rest| rest.first().is_some_and(u8::is_ascii_whitespace))
            .and_then(|_| body.windows(2).position(|w| w == b"?>"))
            .and_then(|end| std::str::from_utf8(&body[..end + 2]).ok())
            .map(str::to_owned);

        let line_separator = if body.windows(2).any(|w| w == b"\r\n") {
            "\r\n"
        } else {
            "\n"
        };

        Self {
            bom,
            declaration,
            line_separator,
            indent: detect_indent(body),
            trailing_newline: body.ends_with(b"\n"),
        }
    }
}

/// Leading whitespace of the first indented markup line.
fn detect_indent(body: &[u8]) -> String {
    body.split(|&b| b == b'\n')
        .skip(1)
        .find_map(|line| {
            let width = line.iter().take_while(|&&b| b == b' ' || b == b'\t').count();
            (width > 0 && line.get(width) == Some(&b'<'))
                .then(|| String::from_utf8_lossy(&line[..width]).into_owned())
        })
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

/// In-memory project descriptor.
///
/// Comments and processing instructions around the root element, CDATA
/// sections, the XML declaration, a byte-order mark, line endings and the
/// indentation unit are kept as parsed and written back unchanged.
#[derive(Debug, Clone)]
pub struct Descriptor {
    layout: Layout,
    prolog: Vec<XMLNode>,
    root: Element,
    epilog: Vec<XMLNode>,
}

impl Descriptor {
    pub fn parse<R: Read>(mut reader: R) -> Result<Self, DescriptorError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::from_bytes(&raw)
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, DescriptorError> {
        let (body, bom) = match raw.strip_prefix(UTF8_BOM) {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let config = ParserConfig::new()
            .ignore_comments(false)
            .cdata_to_characters(false);
        let mut events = EventReader::new_with_config(body, config);

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root = None;
        loop {
            match events.next()? {
                ReaderEvent::StartElement {
                    name,
                    attributes,
                    namespace,
                } => {
                    let element = start_element(name, attributes, namespace);
                    root = Some(read_children(&mut events, element)?);
                }
                ReaderEvent::EndDocument => break,
                event => {
                    if let Some(node) = misc_node(event) {
                        match root {
                            Some(_) => epilog.push(node),
                            None => prolog.push(node),
                        }
                    }
                }
            }
        }

        Ok(Self {
            layout: Layout::detect(body, bom),
            prolog,
            root: root.ok_or(DescriptorError::Structure("no root element"))?,
            epilog,
        })
    }

    pub fn write<W: Write>(&self, mut writer: W) -> Result<(), DescriptorError> {
        let separator = self.layout.line_separator;
        if self.layout.bom {
            writer.write_all(UTF8_BOM)?;
        }
        if let Some(declaration) = &self.layout.declaration {
            writer.write_all(declaration.as_bytes())?;
            writer.write_all(separator.as_bytes())?;
        }

        let config = EmitterConfig::new()
            .perform_indent(true)
            .indent_string(self.layout.indent.clone())
            .line_separator(separator)
            .write_document_declaration(false)
            .autopad_comments(false);
        let mut out = EventWriter::new_with_config(writer, config);
        for node in &self.prolog {
            write_node(node, &mut out)?;
        }
        write_element(&self.root, &mut out)?;
        for node in &self.epilog {
            write_node(node, &mut out)?;
        }

        if self.layout.trailing_newline {
            out.into_inner().write_all(separator.as_bytes())?;
        }
        Ok(())
    }

    pub fn to_xml_string(&self) -> Result<String, DescriptorError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Read and parse the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let raw = std::fs::read(path).map_err(|e| io_err(path, e))?;
        Self::from_bytes(&raw).map_err(|source| SyncError::Descriptor {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize in memory first, then overwrite `path` in one write.
    pub fn save(&self, path: &Path) -> Result<(), SyncError> {
        let mut buf = Vec::new();
        self.write(&mut buf).map_err(|source| SyncError::Descriptor {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, buf).map_err(|e| io_err(path, e))
    }

    /// Whether the container that receives new declarations exists.
    pub fn has_container(&self) -> bool {
        self.item_groups().next().is_some()
    }

    /// Every declaration under every `<ItemGroup>`, in document order.
    pub fn declarations(&self) -> Vec<Declaration> {
        self.item_groups()
            .flat_map(|group| group.children.iter())
            .filter_map(as_element)
            .filter_map(|el| {
                el.attributes.get(INCLUDE).map(|path| Declaration {
                    kind: el.name.clone(),
                    path: path.clone(),
                })
            })
            .collect()
    }

    /// Storage paths of embedded-resource declarations starting with `prefix`.
    pub fn embedded_under(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize(prefix);
        self.declarations()
            .into_iter()
            .filter(|d| d.kind == EMBEDDED_RESOURCE && normalize(&d.path).starts_with(&prefix))
            .map(|d| d.path)
            .collect()
    }

    pub fn has_embedded(&self, path: &str) -> bool {
        let path = normalize(path);
        self.declarations()
            .iter()
            .any(|d| d.kind == EMBEDDED_RESOURCE && normalize(&d.path) == path)
    }

    /// Declarations of any kind at exactly `path`.
    pub fn declarations_at(&self, path: &str) -> Vec<Declaration> {
        let path = normalize(path);
        self.declarations()
            .into_iter()
            .filter(|d| normalize(&d.path) == path)
            .collect()
    }

    /// Remove embedded-resource declarations at `path`. Returns how many went.
    pub fn remove_embedded(&mut self, path: &str) -> usize {
        let path = normalize(path);
        self.remove_where(|el| el.name == EMBEDDED_RESOURCE && include_is(el, &path))
    }

    /// Remove declarations of any kind at `path`. Returns how many went.
    pub fn remove_declarations_at(&mut self, path: &str) -> usize {
        let path = normalize(path);
        self.remove_where(|el| include_is(el, &path))
    }

    /// Append an `<EmbeddedResource Include="path"/>` to the container.
    pub fn append_embedded(&mut self, path: &str) -> Result<(), SyncError> {
        let group = self
            .item_groups_mut()
            .next()
            .ok_or(SyncError::MissingContainer)?;

        let mut element = Element::new(EMBEDDED_RESOURCE);
        element.namespace = group.namespace.clone();
        element
            .attributes
            .insert(INCLUDE.to_string(), path.to_string());
        group.children.push(XMLNode::Element(element));
        Ok(())
    }

    fn is_project(&self) -> bool {
        self.root.name == PROJECT
    }

    fn item_groups(&self) -> impl Iterator<Item = &Element> {
        let children: &[XMLNode] = if self.is_project() {
            &self.root.children
        } else {
            &[]
        };
        children
            .iter()
            .filter_map(as_element)
            .filter(|el| el.name == ITEM_GROUP)
    }

    fn item_groups_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        let is_project = self.is_project();
        self.root
            .children
            .iter_mut()
            .filter(move |_| is_project)
            .filter_map(|node| match node {
                XMLNode::Element(el) if el.name == ITEM_GROUP => Some(el),
                _ => None,
            })
    }

    fn remove_where(&mut self, mut pred: impl FnMut(&Element) -> bool) -> usize {
        let mut removed = 0;
        for group in self.item_groups_mut() {
            let before = group.children.len();
            group.children.retain(|node| match node {
                XMLNode::Element(el) => !pred(el),
                _ => true,
            });
            removed += before - group.children.len();
        }
        removed
    }
}

fn as_element(node: &XMLNode) -> Option<&Element> {
    match node {
        XMLNode::Element(el) => Some(el),
        _ => None,
    }
}

fn include_is(el: &Element, normalized: &str) -> bool {
    el.attributes
        .get(INCLUDE)
        .is_some_and(|p| normalize(p) == normalized)
}

// ---------------------------------------------------------------------------
// Event-level reading and writing
// ---------------------------------------------------------------------------

fn start_element(
    name: OwnedName,
    attributes: Vec<OwnedAttribute>,
    namespace: Namespace,
) -> Element {
    let mut element = Element::new(&name.local_name);
    element.prefix = name.prefix;
    element.namespace = name.namespace;
    if !namespace.is_essentially_empty() {
        element.namespaces = Some(namespace);
    }
    for attr in attributes {
        let key = match attr.name.prefix {
            Some(prefix) => format!("{prefix}:{}", attr.name.local_name),
            None => attr.name.local_name,
        };
        element.attributes.insert(key, attr.value);
    }
    element
}

fn read_children<R: Read>(
    events: &mut EventReader<R>,
    mut element: Element,
) -> Result<Element, DescriptorError> {
    loop {
        match events.next()? {
            ReaderEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let child = read_children(events, start_element(name, attributes, namespace))?;
                element.children.push(XMLNode::Element(child));
            }
            ReaderEvent::EndElement { .. } => return Ok(element),
            ReaderEvent::Characters(text) => element.children.push(XMLNode::Text(text)),
            ReaderEvent::CData(text) => element.children.push(XMLNode::CData(text)),
            ReaderEvent::EndDocument => {
                return Err(DescriptorError::Structure("unexpected end of document"))
            }
            event => {
                if let Some(node) = misc_node(event) {
                    element.children.push(node);
                }
            }
        }
    }
}

/// Comments and processing instructions; everything else is dropped.
fn misc_node(event: ReaderEvent) -> Option<XMLNode> {
    match event {
        ReaderEvent::Comment(text) => Some(XMLNode::Comment(text)),
        ReaderEvent::ProcessingInstruction { name, data } => {
            Some(XMLNode::ProcessingInstruction(name, data))
        }
        _ => None,
    }
}

fn write_element<W: Write>(
    element: &Element,
    out: &mut EventWriter<W>,
) -> Result<(), xml::writer::Error> {
    let mut name = Name::local(&element.name);
    name.namespace = element.namespace.as_deref();
    name.prefix = element.prefix.as_deref();

    let attributes: Vec<Attribute<'_>> = element
        .attributes
        .iter()
        .map(|(key, value)| Attribute::new(Name::from(key.as_str()), value))
        .collect();
    let empty = Namespace::empty();
    let namespace = element.namespaces.as_ref().unwrap_or(&empty);

    out.write(WriterEvent::StartElement {
        name,
        attributes: Cow::Owned(attributes),
        namespace: Cow::Borrowed(namespace),
    })?;
    for child in &element.children {
        write_node(child, out)?;
    }
    out.write(WriterEvent::EndElement { name: Some(name) })
}

fn write_node<W: Write>(
    node: &XMLNode,
    out: &mut EventWriter<W>,
) -> Result<(), xml::writer::Error> {
    match node {
        XMLNode::Element(element) => write_element(element, out),
        XMLNode::Text(text) => out.write(WriterEvent::Characters(text)),
        XMLNode::CData(text) => out.write(WriterEvent::CData(text)),
        XMLNode::Comment(text) => out.write(WriterEvent::Comment(text)),
        XMLNode::ProcessingInstruction(name, data) => {
            out.write(WriterEvent::ProcessingInstruction {
                name,
                data: data.as_deref(),
            })
        }
    }
}

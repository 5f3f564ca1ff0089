use std::fmt;

use xmlcraft_writer::escape::Escape;
use xmlcraft_writer::{DefaultEscaper, XmlWriter};

use crate::attributes::{Attributes, NameSetting};
use crate::field::{CommentText, Name, PiData, PiTarget};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

/// Something that can be written as markup.
pub trait WriteXml {
    /// Whether nothing at all would be written.
    fn renders_empty(&self) -> bool;

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result;
}

/// Writes `node` through a fresh writer with the default escaping.
pub(crate) fn display<T: WriteXml>(node: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut writer = XmlWriter::for_writer(f, DefaultEscaper);
    node.write_xml(&mut writer)?;
    writer.finish().map(|_| ())
}

// Text

/// Character data. Stored unescaped, escaped when written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl WriteXml for Text {
    fn renders_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        writer.characters(&self.content)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.content == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.content == *other
    }
}

impl PartialEq<Text> for str {
    fn eq(&self, other: &Text) -> bool {
        self == other.content
    }
}

impl PartialEq<Text> for &str {
    fn eq(&self, other: &Text) -> bool {
        *self == other.content
    }
}

// Comment

/// A comment. Content that cannot be written is dropped when assigned: runs
/// of `-` collapse to one and leading or trailing `-` are removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    content: Option<CommentText>,
}

impl Comment {
    pub fn new(content: impl AsRef<str>) -> Self {
        Self {
            content: CommentText::new(content.as_ref()),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: Option<&str>) {
        self.content = content.and_then(CommentText::new);
    }
}

impl WriteXml for Comment {
    fn renders_empty(&self) -> bool {
        self.content.is_none()
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        match &self.content {
            Some(content) => writer.comment(content),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

// ProcessingInstruction

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessingInstruction {
    target: Option<PiTarget>,
    value: Option<PiData>,
}

impl ProcessingInstruction {
    pub fn new(target: impl AsRef<str>, value: Option<&str>) -> Self {
        Self {
            target: PiTarget::new(target.as_ref()),
            value: value.map(PiData::new),
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_target(&mut self, target: Option<&str>) {
        self.target = target.and_then(PiTarget::new);
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.map(PiData::new);
    }
}

impl WriteXml for ProcessingInstruction {
    fn renders_empty(&self) -> bool {
        self.target.is_none()
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        match &self.target {
            Some(target) => writer.pi(target, self.value.as_deref()),
            None => {
                log::debug!("skipping processing instruction without target");
                Ok(())
            }
        }
    }
}

impl fmt::Display for ProcessingInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

// Element

/// An element. Without a valid name it is written as nothing at all,
/// regardless of its attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: Option<Name>,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Name::new(name.as_ref()),
            attributes: Attributes::new(),
            children: vec![],
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.set(name, Some(value));
        self
    }

    pub fn with_attributes<'a>(
        mut self,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.attributes.update(attributes);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // name

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.and_then(Name::new);
    }

    // attributes

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> NameSetting {
        self.attributes.set(name, value)
    }

    // children

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Replaces the child at `index`, appends when `index` is the number of
    /// children, or removes the child when `node` is `None`.
    ///
    /// Returns `false` and changes nothing if `index` is out of range.
    pub fn set_child(&mut self, index: usize, node: Option<Node>) -> bool {
        let len = self.children.len();
        match node {
            Some(node) if index == len => self.children.push(node),
            Some(node) if index < len => self.children[index] = node,
            None if index < len => {
                self.children.remove(index);
            }
            _ => return false,
        }
        true
    }
}

impl WriteXml for Element {
    fn renders_empty(&self) -> bool {
        self.name.is_none()
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        let name = match &self.name {
            Some(name) => name.as_str(),
            None => {
                log::debug!("skipping element without name");
                return Ok(());
            }
        };

        let start = self.attributes.write_xml(writer.element(name)?)?;
        if self.children.iter().all(Node::renders_empty) {
            return start.finish_empty();
        }

        start.finish()?;
        for child in &self.children {
            child.write_xml(writer)?;
        }
        writer.end_element()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

// Node

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
    ProcessingInstruction(ProcessingInstruction),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Element(_) => NodeType::Element,
            Node::Text(_) => NodeType::Text,
            Node::Comment(_) => NodeType::Comment,
            Node::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl WriteXml for Node {
    fn renders_empty(&self) -> bool {
        match self {
            Node::Element(element) => element.renders_empty(),
            Node::Text(text) => text.renders_empty(),
            Node::Comment(comment) => comment.renders_empty(),
            Node::ProcessingInstruction(pi) => pi.renders_empty(),
        }
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        match self {
            Node::Element(element) => element.write_xml(writer),
            Node::Text(text) => text.write_xml(writer),
            Node::Comment(comment) => comment.write_xml(writer),
            Node::ProcessingInstruction(pi) => pi.write_xml(writer),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}

impl From<ProcessingInstruction> for Node {
    fn from(pi: ProcessingInstruction) -> Self {
        Node::ProcessingInstruction(pi)
    }
}

impl From<MiscNode> for Node {
    fn from(node: MiscNode) -> Self {
        match node {
            MiscNode::Comment(comment) => Node::Comment(comment),
            MiscNode::ProcessingInstruction(pi) => Node::ProcessingInstruction(pi),
        }
    }
}

// MiscNode

/// The nodes allowed next to the root element of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MiscNode {
    Comment(Comment),
    ProcessingInstruction(ProcessingInstruction),
}

impl MiscNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            MiscNode::Comment(_) => NodeType::Comment,
            MiscNode::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        }
    }
}

impl WriteXml for MiscNode {
    fn renders_empty(&self) -> bool {
        match self {
            MiscNode::Comment(comment) => comment.renders_empty(),
            MiscNode::ProcessingInstruction(pi) => pi.renders_empty(),
        }
    }

    fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        match self {
            MiscNode::Comment(comment) => comment.write_xml(writer),
            MiscNode::ProcessingInstruction(pi) => pi.write_xml(writer),
        }
    }
}

impl fmt::Display for MiscNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display(self, f)
    }
}

impl From<Comment> for MiscNode {
    fn from(comment: Comment) -> Self {
        MiscNode::Comment(comment)
    }
}

impl From<ProcessingInstruction> for MiscNode {
    fn from(pi: ProcessingInstruction) -> Self {
        MiscNode::ProcessingInstruction(pi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_take_owned_and_borrowed() {
        let owned = Element::new(String::from("a"))
            .with_child(Text::new(String::from("t")))
            .with_child(Comment::new(String::from("c")))
            .with_child(ProcessingInstruction::new(String::from("p"), None));
        let borrowed = Element::new("a")
            .with_child(Text::new("t"))
            .with_child(Comment::new("c"))
            .with_child(ProcessingInstruction::new("p", None));
        assert_eq!(owned, borrowed);
        assert_eq!("<a>t<!--c--><?p?></a>", owned.to_string());
    }

    #[test]
    fn text() {
        let content = "<Foo & Bar>";
        let text = Text::new(content);
        assert!(text == content);
        assert!(content == text);
        assert_eq!("&lt;Foo &amp; Bar&gt;", text.to_string());
    }

    #[test]
    fn comment() {
        let mut comment = Comment::new("--Foo----Bar--");
        assert_eq!(Some("Foo-Bar"), comment.content());
        assert_eq!("<!--Foo-Bar-->", comment.to_string());

        comment.set_content(Some("----"));
        assert_eq!(None, comment.content());
        assert_eq!("", comment.to_string());
    }

    #[test]
    fn processing_instruction() {
        let mut pi = ProcessingInstruction::new("-fo o <", Some("bar?>"));
        assert_eq!(Some("foo"), pi.target());
        assert_eq!(Some("bar?"), pi.value());
        assert_eq!("<?foo bar??>", pi.to_string());

        pi.set_value(None);
        assert_eq!("<?foo?>", pi.to_string());

        pi.set_target(Some("<?-"));
        assert_eq!(None, pi.target());
        assert_eq!("", pi.to_string());
    }

    #[test]
    fn processing_instruction_reserved_target() {
        let pi = ProcessingInstruction::new("XML", Some("version=\"1.0\""));
        assert_eq!(None, pi.target());
        assert_eq!("", pi.to_string());
    }

    fn sample_element() -> Element {
        Element::new("<test/>")
            .with_attributes([("!foo", "<foz'\">"), ("<bar/>", "boz")])
            .with_child(Text::new("<Hello World!/>"))
            .with_child(ProcessingInstruction::new("foo", Some("bar")))
            .with_child(Comment::new("--foo--bar--"))
    }

    #[test]
    fn element() {
        let mut element = sample_element();
        assert_eq!(Some("test"), element.name());
        assert!(element
            .child(0)
            .and_then(Node::as_text)
            .map_or(false, |text| text == "<Hello World!/>"));

        element.set_name(Some("1Foo/Bar?"));
        assert_eq!(Some("FooBar"), element.name());
        assert_eq!(2, element.attributes().len());
        assert_eq!(Some("<foz'\">"), element.attribute("foo"));
        assert_eq!(Some("boz"), element.attribute("bar"));

        element.set_attribute("bar", None);
        assert_eq!(1, element.attributes().len());
        assert!(!element.attributes().contains("bar"));
        assert_eq!(
            concat!(
                "<FooBar foo=\"&lt;foz'&quot;&gt;\">",
                "&lt;Hello World!/&gt;<?foo bar?><!--foo-bar-->",
                "</FooBar>"
            ),
            element.to_string()
        );

        assert!(element.set_child(0, None));
        assert!(element.set_child(0, None));
        assert!(element.set_child(0, None));
        assert!(!element.set_child(0, None));
        element.set_attribute("foo", None);
        assert_eq!("<FooBar/>", element.to_string());
    }

    #[test]
    fn element_self_closes_when_children_render_empty() {
        let element = Element::new("a")
            .with_child(Comment::new("----"))
            .with_child(Text::new(""))
            .with_child(Element::new("123"))
            .with_child(ProcessingInstruction::new("xml", None));
        assert_eq!(4, element.children().len());
        assert_eq!("<a/>", element.to_string());
    }

    #[test]
    fn element_without_name_renders_nothing() {
        let mut element = Element::new("a")
            .with_attribute("b", "c")
            .with_child(Text::new("text"));
        element.set_name(None);
        assert_eq!(None, element.name());
        assert_eq!("", element.to_string());

        let nested = Element::new("outer").with_child(element);
        assert_eq!("<outer/>", nested.to_string());
    }

    #[test]
    fn set_child_positions() {
        let mut element = Element::new("a");
        assert!(!element.set_child(1, Some(Text::new("x").into())));
        assert!(element.set_child(0, Some(Text::new("x").into())));
        assert!(element.set_child(1, Some(Element::new("b").into())));
        assert!(element.set_child(0, Some(Text::new("y").into())));
        assert_eq!("<a>y<b/></a>", element.to_string());
        assert_eq!(Some(NodeType::Element), element.child(1).map(Node::node_type));
    }

    #[test]
    fn nested_elements() {
        let element = Element::new("html")
            .with_attribute("lang", "en")
            .with_child(
                Element::new("head")
                    .with_child(Element::new("title").with_child(Text::new("T"))),
            )
            .with_child(Element::new("body"));
        assert_eq!(
            "<html lang=\"en\"><head><title>T</title></head><body/></html>",
            element.to_string()
        );
    }

    #[test]
    fn render_is_idempotent() {
        let element = sample_element();
        assert_eq!(element.to_string(), element.to_string());
    }

    #[test]
    fn clone_is_deep() {
        let original = sample_element();
        let mut copy = original.clone();
        assert_eq!(original, copy);
        copy.children_mut().clear();
        assert_ne!(original, copy);
        assert_eq!(3, original.children().len());
    }

    #[test]
    fn misc_node_conversion() {
        let misc: MiscNode = Comment::new("c").into();
        assert_eq!(NodeType::Comment, misc.node_type());
        let node: Node = misc.into();
        assert_eq!("<!--c-->", node.to_string());
    }
}

//! Building XML documents in memory.
//!
//! Every value is sanitized when it is assigned, so a tree built with this
//! crate always renders to well-formed markup. Values that cannot be made
//! valid are dropped: an element without a valid name, a comment without
//! content or a processing instruction without a valid target are written as
//! nothing, while their siblings stay intact.
//!
//! ```
//! use xmlcraft_dom::{Comment, Document, Element, Text};
//!
//! let document = Document::new(
//!     Element::new("greeting")
//!         .with_attribute("lang", "en")
//!         .with_child(Text::new("Hello & welcome"))
//!         .with_child(Comment::new("-- not a terminator --")),
//! )
//! .without_declaration();
//!
//! assert_eq!(
//!     "<greeting lang=\"en\">Hello &amp; welcome<!-- not a terminator --></greeting>",
//!     document.to_string()
//! );
//! ```

pub mod attributes;
pub mod doctype;
pub mod document;
pub mod enforce;
pub mod field;
pub mod node;

pub use crate::attributes::{Attributes, NameSetting};
pub use crate::doctype::DocumentTypeDeclaration;
pub use crate::document::{Document, DocumentNode};
pub use crate::field::Name;
pub use crate::node::{
    Comment, Element, MiscNode, Node, NodeType, ProcessingInstruction, Text, WriteXml,
};

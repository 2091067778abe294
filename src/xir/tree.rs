// XIR tree representation
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of mcd2m.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Worksheet parsed into a tree-based IR (XIRT).
//!
//! **This is a work-in-progress implementation.**
//! It will be augmented only as needed.
//!
//! A [`Document`] is produced by the [`reader`](super::reader),
//!   or can be constructed programmatically using [`Element::new`] and
//!   friends.
//! The tree is never mutated by conversion;
//!   converters only borrow it.
//!
//! Child order is significant:
//!   it is source order,
//!     and converters rely on it both for the order of their output and
//!     for the order in which identifiers are observed.

use std::fmt::Display;

/// Root of a parsed worksheet.
///
/// The root is not itself an element;
///   it holds the document element
///     (ordinarily `worksheet`)
///   as a child.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Document {
    children: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Default::default()
    }

    /// Top-level nodes of the document in source order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The first element child of the document,
    ///   if any.
    pub fn root_element(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push_child(child.into());
        self
    }
}

/// A node within a [`Document`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    /// XML element.
    Element(Element),

    /// Text node.
    ///
    /// A text node cannot contain other [`Node`]s;
    ///   sibling text nodes must exist within an [`Element`].
    Text(String),
}

impl Node {
    /// Yield a reference to the inner value if it is an [`Element`],
    ///   otherwise [`None`].
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(ele) => Some(ele),
            Self::Text(..) => None,
        }
    }

    /// Yield the text of a text node,
    ///   otherwise [`None`].
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(..) => None,
        }
    }

    /// Element name,
    ///   or the empty string for text nodes,
    ///     which have no name.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Element(ele) => ele.name(),
            Self::Text(..) => "",
        }
    }
}

impl From<Element> for Node {
    fn from(ele: Element) -> Self {
        Self::Element(ele)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

/// Element node.
///
/// This represents an [XML element] beginning with an opening tag that is
///   either self-closing or ending with a balanced closing tag.
///
/// [XML element]: https://www.w3.org/TR/REC-xml/#sec-starttags
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Element {
    name: String,
    /// Zero or more attributes.
    attrs: AttrList,
    /// Zero or more child nodes.
    children: Vec<Node>,
}

impl Element {
    /// Begin a new element with no attributes or children.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attrs: AttrList::new(),
            children: vec![],
        }
    }

    /// Qualified element name,
    ///   including any namespace prefix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name`,
    ///   if present.
    #[inline]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.find(name).map(Attr::value)
    }

    /// Child nodes of this element in source order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child node,
    ///   whether element or text.
    #[inline]
    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Text content of this element.
    ///
    /// This is the content of the first text child;
    ///   text following a child element and text nested within child
    ///   elements are not included.
    /// An element without any text child yields the empty string.
    pub fn text(&self) -> &str {
        self.children
            .iter()
            .find_map(Node::as_text)
            .unwrap_or_default()
    }

    pub fn push_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn with_attr<K: Into<String>, V: Into<String>>(
        mut self,
        name: K,
        value: V,
    ) -> Self {
        self.push_attr(Attr::new(name, value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push_child(child.into());
        self
    }
}

impl Display for Element {
    /// Display the element's opening tag without attributes,
    ///   e.g. `<ml:apply>`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

/// Element attribute.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attr {
    name: String,
    value: String,
}

impl Attr {
    pub fn new<K: Into<String>, V: Into<String>>(name: K, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value after unescaping.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// List of attributes.
///
/// Attributes are ordered in XIR so that this IR will be suitable for code
///   formatters and linters,
///     but converters treat them as unordered and look them up by name.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AttrList {
    attrs: Vec<Attr>,
}

impl AttrList {
    /// Construct a new, empty attribute list.
    pub fn new() -> Self {
        Self { attrs: vec![] }
    }

    /// Add an attribute to the end of the attribute list.
    pub fn push(&mut self, attr: Attr) {
        self.attrs.push(attr)
    }

    /// Search for an attribute of the given `name`.
    ///
    /// _You should use this method only when a linear search makes sense._
    ///
    /// This performs an `O(n)` linear search in the worst case.
    /// Worksheet elements carry only a handful of attributes,
    ///   so this is cheaper in practice than maintaining an index.
    ///
    /// If duplicate attributes exist,
    ///   the first one wins.
    pub fn find(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|attr| attr.name() == name)
    }
}

impl<const N: usize> From<[Attr; N]> for AttrList {
    fn from(attrs: [Attr; N]) -> Self {
        AttrList {
            attrs: attrs.into(),
        }
    }
}

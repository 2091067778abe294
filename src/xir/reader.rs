// XIR reader
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

//! Parse XML worksheets into a XIR [`Document`].
//!
//! This uses [`quick_xml`] as the parser.
//!
//! Only elements and text are retained.
//! Comments,
//!   processing instructions,
//!   doctypes,
//!   and the XML declaration carry nothing that a converter can use and
//!   are discarded.
//! Text consisting entirely of whitespace is likewise discarded,
//!   which removes the indentation between elements;
//!     all other text is retained verbatim after unescaping.

use super::{
    tree::{Attr, Document, Element, Node},
    Error,
};
use quick_xml::events::{BytesStart, Event as QuickXmlEvent};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    result,
};

pub type Result<T> = result::Result<T, Error>;

/// Maximum depth of element nesting.
///
/// Real worksheets nest a few dozen levels at most.
pub const MAX_DEPTH: usize = 1024;

/// Parse a worksheet held in memory.
pub fn parse_str(src: &str) -> Result<Document> {
    parse_reader(src.as_bytes())
}

/// Parse a worksheet from any buffered source.
pub fn parse_reader<B: BufRead>(src: B) -> Result<Document> {
    XmlTreeReader::new(src).read_document()
}

/// Parse the worksheet at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse XML into a XIR [`Document`].
///
/// The underlying reader produces a flat stream of events;
///   this reader assembles them into a tree using a stack of open
///   elements
///     (see [`TreeBuilder`]).
pub struct XmlTreeReader<B: BufRead> {
    /// Inner parser.
    reader: quick_xml::Reader<B>,

    /// Buffer for [`quick_xml::Reader`].
    readbuf: Vec<u8>,

    builder: TreeBuilder,
}

impl<B: BufRead> XmlTreeReader<B> {
    pub fn new(reader: B) -> Self {
        let mut reader = quick_xml::Reader::from_reader(reader);

        // Mismatched tags are reported by `TreeBuilder`,
        //   which knows the names of both tags involved.
        reader.check_end_names(false);

        Self {
            reader,
            readbuf: Vec::new(),
            builder: TreeBuilder::default(),
        }
    }

    /// Consume the entire input,
    ///   yielding the completed [`Document`].
    pub fn read_document(mut self) -> Result<Document> {
        loop {
            let pos = self.reader.buffer_position();

            let ev = self
                .reader
                .read_event_into(&mut self.readbuf)
                .map_err(Error::from_xml_at(pos))?;

            match ev {
                // This is the only time we'll consider the document to be
                //   complete.
                QuickXmlEvent::Eof => break,

                QuickXmlEvent::Start(ele) => {
                    self.builder.open(parse_element_open(&ele, pos)?, pos)?;
                }

                QuickXmlEvent::Empty(ele) => {
                    self.builder.open(parse_element_open(&ele, pos)?, pos)?;
                    self.builder.close(None, pos)?;
                }

                QuickXmlEvent::End(ele) => {
                    let name = utf8_owned(ele.name().as_ref())?;
                    self.builder.close(Some(name), pos)?;
                }

                QuickXmlEvent::Text(bytes) => {
                    if !is_xml_whitespace(&bytes) {
                        let text =
                            bytes.unescape().map_err(Error::from_xml_at(pos))?;

                        self.builder.text(text.into_owned());
                    }
                }

                // CDATA is never escaped,
                //   but is otherwise ordinary text.
                QuickXmlEvent::CData(bytes) => {
                    let text = utf8_owned(&bytes.into_inner())?;
                    self.builder.text(text);
                }

                QuickXmlEvent::Comment(..)
                | QuickXmlEvent::Decl(..)
                | QuickXmlEvent::PI(..)
                | QuickXmlEvent::DocType(..) => (),
            }

            self.readbuf.clear();
        }

        self.builder.finish()
    }
}

/// Parse opening element and its attributes into an [`Element`] with no
///   children.
fn parse_element_open(ele: &BytesStart, pos: usize) -> Result<Element> {
    let mut element = Element::new(utf8_owned(ele.name().as_ref())?);

    // Duplicate attributes are kept;
    //   lookup yields the first.
    for attr in ele.attributes().with_checks(false) {
        let attr = attr.map_err(Error::from_xml_at(pos))?;
        let value = attr.unescape_value().map_err(Error::from_xml_at(pos))?;

        element.push_attr(Attr::new(
            utf8_owned(attr.key.as_ref())?,
            value.into_owned(),
        ));
    }

    Ok(element)
}

fn utf8_owned(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(ToOwned::to_owned)
        .map_err(|e| Error::from((e, bytes)))
}

/// Whether `bytes` consist only of XML whitespace
///   (space, tab, carriage return, line feed).
///
/// Note that an empty slice is considered to be whitespace.
fn is_xml_whitespace(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Stack machine assembling elements into a [`Document`].
///
/// The stack holds every element that has been opened but not yet closed,
///   innermost last.
/// Closing an element pops it and appends it to its parent,
///   or to the document itself if the stack is then empty.
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    doc: Document,
}

impl TreeBuilder {
    fn open(&mut self, ele: Element, pos: usize) -> Result<()> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH, pos));
        }

        self.stack.push(ele);
        Ok(())
    }

    /// Close the innermost open element.
    ///
    /// A name of [`None`] indicates a self-closing tag,
    ///   which always matches.
    fn close(&mut self, name: Option<String>, pos: usize) -> Result<()> {
        let ele = match self.stack.pop() {
            Some(ele) => ele,
            None => {
                return Err(Error::UnexpectedClose(
                    name.unwrap_or_default(),
                    pos,
                ))
            }
        };

        if let Some(close) = name {
            if close != ele.name() {
                return Err(Error::UnbalancedTag {
                    open: ele.name().to_owned(),
                    close,
                    pos,
                });
            }
        }

        self.append(Node::Element(ele));
        Ok(())
    }

    fn text(&mut self, text: String) {
        self.append(Node::Text(text));
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None => self.doc.push_child(node),
        }
    }

    fn finish(mut self) -> Result<Document> {
        if let Some(open) = self.stack.pop() {
            return Err(Error::UnclosedElement(open.name().to_owned()));
        }

        match self.doc.root_element() {
            Some(_) => Ok(self.doc),
            None => Err(Error::NoRoot),
        }
    }
}

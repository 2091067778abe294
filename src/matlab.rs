// MATLAB dialect
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

//! Convert a worksheet into a MATLAB script.
//!
//! Conversion is a single depth-first,
//!   left-to-right walk of the worksheet.
//! Each element is dispatched on its [`Tag`] to exactly one rule,
//!   which writes directly to the [`Emitter`].
//! Rules fall into the classes of [`EmissionClass`](crate::tag::EmissionClass):
//!
//!   - _skip_ rules write nothing;
//!   - _traverse_ rules convert each child in order;
//!   - _leaf_ rules write text derived from the element itself; and
//!   - _structural_ rules write fixed syntax around converted children.
//!
//! `ml:apply` has its own resolver;
//!   see [`apply`] for how operators are rendered.
//!
//! Diagnostics
//! ===========
//! Conversion never fails.
//! A tag with no rule,
//!   or an `ml:apply` whose operator cannot be rendered with the operands
//!   that it was given,
//!   produces a diagnostic line written _inline_ into the script,
//!     and conversion carries on with the rest of the worksheet.
//! The result is a partially annotated script rather than no script at
//!   all;
//!     the user is expected to fix up whatever was annotated.
//!
//! Unknown tags are still traversed so that the content of unrecognized
//!   wrappers is not silently lost.
//!
//! Identifiers
//! ===========
//! Every converted `ml:id` is recorded as a reference in the
//!   [`IdentTracker`],
//!     and the left-hand identifier of each `ml:define` is recorded as a
//!     definition _before_ either side is converted.
//! See [`crate::ident`] for why classification is order-sensitive.

mod apply;

pub use apply::Arity;

use crate::{
    emit::Emitter,
    ident::{ident_name, IdentTracker},
    tag::{
        Tag, QN_ATTR_POWER_NUMERATOR, QN_ATTR_SYMBOL, QN_ATTR_UNIT, QN_FUNCTION,
        QN_ID,
    },
    trace::{ConvertTrace, DefaultTrace},
    xir::{Document, Element, Node},
};
use std::io::Write;

/// Statement terminator.
///
/// Terminating with `;` suppresses MATLAB's echo of the result.
const STMT_END: &str = ";\n";

/// Comment marker.
const COMMENT: &str = "% ";

/// Added to every range so that worksheet indices
///   (which may begin at `0`)
///   can be mapped onto MATLAB's one-based arrays.
///
/// The user is expected to define this variable.
pub const ARRAY_OFFSET: &str = "ARRAY_OFFSET";

/// Placeholder for plots,
///   whose content is not available in the worksheet XML.
pub const PLOT_PLACEHOLDER: &str =
    "% a mathcad plot was here but there is no good way to know what was in it\n";

/// Convert `doc` into a MATLAB script written to `out`,
///   recording identifiers in `idents`.
pub fn convert<W: Write>(
    doc: &Document,
    out: &mut Emitter<W>,
    idents: &mut IdentTracker,
) {
    Converter::<W, DefaultTrace>::new(out, idents).convert_document(doc)
}

/// Worksheet-to-MATLAB converter.
///
/// A converter borrows the output and identifier state for the duration
///   of a conversion;
///     both outlive it so that the caller can inspect them afterward.
pub struct Converter<'e, W: Write, T: ConvertTrace = DefaultTrace> {
    out: &'e mut Emitter<W>,
    idents: &'e mut IdentTracker,
    trace: T,

    /// Depth of the element being converted,
    ///   for tracing.
    depth: usize,
}

impl<'e, W: Write, T: ConvertTrace> Converter<'e, W, T> {
    pub fn new(out: &'e mut Emitter<W>, idents: &'e mut IdentTracker) -> Self {
        Self {
            out,
            idents,
            trace: T::default(),
            depth: 0,
        }
    }

    /// Convert an entire document.
    ///
    /// The document root has no name of its own and is treated as the
    ///   synthetic `document` tag,
    ///     which traverses its children.
    pub fn convert_document(&mut self, doc: &Document) {
        self.traverse(doc.children())
    }

    /// Convert a single node.
    ///
    /// Only elements produce output;
    ///   text is consumed by the rule of its parent element,
    ///     if that rule has any use for it.
    pub fn convert(&mut self, node: &Node) {
        match node {
            Node::Element(ele) => self.convert_element(ele),
            Node::Text(..) => (),
        }
    }

    /// Convert `node` if present,
    ///   otherwise write nothing.
    pub fn convert_opt(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.convert(node)
        }
    }

    /// Dispatch an element to the rule for its tag.
    pub fn convert_element(&mut self, ele: &Element) {
        let tag = Tag::from_name(ele.name());

        self.trace.trace_enter(self.depth, ele, &tag);

        self.depth += 1;
        self.dispatch(tag, ele);
        self.depth -= 1;
    }

    fn dispatch(&mut self, tag: Tag, ele: &Element) {
        match tag {
            Tag::PointReleaseData
            | Tag::Metadata
            | Tag::Presentation
            | Tag::CalculationBehavior
            | Tag::Editor
            | Tag::FileFormat
            | Tag::Miscellaneous
            | Tag::TextStyle
            | Tag::Rendering
            | Tag::BinaryContent
            | Tag::OriginRef
            | Tag::ParentRef
            | Tag::Comment
            | Tag::OriginComment
            | Tag::ContentHash => (),

            Tag::Document
            | Tag::Worksheet
            | Tag::Settings
            | Tag::Regions
            | Tag::Region
            | Tag::Calculation
            | Tag::Units
            | Tag::Provenance
            | Tag::Eval
            | Tag::Function => self.traverse(ele.children()),

            Tag::Real => self.out.write_str(ele.text()),
            Tag::Id => self.ident(ele),
            Tag::Imag => self.imag(ele),
            Tag::P => {
                self.out.write_str(COMMENT);
                self.out.write_str(ele.text());
            }

            Tag::Math => {
                self.convert_opt(ele.first_child());
                self.out.write_str(STMT_END);
            }
            Tag::Text => {
                self.convert_opt(ele.first_child());
                self.out.write_char('\n');
            }
            Tag::Apply => self.apply(ele),
            Tag::Parens => {
                self.out.write_char('(');
                self.convert_opt(ele.first_child());
                self.out.write_char(')');
            }
            Tag::Define => self.define(ele),
            Tag::Result => {
                self.out.write_str("; % expected result: ");
                self.convert_opt(ele.first_child());
            }
            Tag::UnitReference => self.unit_reference(ele),
            Tag::UnitMonomial | Tag::UnitedValue => {
                self.join(ele.children(), " * ")
            }
            Tag::Sequence => self.join(ele.children(), ", "),
            Tag::Plot => self.out.write_str(PLOT_PLACEHOLDER),
            Tag::Range => self.range(ele),
            Tag::UnitOverride => {
                self.out.write_str("; % ");
                self.traverse(ele.children());
            }
            Tag::BoundVars => {
                self.out.write_str(" = @(");
                self.join(ele.children(), ", ");
                self.out.write_str(") ");
            }

            Tag::Unknown(name) => {
                self.diagnostic(&format!("'{name}' function not found\n"));
                self.traverse(ele.children());
            }
        }
    }

    /// Write a diagnostic inline into the script.
    fn diagnostic(&mut self, msg: &str) {
        self.trace.trace_diagnostic(self.depth, msg);
        self.out.write_str(msg);
    }

    fn traverse(&mut self, nodes: &[Node]) {
        nodes.iter().for_each(|node| self.convert(node))
    }

    /// Convert each of `nodes`,
    ///   writing `sep` between each.
    fn join(&mut self, nodes: &[Node], sep: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.write_str(sep);
            }

            self.convert(node);
        }
    }

    /// Parenthesized argument list `(a, b, ...)`.
    fn args(&mut self, nodes: &[Node]) {
        self.out.write_char('(');
        self.join(nodes, ", ");
        self.out.write_char(')');
    }

    fn ident(&mut self, ele: &Element) {
        let name = ident_name(ele);

        self.idents.record_reference(&name);
        self.out.write_str(&name);
    }

    /// Imaginary literal,
    ///   e.g. `1j`.
    fn imag(&mut self, ele: &Element) {
        self.out.write_str(ele.text());
        self.out
            .write_str(ele.attr_value(QN_ATTR_SYMBOL).unwrap_or_default());
    }

    /// Unit with optional exponent,
    ///   e.g. `second^-2`.
    fn unit_reference(&mut self, ele: &Element) {
        if let Some(unit) = ele.attr_value(QN_ATTR_UNIT) {
            self.out.write_str(unit);
        }

        if let Some(pow) = ele.attr_value(QN_ATTR_POWER_NUMERATOR) {
            self.out.write_char('^');
            self.out.write_str(pow);
        }
    }

    /// Inclusive range offset into one-based indices,
    ///   e.g. `((0:nmax) + ARRAY_OFFSET)`.
    fn range(&mut self, ele: &Element) {
        let mut children = ele.children().iter();

        self.out.write_str("((");
        self.convert_opt(children.next());
        self.out.write_char(':');
        self.convert_opt(children.next());
        self.out.write_str(") + ");
        self.out.write_str(ARRAY_OFFSET);
        self.out.write_char(')');
    }

    /// Definition `lhs = rhs`.
    ///
    /// An identifier on the left-hand side is defined before the
    ///   right-hand side is converted,
    ///     but the left-hand occurrence is itself converted as an ordinary
    ///     identifier
    ///       (and is therefore never recorded as undefined).
    /// A function definition supplies its own ` = @(...) ` through
    ///   `ml:boundVars`,
    ///     and its name is not recorded as a definition.
    fn define(&mut self, ele: &Element) {
        let mut children = ele.children().iter();
        let lhs = children.next();
        let rhs = children.next();

        let lhs_ele = lhs.and_then(Node::as_element);

        if let Some(id) = lhs_ele.filter(|lhs| lhs.name() == QN_ID) {
            self.idents.record_definition(&ident_name(id));
        }

        self.convert_opt(lhs);

        if lhs_ele.map(Element::name) != Some(QN_FUNCTION) {
            self.out.write_str(" = ");
        }

        self.convert_opt(rhs);
    }
}

#[cfg(test)]
mod test;

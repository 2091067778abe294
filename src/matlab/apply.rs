// MATLAB rendering of operator application
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

//! Resolve `ml:apply` into MATLAB operators and calls.
//!
//! The first child of `ml:apply` is the operator and each remaining
//!   child is an operand,
//!     in order:
//!
//! ```xml
//! <ml:apply>
//!   <ml:plus/>
//!   <ml:real>0.039</ml:real>
//!   <ml:id subscript="t">V</ml:id>
//! </ml:apply>
//! ```
//!
//! Resolution proceeds as follows:
//!
//!   1. An `ml:id` operator is a function call `name(a, b, ...)` with any
//!        number of operands.
//!      `if` is a reserved word in MATLAB and is called as `if_`.
//!   2. Otherwise the operands are classified by [`Arity`]:
//!      - [`Arity::Nullary`] is always a diagnostic;
//!      - [`Arity::Unary`] renders `(-a)`,
//!          `sqrt(a)`,
//!          `Find(a)`,
//!          or `abs(a)`;
//!      - [`Arity::Binary`] renders an infix operation `(a + b)`
//!          (or `(a^b)`, without spaces),
//!          or an index `a(b)`; and
//!      - [`Arity::Nary`] is always a diagnostic.
//!
//! Worksheets nest operations one level per `ml:apply`,
//!   so every rendered operation is parenthesized and operator
//!   precedence never needs to be considered.

use super::Converter;
use crate::{
    tag::Operator,
    trace::ConvertTrace,
    xir::{Element, Node},
};
use std::io::Write;

/// Operands of an `ml:apply` classified by their number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity<'a> {
    Nullary,
    Unary(&'a Node),
    Binary(&'a Node, &'a Node),

    /// Three or more operands.
    Nary(&'a [Node]),
}

impl<'a> Arity<'a> {
    pub fn classify(operands: &'a [Node]) -> Self {
        match operands {
            [] => Self::Nullary,
            [a] => Self::Unary(a),
            [a, b] => Self::Binary(a, b),
            many => Self::Nary(many),
        }
    }
}

/// MATLAB symbol and surrounding padding of an infix operator,
///   if `op` is one.
fn infix(op: Operator) -> Option<(&'static str, &'static str)> {
    match op {
        Operator::Plus => Some(("+", " ")),
        Operator::Minus => Some(("-", " ")),
        Operator::Mult => Some(("*", " ")),
        Operator::Div => Some(("/", " ")),
        Operator::Pow => Some(("^", "")),
        Operator::Equal => Some(("==", " ")),
        Operator::GreaterThan => Some((">", " ")),
        Operator::LessThan => Some(("<", " ")),
        _ => None,
    }
}

/// MATLAB function implementing a unary operator,
///   if `op` is one.
fn unary_fn(op: Operator) -> Option<&'static str> {
    match op {
        Operator::Sqrt => Some("sqrt"),
        Operator::Find => Some("Find"),
        Operator::AbsVal => Some("abs"),
        _ => None,
    }
}

/// Identifier text that must be renamed when called as a function,
///   since it is a reserved word in MATLAB.
const KW_IF: &str = "if";

/// Callee name replacing [`KW_IF`].
const KW_IF_CALL: &str = "if_";

impl<'e, W: Write, T: ConvertTrace> Converter<'e, W, T> {
    pub(super) fn apply(&mut self, ele: &Element) {
        let (op, operands) = match ele.children() {
            [op, operands @ ..] => (op, operands),
            [] => {
                return self.diagnostic("'apply' contains <> and no other tags\n")
            }
        };

        let op_name = op.name();

        match (Operator::from_name(op_name), Arity::classify(operands)) {
            (Operator::Ident, _) => self.call_ident(op, operands),

            (_, Arity::Nullary) => self.diagnostic(&format!(
                "'apply' contains <{op_name}> and no other tags\n"
            )),

            (Operator::Neg, Arity::Unary(a)) => {
                self.out.write_str("(-");
                self.convert(a);
                self.out.write_char(')');
            }
            (unop, Arity::Unary(a)) => match unary_fn(unop) {
                Some(name) => {
                    self.out.write_str(name);
                    self.args(operands);
                }
                None => self.diagnostic(&format!(
                    "'apply' contains <{op_name}> with one argument <{}>\n",
                    a.name(),
                )),
            },

            (Operator::Indexer, Arity::Binary(a, _)) => {
                self.convert(a);
                self.args(&operands[1..]);
            }
            (binop, Arity::Binary(a, b)) => match infix(binop) {
                Some((sym, pad)) => {
                    self.out.write_char('(');
                    self.convert(a);
                    self.out.write_str(pad);
                    self.out.write_str(sym);
                    self.out.write_str(pad);
                    self.convert(b);
                    self.out.write_char(')');
                }
                None => self.diagnostic(&format!(
                    "'apply' contains <{op_name}> with two arguments \
                        <{}>, <{}>\n",
                    a.name(),
                    b.name(),
                )),
            },

            (_, Arity::Nary(many)) => {
                let names = many
                    .iter()
                    .map(|node| format!("<{}>", node.name()))
                    .collect::<Vec<_>>()
                    .join(", ");

                self.diagnostic(&format!(
                    "'apply' contains <{op_name}> with three (or more) \
                        arguments {names}\n"
                ))
            }
        }
    }

    /// Call of a named function `name(args...)`.
    ///
    /// The callee is converted as an ordinary identifier
    ///   (and so recorded as a reference),
    ///   unless it is renamed to avoid a reserved word.
    fn call_ident(&mut self, op: &Node, args: &[Node]) {
        match op.as_element() {
            Some(id) if id.text() == KW_IF => self.out.write_str(KW_IF_CALL),
            _ => self.convert(op),
        }

        self.args(args);
    }
}

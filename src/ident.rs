// Identifier tracking
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

//! Defined and undefined identifiers of a worksheet.
//!
//! Identifiers are classified in document order as they are converted.
//! A reference is undefined if,
//!   _at the moment it is converted_,
//!   no preceding definition has registered its name.
//! An identifier used before its own definition is therefore undefined
//!   even though the worksheet defines it later;
//!     this reflects evaluation order in the worksheet itself and is what
//!     the user needs to be told about.
//! Do not pre-scan definitions.
//!
//! The unit of identity is the composed name of [`ident_name`]:
//!   `V` with subscript `t` is the identifier `V_t`.

use crate::{tag::QN_ATTR_SUBSCRIPT, xir::Element};
use std::collections::BTreeSet;

/// Compose the name of an `ml:id` element.
///
/// This is the element text,
///   followed by `_` and the value of the `subscript` attribute if
///   present.
pub fn ident_name(ele: &Element) -> String {
    let text = ele.text();

    match ele.attr_value(QN_ATTR_SUBSCRIPT) {
        Some(subscript) => format!("{text}_{subscript}"),
        None => text.to_owned(),
    }
}

/// Accumulator of identifier definitions and undefined references.
///
/// A tracker lives for exactly one conversion.
/// Sets are ordered so that reports are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentTracker {
    defined: BTreeSet<String>,
    undefined: BTreeSet<String>,
}

impl IdentTracker {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record a reference to `name`.
    ///
    /// The name is considered undefined iff it has not yet been defined.
    /// A later definition does not remove it from the undefined set.
    pub fn record_reference(&mut self, name: &str) {
        if !self.defined.contains(name) {
            self.undefined.insert(name.to_owned());
        }
    }

    /// Record a definition of `name`.
    ///
    /// Defining a name more than once has no additional effect.
    pub fn record_definition(&mut self, name: &str) {
        self.defined.insert(name.to_owned());
    }

    /// Copy of the undefined names accumulated so far.
    pub fn snapshot_undefined(&self) -> BTreeSet<String> {
        self.undefined.clone()
    }

    pub fn defined(&self) -> &BTreeSet<String> {
        &self.defined
    }

    pub fn undefined(&self) -> &BTreeSet<String> {
        &self.undefined
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }
}

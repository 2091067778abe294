// XML IR (XIR)
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

//! Intermediate representation (IR) of an XML worksheet.
//!
//! XIR serves as an abstraction layer atop of whatever XML library is
//!   used (e.g. `quick_xml`).
//! XIR is _not_ intended to be comprehensive,
//!   or even general-purpose---it
//!     exists only to provide the navigation that worksheet conversion
//!     requires:
//!       element names,
//!       attribute lookup by name,
//!       text content,
//!       and ordered children.
//!
//! To parse an entire XML document,
//!   see [`reader`].
//! The resulting tree is described in [`tree`].
//!
//! Element names are kept exactly as they appear in the source,
//!   including any namespace prefix
//!     (e.g. `ml:apply`);
//!   prefixes are not resolved against namespace declarations.

mod error;
pub use error::Error;

pub mod reader;
pub mod tree;

pub use tree::{Attr, AttrList, Document, Element, Node};

// Mathcad worksheet conversion (mcd2m)
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

//! Convert Mathcad XML worksheets into equivalent scripts.
//!
//! A worksheet is read into a [`xir::Document`] and then converted in a
//!   single pass into a script of the requested [`Dialect`].
//! Running the script reproduces the worksheet's calculations.
//!
//! ```
//! use mcd2m::{convert_to_string, xir::reader::parse_str, Dialect};
//!
//! let doc = parse_str(
//!     "<math><ml:define><ml:id>ID</ml:id><ml:apply><ml:mult/>\
//!        <ml:real>18</ml:real><ml:id>mA</ml:id></ml:apply></ml:define></math>",
//! )
//! .unwrap();
//!
//! let (script, idents) = convert_to_string(Dialect::Matlab, &doc);
//!
//! assert_eq!("ID = (18 * mA);\n", script);
//! assert!(idents.undefined().contains("mA"));
//! ```
//!
//! Conversion does not fail on malformed or unrecognized worksheet
//!   content;
//!     see [`matlab`] for how such content is annotated inline.
//! Identifiers that are referenced before being defined are reported
//!   through [`ident::IdentTracker`].

#[cfg(test)]
#[macro_use]
extern crate lazy_static;

pub mod emit;
pub mod ident;
pub mod matlab;
pub mod tag;
pub mod trace;
pub mod xir;

use emit::Emitter;
use ident::IdentTracker;
use std::{fmt::Display, io, str::FromStr};
use xir::Document;

/// Output script language.
///
/// Only MATLAB is presently supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Matlab,
}

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matlab => write!(f, "matlab"),
        }
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matlab" => Ok(Self::Matlab),
            _ => Err(UnknownDialect(s.into())),
        }
    }
}

/// Requested [`Dialect`] does not exist.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownDialect(pub String);

impl Display for UnknownDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown output dialect `{}`", self.0)
    }
}

impl std::error::Error for UnknownDialect {}

/// Result of a conversion.
#[derive(Debug)]
pub struct Output<W> {
    /// Sink that the script was written to.
    pub sink: W,

    /// Identifiers observed during conversion.
    pub idents: IdentTracker,
}

/// Convert `doc` into a script of the given `dialect`,
///   writing it to `sink`.
///
/// The only possible error is a failure of `sink` itself.
pub fn convert<W: io::Write>(
    dialect: Dialect,
    doc: &Document,
    sink: W,
) -> io::Result<Output<W>> {
    let mut out = Emitter::new(sink);
    let mut idents = IdentTracker::new();

    match dialect {
        Dialect::Matlab => matlab::convert(doc, &mut out, &mut idents),
    }

    Ok(Output {
        sink: out.finish()?,
        idents,
    })
}

/// Convert `doc` into a script held in memory.
pub fn convert_to_string(
    dialect: Dialect,
    doc: &Document,
) -> (String, IdentTracker) {
    let mut out = Emitter::buffer();
    let mut idents = IdentTracker::new();

    match dialect {
        Dialect::Matlab => matlab::convert(doc, &mut out, &mut idents),
    }

    (out.as_str().to_owned(), idents)
}

// Worksheet tag names
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

//! Closed enumeration of recognized worksheet tags.
//!
//! Worksheet elements are identified by their qualified name as written
//!   in the source
//!     (see [`crate::xir`]).
//! Rather than dispatching on strings throughout the converter,
//!   names are mapped once onto [`Tag`] and [`Operator`] so that each
//!   dialect can match exhaustively.
//! The worksheet schema is defined externally and grows over time,
//!   so both enums carry a variant for names that are not (yet)
//!   recognized.
//!
//! Qualified names are exposed as `QN_*` constants.

use std::fmt::Display;

/// Name of the synthetic tag used for the document root,
///   which has no element name of its own.
pub const QN_DOCUMENT: &str = "document";

pub const QN_WORKSHEET: &str = "worksheet";
pub const QN_SETTINGS: &str = "settings";
pub const QN_REGIONS: &str = "regions";
pub const QN_REGION: &str = "region";
pub const QN_CALCULATION: &str = "calculation";
pub const QN_UNITS: &str = "units";
pub const QN_POINT_RELEASE_DATA: &str = "pointReleaseData";
pub const QN_METADATA: &str = "metadata";
pub const QN_PRESENTATION: &str = "presentation";
pub const QN_CALCULATION_BEHAVIOR: &str = "calculationBehavior";
pub const QN_MATH: &str = "math";
pub const QN_EDITOR: &str = "editor";
pub const QN_FILE_FORMAT: &str = "fileFormat";
pub const QN_MISCELLANEOUS: &str = "miscellaneous";
pub const QN_TEXT_STYLE: &str = "textStyle";
pub const QN_RENDERING: &str = "rendering";
pub const QN_BINARY_CONTENT: &str = "binaryContent";
pub const QN_PROVENANCE: &str = "ml:provenance";
pub const QN_ORIGIN_REF: &str = "originRef";
pub const QN_PARENT_REF: &str = "parentRef";
pub const QN_COMMENT: &str = "comment";
pub const QN_ORIGIN_COMMENT: &str = "originComment";
pub const QN_CONTENT_HASH: &str = "contentHash";
pub const QN_TEXT: &str = "text";
pub const QN_P: &str = "p";
pub const QN_APPLY: &str = "ml:apply";
pub const QN_PARENS: &str = "ml:parens";
pub const QN_REAL: &str = "ml:real";
pub const QN_ID: &str = "ml:id";
pub const QN_DEFINE: &str = "ml:define";
pub const QN_EVAL: &str = "ml:eval";
pub const QN_RESULT: &str = "result";
pub const QN_UNIT_REFERENCE: &str = "unitReference";
pub const QN_UNIT_MONOMIAL: &str = "unitMonomial";
pub const QN_UNITED_VALUE: &str = "unitedValue";
pub const QN_SEQUENCE: &str = "ml:sequence";
pub const QN_IMAG: &str = "ml:imag";
pub const QN_PLOT: &str = "plot";
pub const QN_RANGE: &str = "ml:range";
pub const QN_UNIT_OVERRIDE: &str = "ml:unitOverride";
pub const QN_FUNCTION: &str = "ml:function";
pub const QN_BOUND_VARS: &str = "ml:boundVars";

pub const QN_NEG: &str = "ml:neg";
pub const QN_SQRT: &str = "ml:sqrt";
pub const QN_FIND: &str = "ml:Find";
pub const QN_ABSVAL: &str = "ml:absval";
pub const QN_PLUS: &str = "ml:plus";
pub const QN_MINUS: &str = "ml:minus";
pub const QN_MULT: &str = "ml:mult";
pub const QN_DIV: &str = "ml:div";
pub const QN_POW: &str = "ml:pow";
pub const QN_EQUAL: &str = "ml:equal";
pub const QN_GREATER_THAN: &str = "ml:greaterThan";
pub const QN_LESS_THAN: &str = "ml:lessThan";
pub const QN_INDEXER: &str = "ml:indexer";

/// Attribute holding the subscript of an identifier.
pub const QN_ATTR_SUBSCRIPT: &str = "subscript";
/// Attribute holding the imaginary unit symbol (`i` or `j`).
pub const QN_ATTR_SYMBOL: &str = "symbol";
/// Attribute holding the name of a unit.
pub const QN_ATTR_UNIT: &str = "unit";
/// Attribute holding the exponent of a unit.
pub const QN_ATTR_POWER_NUMERATOR: &str = "power-numerator";

/// How a converter treats a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionClass {
    /// Emit nothing;
    ///   the element holds metadata irrelevant to a script.
    Skip,

    /// Convert each child in order with no surrounding syntax.
    Traverse,

    /// Emit text derived from the element itself.
    Leaf,

    /// Emit fixed syntax around converted children.
    Structural,

    /// No rule exists for the tag.
    Unknown,
}

impl Display for EmissionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Traverse => write!(f, "traverse"),
            Self::Leaf => write!(f, "leaf"),
            Self::Structural => write!(f, "structural"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A worksheet tag.
///
/// Each variant corresponds to exactly one qualified name;
///   see [`Tag::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    // Metadata.
    PointReleaseData,
    Metadata,
    Presentation,
    CalculationBehavior,
    Editor,
    FileFormat,
    Miscellaneous,
    TextStyle,
    Rendering,
    BinaryContent,
    OriginRef,
    ParentRef,
    Comment,
    OriginComment,
    ContentHash,

    // Containers.
    Document,
    Worksheet,
    Settings,
    Regions,
    Region,
    Calculation,
    Units,
    Provenance,
    Eval,
    Function,

    // Leaves.
    Real,
    Id,
    Imag,
    P,

    // Structure.
    Math,
    Text,
    Apply,
    Parens,
    Define,
    Result,
    UnitReference,
    UnitMonomial,
    UnitedValue,
    Sequence,
    Plot,
    Range,
    UnitOverride,
    BoundVars,

    /// A tag with no rule,
    ///   holding its qualified name.
    Unknown(&'a str),
}

impl<'a> Tag<'a> {
    /// Map a qualified element name onto a [`Tag`].
    ///
    /// Names are case-sensitive and must include their namespace prefix
    ///   exactly as written
    ///     (`ml:apply`, not `apply`).
    pub fn from_name(name: &'a str) -> Self {
        match name {
            QN_POINT_RELEASE_DATA => Self::PointReleaseData,
            QN_METADATA => Self::Metadata,
            QN_PRESENTATION => Self::Presentation,
            QN_CALCULATION_BEHAVIOR => Self::CalculationBehavior,
            QN_EDITOR => Self::Editor,
            QN_FILE_FORMAT => Self::FileFormat,
            QN_MISCELLANEOUS => Self::Miscellaneous,
            QN_TEXT_STYLE => Self::TextStyle,
            QN_RENDERING => Self::Rendering,
            QN_BINARY_CONTENT => Self::BinaryContent,
            QN_ORIGIN_REF => Self::OriginRef,
            QN_PARENT_REF => Self::ParentRef,
            QN_COMMENT => Self::Comment,
            QN_ORIGIN_COMMENT => Self::OriginComment,
            QN_CONTENT_HASH => Self::ContentHash,

            QN_DOCUMENT => Self::Document,
            QN_WORKSHEET => Self::Worksheet,
            QN_SETTINGS => Self::Settings,
            QN_REGIONS => Self::Regions,
            QN_REGION => Self::Region,
            QN_CALCULATION => Self::Calculation,
            QN_UNITS => Self::Units,
            QN_PROVENANCE => Self::Provenance,
            QN_EVAL => Self::Eval,
            QN_FUNCTION => Self::Function,

            QN_REAL => Self::Real,
            QN_ID => Self::Id,
            QN_IMAG => Self::Imag,
            QN_P => Self::P,

            QN_MATH => Self::Math,
            QN_TEXT => Self::Text,
            QN_APPLY => Self::Apply,
            QN_PARENS => Self::Parens,
            QN_DEFINE => Self::Define,
            QN_RESULT => Self::Result,
            QN_UNIT_REFERENCE => Self::UnitReference,
            QN_UNIT_MONOMIAL => Self::UnitMonomial,
            QN_UNITED_VALUE => Self::UnitedValue,
            QN_SEQUENCE => Self::Sequence,
            QN_PLOT => Self::Plot,
            QN_RANGE => Self::Range,
            QN_UNIT_OVERRIDE => Self::UnitOverride,
            QN_BOUND_VARS => Self::BoundVars,

            other => Self::Unknown(other),
        }
    }

    /// Emission class of this tag.
    pub fn class(&self) -> EmissionClass {
        use EmissionClass::*;

        match self {
            Self::PointReleaseData
            | Self::Metadata
            | Self::Presentation
            | Self::CalculationBehavior
            | Self::Editor
            | Self::FileFormat
            | Self::Miscellaneous
            | Self::TextStyle
            | Self::Rendering
            | Self::BinaryContent
            | Self::OriginRef
            | Self::ParentRef
            | Self::Comment
            | Self::OriginComment
            | Self::ContentHash => Skip,

            Self::Document
            | Self::Worksheet
            | Self::Settings
            | Self::Regions
            | Self::Region
            | Self::Calculation
            | Self::Units
            | Self::Provenance
            | Self::Eval
            | Self::Function => Traverse,

            Self::Real | Self::Id | Self::Imag | Self::P => Leaf,

            Self::Math
            | Self::Text
            | Self::Apply
            | Self::Parens
            | Self::Define
            | Self::Result
            | Self::UnitReference
            | Self::UnitMonomial
            | Self::UnitedValue
            | Self::Sequence
            | Self::Plot
            | Self::Range
            | Self::UnitOverride
            | Self::BoundVars => Structural,

            Self::Unknown(..) => Unknown,
        }
    }
}

/// Operator (first child) of an `ml:apply` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator<'a> {
    Neg,
    Sqrt,
    Find,
    AbsVal,
    Plus,
    Minus,
    Mult,
    Div,
    Pow,
    Equal,
    GreaterThan,
    LessThan,
    Indexer,

    /// A named function (`ml:id`).
    Ident,

    /// Any other operator,
    ///   holding its qualified name.
    Other(&'a str),
}

impl<'a> Operator<'a> {
    pub fn from_name(name: &'a str) -> Self {
        match name {
            QN_NEG => Self::Neg,
            QN_SQRT => Self::Sqrt,
            QN_FIND => Self::Find,
            QN_ABSVAL => Self::AbsVal,
            QN_PLUS => Self::Plus,
            QN_MINUS => Self::Minus,
            QN_MULT => Self::Mult,
            QN_DIV => Self::Div,
            QN_POW => Self::Pow,
            QN_EQUAL => Self::Equal,
            QN_GREATER_THAN => Self::GreaterThan,
            QN_LESS_THAN => Self::LessThan,
            QN_INDEXER => Self::Indexer,
            QN_ID => Self::Ident,
            other => Self::Other(other),
        }
    }
}

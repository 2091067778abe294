// XIR errors
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

//! XIR error information.

use std::{fmt::Display, io, str::Utf8Error};

/// Wrapped error type.
pub type InnerXmlError = quick_xml::Error;

/// Error attempting to read a worksheet into a XIR tree.
///
/// Byte offsets are relative to the beginning of the input and are
///   intended only to help the user locate the problem.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The input could not be read.
    Io(IoError),

    /// A UTF-8 error together with the byte slice that caused it.
    ///
    /// By storing the raw bytes instead of a string,
    ///   we allow the displayer to determine how to handle invalid UTF-8
    ///   encodings.
    InvalidUtf8(Utf8Error, Vec<u8>),

    /// A closing tag does not match the element that is open.
    UnbalancedTag {
        open: String,
        close: String,
        pos: usize,
    },

    /// A closing tag was encountered with no open element.
    UnexpectedClose(String, usize),

    /// Input ended while elements were still open.
    ///
    /// This holds the innermost open element.
    UnclosedElement(String),

    /// The input contains no root element.
    NoRoot,

    /// Elements are nested more deeply than the given limit.
    ///
    /// Conversion recurses once per level of nesting,
    ///   so pathological inputs are rejected up front rather than
    ///   exhausting the stack.
    TooDeep(usize, usize),

    // TODO: Map common `quick_xml` errors onto variants of our own once
    //   we see which ones users actually run into.
    QuickXmlError(QuickXmlError, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::InvalidUtf8(inner, bytes) => {
                write!(
                    f,
                    "{} for string `{}`",
                    inner,
                    String::from_utf8_lossy(bytes)
                )
            }
            Self::UnbalancedTag { open, close, pos } => {
                write!(
                    f,
                    "expected closing tag `</{open}>` at byte {pos}, \
                       but found `</{close}>`"
                )
            }
            Self::UnexpectedClose(name, pos) => {
                write!(
                    f,
                    "closing tag `</{name}>` at byte {pos} \
                       does not close any open element"
                )
            }
            Self::UnclosedElement(name) => {
                write!(f, "unexpected end of input: `<{name}>` is not closed")
            }
            Self::NoRoot => write!(f, "no document element found"),
            Self::TooDeep(max, pos) => {
                write!(
                    f,
                    "element at byte {pos} exceeds the maximum nesting \
                       depth of {max}"
                )
            }
            Self::QuickXmlError(inner, pos) => {
                write!(f, "malformed XML at byte {pos}: {inner}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidUtf8(err, ..) => Some(err),
            Self::QuickXmlError(err, ..) => Some(err),
            _ => None,
        }
    }
}

impl From<(Utf8Error, &[u8])> for Error {
    fn from((err, bytes): (Utf8Error, &[u8])) -> Self {
        Self::InvalidUtf8(err, bytes.to_owned())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(IoError(e))
    }
}

impl Error {
    /// Produce a function that wraps a [`quick_xml`] error,
    ///   recording the byte offset at which it occurred.
    ///
    /// This is intended to be used with [`Result::map_err`].
    pub(super) fn from_xml_at<E: Into<InnerXmlError>>(
        pos: usize,
    ) -> impl FnOnce(E) -> Self {
        move |e| Self::QuickXmlError(QuickXmlError(e.into()), pos)
    }
}

/// Thin wrapper around [`quick_xml::Error`] to implement [`PartialEq`].
///
/// This will always yield `false`,
///   but allows us to derive the trait on types using [`Error`];
///     otherwise, this madness propagates indefinitely.
#[derive(Debug)]
pub struct QuickXmlError(pub InnerXmlError);

impl PartialEq for QuickXmlError {
    /// [`quick_xml::Error`] does not implement [`PartialEq`] and so this
    ///   will always yield `false`.
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Display for QuickXmlError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, fmt)
    }
}

impl std::error::Error for QuickXmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Thin wrapper around [`io::Error`] to implement [`PartialEq`].
///
/// Like [`QuickXmlError`],
///   two I/O errors never compare equal.
#[derive(Debug)]
pub struct IoError(pub io::Error);

impl PartialEq for IoError {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Display for IoError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, fmt)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

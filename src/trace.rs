// Conversion tracing
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

//! Tracing for conversion operations.
//!
//! This provides human-readable traces on standard error any time an
//!   element is dispatched by a converter.
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build time using the `convert-trace-stderr`
//!   feature flag
//!     (`cargo build --features convert-trace-stderr`).
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to parse them;
//!   the format is subject to change without notice.
//!
//! Traces never touch the generated script.

use crate::{tag::Tag, xir::Element};

/// Receiver of conversion events.
pub trait ConvertTrace: Default {
    /// An element is about to be converted by the rule for `tag`.
    ///
    /// `depth` is the depth of the element below the document root.
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt processing.
    fn trace_enter(&mut self, depth: usize, ele: &Element, tag: &Tag);

    /// A diagnostic was written inline into the output.
    fn trace_diagnostic(&mut self, depth: usize, msg: &str);
}

/// Perform no tracing.
///
/// This should be used by default for non-test builds,
///   since tracing can incur a significant performance cost.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl ConvertTrace for VoidTrace {
    fn trace_enter(&mut self, _depth: usize, _ele: &Element, _tag: &Tag) {
        // Do nothing at all.
    }

    fn trace_diagnostic(&mut self, _depth: usize, _msg: &str) {
        // Do nothing at all.
    }
}

/// Human-readable [`ConvertTrace`].
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl ConvertTrace for HumanReadableTrace {
    fn trace_enter(&mut self, depth: usize, ele: &Element, tag: &Tag) {
        eprint!(
            "\
[Converter::convert] depth {depth}
| ==> {ele} ({class})
|  |  {tag:?}
|\n",
            class = tag.class(),
        );
    }

    fn trace_diagnostic(&mut self, depth: usize, msg: &str) {
        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "convert-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"convert-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";

        eprint!(
            "\
[Converter::diagnostic] depth {depth}
| ==> !!! {msg}
|  |  {msg:?}
= note: this trace was output as a debugging aid \
    because `cfg({cfg})`.\n\n",
            msg = msg.trim_end(),
        );
    }
}

/// Trace used by converters unless otherwise specified.
#[cfg(any(test, feature = "convert-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

/// Trace used by converters unless otherwise specified.
#[cfg(not(any(test, feature = "convert-trace-stderr")))]
pub type DefaultTrace = VoidTrace;

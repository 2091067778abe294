// Mathcad worksheet converter
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

//! This is the Mathcad worksheet converter.
//!
//! `mcd2m` reads a Mathcad XML worksheet and writes an equivalent script,
//!   by default to standard output.

extern crate mcd2m;

use getopts::{Fail, Options};
use mcd2m::{
    ident::IdentTracker,
    xir::{self, reader::parse_file, Document},
    Dialect, Output,
};
use std::{
    env,
    error::Error,
    fmt::{self, Display},
    fs::File,
    io::{self, BufWriter, Write},
};

/// Types of commands
enum Command {
    Convert {
        input: String,
        dialect: Dialect,
        output: Option<String>,
        report_undefined: bool,
    },
    Usage,
}

/// Convert the worksheet at `input`,
///   writing the script to `output` or to standard output.
///
/// The worksheet is read in its entirety before the output is opened so
///   that a bad input never truncates an existing output file.
fn convert(
    input: &str,
    dialect: Dialect,
    output: Option<&str>,
    report_undefined: bool,
) -> Result<(), Mcd2mError> {
    let doc = parse_file(input)?;

    let idents = match output {
        Some(path) => write_script(dialect, &doc, File::create(path)?)?,
        None => write_script(dialect, &doc, io::stdout().lock())?,
    };

    if report_undefined {
        for name in idents.undefined() {
            eprintln!("warning: undefined identifier `{name}`");
        }
    }

    Ok(())
}

fn write_script<W: Write>(
    dialect: Dialect,
    doc: &Document,
    sink: W,
) -> Result<IdentTracker, Mcd2mError> {
    let Output { idents, .. } =
        mcd2m::convert(dialect, doc, BufWriter::new(sink))?;

    Ok(idents)
}

/// Entrypoint for the converter
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage = opts.usage(&format!("Usage: {} [OPTIONS] INPUT", program));

    match parse_options(opts, args) {
        Ok(Command::Convert {
            input,
            dialect,
            output,
            report_undefined,
        }) => {
            if let Err(e) =
                convert(&input, dialect, output.as_deref(), report_undefined)
            {
                eprintln!("error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Get 'Options'
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "output", "write script to FILE", "FILE");
    opts.optopt("", "emit", "set output dialect", "matlab");
    opts.optflag(
        "u",
        "report-undefined",
        "report identifiers used before being defined",
    );
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    let input = match matches.free.len() {
        0 => return Err(Fail::OptionMissing(String::from("INPUT"))),
        1 => matches.free[0].clone(),
        _ => return Err(Fail::UnrecognizedOption(matches.free[1].clone())),
    };

    let dialect = match matches.opt_str("emit") {
        Some(m) => m.parse::<Dialect>().map_err(|_| {
            Fail::ArgumentMissing(String::from("--emit matlab"))
        })?,
        None => Dialect::default(),
    };

    Ok(Command::Convert {
        input,
        dialect,
        output: matches.opt_str("o"),
        report_undefined: matches.opt_present("u"),
    })
}

/// Converter (`mcd2m`) error.
///
/// This represents the aggregation of all possible errors that can occur
///   while converting.
/// Conversion itself cannot fail;
///   errors arise only from reading the worksheet or writing the script.
#[derive(Debug)]
pub enum Mcd2mError {
    Io(io::Error),
    Xir(xir::Error),
}

impl Mcd2mError {
    /// Process exit status describing this error.
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Xir(xir::Error::Io(_)) => exitcode::NOINPUT,
            Self::Xir(_) => exitcode::DATAERR,
            Self::Io(_) => exitcode::IOERR,
        }
    }
}

impl From<io::Error> for Mcd2mError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<xir::Error> for Mcd2mError {
    fn from(e: xir::Error) -> Self {
        Self::Xir(e)
    }
}

impl Display for Mcd2mError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Xir(e) => Display::fmt(e, f),
        }
    }
}

impl Error for Mcd2mError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Xir(e) => Some(e),
        }
    }
}

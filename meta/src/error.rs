// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use pegloom::{Location, ParseError};
use thiserror::Error;

/// An error found while reading a grammar.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GrammarError {
    /// The grammar source does not parse.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error("rule {name} already defined (at {})", .location.start)]
    AlreadyDefined { name: String, location: Location },
    #[error("rule {name} is undefined (at {})", .location.start)]
    Undefined { name: String, location: Location },
    /// A label reused within the scope where it is visible.
    #[error("label {name} already defined (at {})", .location.start)]
    DuplicateLabel {
        name: String,
        location: Location,
        original: Location,
    },
}

impl GrammarError {
    /// Where in the grammar source the error points.
    pub fn location(&self) -> Option<Location> {
        match self {
            GrammarError::Syntax(ParseError::Aborted(abort)) => Some(abort.location),
            GrammarError::Syntax(ParseError::Failed(error)) => {
                Some(Location::empty(error.position))
            }
            GrammarError::Syntax(ParseError::UnknownStartRule(_)) => None,
            GrammarError::AlreadyDefined { location, .. }
            | GrammarError::Undefined { location, .. }
            | GrammarError::DuplicateLabel { location, .. } => Some(*location),
        }
    }
}

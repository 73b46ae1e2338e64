// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for the tokenizer and the drivers around it.

/// What the characters mean.
#[derive(Debug)]
pub struct Format {
    /// The character a source hands out once it is exhausted. It is
    /// never a token character, even if it would otherwise be one.
    pub end_of_input: char,
    /// Whether `\r` separates tokens like space, tab and newline do
    /// (otherwise it is an identifier character).
    pub carriage_return_is_whitespace: bool,
}

pub const CLASSIC_FORMAT : Format = Format {
    end_of_input: '\0',
    carriage_return_is_whitespace: false,
};

pub const CRLF_FORMAT : Format = Format {
    end_of_input: '\0',
    carriage_return_is_whitespace: true,
};

/// How the drivers react. The tokenizer itself never stops; these
/// only affect [drive](../drive/index.html).
#[derive(Debug)]
pub struct Modes {
    /// Stop the session at the first error other than the end of the
    /// stream.
    pub halt_on_error: bool,
}

pub const DEFAULT_MODES : Modes = Modes {
    halt_on_error: true,
};

pub const KEEP_GOING_MODES : Modes = Modes {
    halt_on_error: false,
};

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    pub modes: &'t Modes,
}

pub const DEFAULT_SETTINGS : Settings<'static> = Settings {
    format: &CLASSIC_FORMAT,
    modes: &DEFAULT_MODES,
};

impl Default for Settings<'static> {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

impl<'t> Settings<'t> {
    pub fn is_end_of_input(&self, c: char) -> bool {
        c == self.format.end_of_input
    }

    pub fn is_separator(&self, c: char) -> bool {
        match c {
            ' ' | '\t' | '\n' => true,
            '\r' => self.format.carriage_return_is_whitespace,
            _ => false,
        }
    }
}

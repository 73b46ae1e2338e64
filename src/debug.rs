// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for debugging: an event sink printing a token stream
//! like `(ID:defun (ID:f ID:x) NUM:1 STR:"a")END`.

use crate::drive::lex_str;
use crate::event::{EventSink, LexError};
use crate::pos::Pos;
use crate::settings::Settings;
use crate::token::{chars_before, run_span, run_text};
use kstring::KString;
use std::io::{self, Write};

pub struct DebugPrinter<'t, W: Write> {
    out: W,
    text: &'t str,
    offset: usize,
    saw_open: bool,
    // the current string had its ` STR:"` printed already
    saw_string: bool,
    // a run flushed by the end of input, printed with the end event
    run_at_end: Option<(&'static str, usize)>,
    err: Option<io::Error>,
}

impl<'t, W: Write> DebugPrinter<'t, W> {
    pub fn new(text: &'t str, out: W) -> Self {
        DebugPrinter {
            out,
            text,
            offset: 0,
            saw_open: false,
            saw_string: false,
            run_at_end: None,
            err: None,
        }
    }

    /// Flush and give back the output, or the first IO error that
    /// happened.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.err.take() {
            return Err(e)
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, s: &str) {
        if self.err.is_none() {
            if let Err(e) = self.out.write_all(s.as_bytes()) {
                self.err = Some(e);
            }
        }
    }

    // The tags start with a space which is left off right after an
    // opening paren.
    fn print_tok(&mut self, tag: &str, s: &str) {
        let tag = if self.saw_open {
            tag.strip_prefix(' ').unwrap_or(tag)
        } else {
            tag
        };
        self.saw_open = false;
        self.saw_string = false;
        self.write(tag);
        self.write(s);
    }

    fn print_string_part(&mut self, tag: &str, len: usize) {
        let text = self.text;
        self.print_tok(tag, chars_before(text, self.offset, len))
    }

    fn print_run(&mut self, tag: &'static str, len: usize) {
        if self.offset >= self.text.len() {
            self.run_at_end = Some((tag, len));
        } else {
            let text = self.text;
            self.print_tok(tag, &run_text(&text[run_span(text, self.offset, len)]))
        }
    }
}

impl<'t, W: Write> EventSink for DebugPrinter<'t, W> {
    fn at(&mut self, offset: usize, _pos: Pos) {
        self.offset = offset;
    }

    fn error(&mut self, err: LexError) {
        if let Some((tag, len)) = self.run_at_end.take() {
            let text = self.text;
            let s = if err == LexError::UnterminatedString {
                // string content: every character counts
                KString::from_ref(chars_before(text, self.offset, len))
            } else {
                run_text(&text[run_span(text, self.offset, len)])
            };
            self.print_tok(tag, &s);
        }
        self.write(&err.to_string())
    }

    fn start_list(&mut self, depth: usize) {
        if depth > 0 && !self.saw_open {
            self.write(" (")
        } else {
            self.write("(")
        }
        self.saw_open = true;
    }

    fn end_list(&mut self, _depth: usize) {
        self.saw_open = false;
        self.write(")")
    }

    fn string_chunk(&mut self, len: usize) {
        let tag = if self.saw_string { "" } else { " STR:\"" };
        self.print_string_part(tag, len);
        self.saw_string = true;
    }

    fn string_end(&mut self, len: usize) {
        if self.saw_string {
            self.print_string_part("", len);
        } else {
            self.string_chunk(len);
        }
        self.saw_string = false;
        self.write("\"")
    }

    fn number_end(&mut self, len: usize) {
        self.print_run(" NUM:", len)
    }

    fn identifier(&mut self, len: usize) {
        self.print_run(" ID:", len)
    }
}

/// The debug rendering of all of `s`.
pub fn debug_string(s: &str, settings: &Settings) -> io::Result<String> {
    let mut printer = DebugPrinter::new(s, Vec::new());
    lex_str(s, settings, &mut printer);
    let out = printer.finish()?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

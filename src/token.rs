// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning events back into owned tokens, given the text they were
//! produced from. Still no tree: lists are only their `Open` and
//! `Close` tokens.
//!
//! String tokens hold the text between the quotes verbatim,
//! backslashes included (escapes are not decoded).

use crate::drive::{lex_str, Status};
use crate::event::{EventSink, LexError};
use crate::pos::Pos;
use crate::settings::Settings;
use kstring::KString;
use num::BigInt;
use std::fmt::Write;
use std::ops::Range;

/// The `n` characters of `text` ending at byte offset `end`.
pub(crate) fn chars_before(text: &str, end: usize, n: usize) -> &str {
    let head = text.get(..end).unwrap_or(text);
    if n == 0 {
        return &head[head.len()..]
    }
    match head.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &head[i..],
        None => head
    }
}

/// Outside of strings, these neither end a number or identifier nor
/// count toward its length.
fn is_quote_mark(c: char) -> bool {
    matches!(c, '\'' | '`' | ',' | '"')
}

/// The byte range from the first to the last of the `n` characters
/// of a run (outside of strings) ending before `end`.
pub(crate) fn run_span(text: &str, end: usize, n: usize) -> Range<usize> {
    let head = text.get(..end).unwrap_or(text);
    let mut start = head.len();
    let mut stop = None;
    let mut left = n;
    for (i, c) in head.char_indices().rev() {
        if left == 0 {
            break;
        }
        if is_quote_mark(c) {
            continue;
        }
        if stop.is_none() {
            stop = Some(i + c.len_utf8());
        }
        start = i;
        left -= 1;
    }
    start..stop.unwrap_or(start)
}

/// The text of a run found by [run_span], without its quote marks.
pub(crate) fn run_text(s: &str) -> KString {
    if s.contains(is_quote_mark) {
        KString::from_string(s.chars().filter(|c| !is_quote_mark(*c)).collect())
    } else {
        KString::from_ref(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Number(BigInt),
    Symbol(KString),
    String(KString),
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Atom::Number(n) => f.write_fmt(format_args!("{}", n)),
            Atom::Symbol(s) => f.write_str(s),
            Atom::String(s) => {
                f.write_char('"')?;
                f.write_str(s)?;
                f.write_char('"')
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// With the depth of the list.
    Open(usize),
    Close(usize),
    Atom(Atom),
    Error(LexError),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Open(_) => f.write_char('('),
            Token::Close(_) => f.write_char(')'),
            Token::Atom(a) => a.fmt(f),
            Token::Error(e) => f.write_fmt(format_args!("#<error {}>", e)),
        }
    }
}

/// The byte range is that of the token in the text (for strings,
/// including the quotes; empty for errors).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithSpan(pub Token, pub Range<usize>);

/// An [EventSink](../event/trait.EventSink.html) collecting tokens.
/// Needs to be driven by [drive](../drive/index.html) (or something
/// else calling `at`) over `text`.
#[derive(Debug)]
pub struct TokenCollector<'t> {
    text: &'t str,
    offset: usize,
    // byte offset of the first character inside the current string
    string_start: Option<usize>,
    // a run flushed by the end of input, held until the end event
    // tells whether it was string content
    run_at_end: Option<(usize, bool)>,
    pub tokens: Vec<TokenWithSpan>,
}

impl<'t> TokenCollector<'t> {
    pub fn new(text: &'t str) -> Self {
        TokenCollector {
            text,
            offset: 0,
            string_start: None,
            run_at_end: None,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, t: Token, span: Range<usize>) {
        self.tokens.push(TokenWithSpan(t, span))
    }

    fn push_run(&mut self, len: usize, is_number: bool) {
        let span = run_span(self.text, self.offset, len);
        let s = run_text(&self.text[span.clone()]);
        let atom = if is_number {
            match BigInt::parse_bytes(s.as_bytes(), 10) {
                Some(n) => Atom::Number(n),
                None => Atom::Symbol(s),
            }
        } else {
            Atom::Symbol(s)
        };
        self.push(Token::Atom(atom), span)
    }

    fn end_run(&mut self, len: usize, is_number: bool) {
        if self.offset >= self.text.len() {
            self.run_at_end = Some((len, is_number));
        } else {
            self.push_run(len, is_number);
        }
    }
}

impl<'t> EventSink for TokenCollector<'t> {
    fn at(&mut self, offset: usize, _pos: Pos) {
        self.offset = offset;
    }

    fn error(&mut self, err: LexError) {
        if let Some((len, is_number)) = self.run_at_end.take() {
            // the rest of an unterminated string is not a token
            if err != LexError::UnterminatedString {
                self.push_run(len, is_number);
            }
        }
        if err == LexError::UnterminatedString {
            self.string_start = None;
        }
        if err.is_end() {
            return
        }
        self.push(Token::Error(err), self.offset..self.offset)
    }

    fn start_list(&mut self, depth: usize) {
        self.push(Token::Open(depth), self.offset..self.offset + 1)
    }

    fn end_list(&mut self, depth: usize) {
        self.push(Token::Close(depth), self.offset..self.offset + 1)
    }

    fn string_chunk(&mut self, len: usize) {
        if self.string_start.is_none() {
            let s = chars_before(self.text, self.offset, len);
            self.string_start = Some(self.offset - s.len());
        }
    }

    fn string_end(&mut self, len: usize) {
        let start = match self.string_start.take() {
            Some(start) => start,
            None => self.offset - chars_before(self.text, self.offset, len).len()
        };
        let raw = self.text.get(start..self.offset).unwrap_or("");
        let span = start.saturating_sub(1)..self.offset + 1;
        self.push(Token::Atom(Atom::String(KString::from_ref(raw))), span)
    }

    fn number_end(&mut self, len: usize) {
        self.end_run(len, true)
    }

    fn identifier(&mut self, len: usize) {
        self.end_run(len, false)
    }
}

/// All tokens of `s`, with the final status of the session.
pub fn tokens(s: &str, settings: &Settings) -> (Vec<TokenWithSpan>, Status) {
    let mut collector = TokenCollector::new(s);
    let status = lex_str(s, settings, &mut collector);
    (collector.tokens, status)
}

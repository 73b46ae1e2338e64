// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! What the tokenizer reports, and the trait receiving the reports.
//!
//! Events carry lengths, not text: a length is the number of
//! characters of the token ending right before the character whose
//! step emitted the event. Sinks that want text keep the input
//! themselves (see [debug](../debug/index.html) and
//! [token](../token/index.html)).

use crate::pos::Pos;
use thiserror::Error;

/// The messages are kept short and stable; `StreamEndNormal` is
/// not a failure but the notification that the stream ended
/// outside of a string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("illegal '\"'")]
    IllegalQuoteStart,
    #[error("extraneous ')'")]
    ExtraneousCloseParen,
    #[error("unexpected ','")]
    UnexpectedUnquote,
    #[error("unquote char ',' found in non-quasiquoted form")]
    UnquoteOutsideQuasiquote,
    #[error("END")]
    StreamEndNormal,
    #[error("EOF")]
    UnterminatedString,
    #[error("{0}")]
    ModeStackOverflow(#[from] crate::modestack::ModeStackOverflow),
}

impl LexError {
    /// Whether this is the clean end-of-stream notification.
    pub fn is_end(&self) -> bool {
        *self == LexError::StreamEndNormal
    }

    /// Whether the session cannot continue past this (both end of
    /// input notifications).
    pub fn is_terminal(&self) -> bool {
        matches!(self, LexError::StreamEndNormal | LexError::UnterminatedString)
    }

    pub fn at(self, p: Pos) -> LexErrorWithPos {
        LexErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{err} {pos}")]
pub struct LexErrorWithPos {
    pub err: LexError,
    pub pos: Pos
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Error(LexError),
    /// Depth of the list being opened, 1 for a toplevel list.
    StartList(usize),
    /// Depth of the list being closed (same as at its start).
    EndList(usize),
    /// The part of a string before a backslash.
    StringChunk(usize),
    /// The (remaining) part of a string before its closing quote.
    StringEnd(usize),
    NumberEnd(usize),
    Identifier(usize),
}

impl Event {
    /// Call the callback of `sink` corresponding to this event.
    pub fn deliver<S: EventSink + ?Sized>(self, sink: &mut S) {
        match self {
            Event::Error(e) => sink.error(e),
            Event::StartList(d) => sink.start_list(d),
            Event::EndList(d) => sink.end_list(d),
            Event::StringChunk(n) => sink.string_chunk(n),
            Event::StringEnd(n) => sink.string_end(n),
            Event::NumberEnd(n) => sink.number_end(n),
            Event::Identifier(n) => sink.identifier(n),
        }
    }

    pub fn error(&self) -> Option<LexError> {
        match self {
            Event::Error(e) => Some(*e),
            _ => None
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Event::Error(e) => f.write_fmt(format_args!("error: {}", e)),
            Event::StartList(d) => f.write_fmt(format_args!("start-list {}", d)),
            Event::EndList(d) => f.write_fmt(format_args!("end-list {}", d)),
            Event::StringChunk(n) => f.write_fmt(format_args!("string-chunk {}", n)),
            Event::StringEnd(n) => f.write_fmt(format_args!("string-end {}", n)),
            Event::NumberEnd(n) => f.write_fmt(format_args!("number {}", n)),
            Event::Identifier(n) => f.write_fmt(format_args!("identifier {}", n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWithPos(pub Event, pub Pos);

/// Receives the events of the tokenizer, synchronously and in input
/// order. Every callback defaults to doing nothing.
pub trait EventSink {
    fn error(&mut self, _err: LexError) {}
    fn start_list(&mut self, _depth: usize) {}
    fn end_list(&mut self, _depth: usize) {}
    fn string_chunk(&mut self, _len: usize) {}
    fn string_end(&mut self, _len: usize) {}
    fn number_end(&mut self, _len: usize) {}
    fn identifier(&mut self, _len: usize) {}

    /// Called by the drivers (never by the tokenizer itself) before
    /// each character is stepped: `offset` is its byte offset in the
    /// stream, `pos` its line/column.
    fn at(&mut self, _offset: usize, _pos: Pos) {}
}

/// Records all events.
impl EventSink for Vec<Event> {
    fn error(&mut self, err: LexError) {
        self.push(Event::Error(err))
    }
    fn start_list(&mut self, depth: usize) {
        self.push(Event::StartList(depth))
    }
    fn end_list(&mut self, depth: usize) {
        self.push(Event::EndList(depth))
    }
    fn string_chunk(&mut self, len: usize) {
        self.push(Event::StringChunk(len))
    }
    fn string_end(&mut self, len: usize) {
        self.push(Event::StringEnd(len))
    }
    fn number_end(&mut self, len: usize) {
        self.push(Event::NumberEnd(len))
    }
    fn identifier(&mut self, len: usize) {
        self.push(Event::Identifier(len))
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn error(&mut self, err: LexError) {
        (**self).error(err)
    }
    fn start_list(&mut self, depth: usize) {
        (**self).start_list(depth)
    }
    fn end_list(&mut self, depth: usize) {
        (**self).end_list(depth)
    }
    fn string_chunk(&mut self, len: usize) {
        (**self).string_chunk(len)
    }
    fn string_end(&mut self, len: usize) {
        (**self).string_end(len)
    }
    fn number_end(&mut self, len: usize) {
        (**self).number_end(len)
    }
    fn identifier(&mut self, len: usize) {
        (**self).identifier(len)
    }
    fn at(&mut self, offset: usize, pos: Pos) {
        (**self).at(offset, pos)
    }
}

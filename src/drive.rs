// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Driving the tokenizer over whole inputs: a [Lexer](struct.Lexer.html)
//! session that can be fed chunks as they arrive, functions running
//! a session over strings, readers and files, and
//! [events](fn.events.html) for pulling events instead of having
//! them pushed.

use crate::buffered_chars::buffered_chars;
use crate::context::LexContext;
use crate::event::{Event, EventSink, EventWithPos, LexError, LexErrorWithPos};
use crate::pos::Pos;
use crate::settings::Settings;
use crate::source::{CharsSource, Source, SourceError};
use crate::tokenize::step;
use genawaiter::rc::Gen;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Accepting more input.
    Running,
    /// The end of input was reached outside of a string.
    Ended,
    /// Stopped by an unterminated string, or (when halting on errors)
    /// by the first other error.
    Failed(LexErrorWithPos),
}

impl Status {
    pub fn is_running(&self) -> bool {
        *self == Status::Running
    }
    pub fn is_ended(&self) -> bool {
        *self == Status::Ended
    }
    pub fn failure(&self) -> Option<LexErrorWithPos> {
        match self {
            Status::Failed(e) => Some(*e),
            _ => None
        }
    }
}

#[derive(Error, Debug)]
#[error("{path:?}: {err}")]
pub struct LexFileError {
    pub path: PathBuf,
    pub err: SourceError,
}

// Passes everything on, noting the first error of a step.
struct Watch<'s, S: EventSink + ?Sized> {
    sink: &'s mut S,
    error: Option<LexError>,
}

impl<'s, S: EventSink + ?Sized> EventSink for Watch<'s, S> {
    fn error(&mut self, err: LexError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.sink.error(err)
    }
    fn start_list(&mut self, depth: usize) {
        self.sink.start_list(depth)
    }
    fn end_list(&mut self, depth: usize) {
        self.sink.end_list(depth)
    }
    fn string_chunk(&mut self, len: usize) {
        self.sink.string_chunk(len)
    }
    fn string_end(&mut self, len: usize) {
        self.sink.string_end(len)
    }
    fn number_end(&mut self, len: usize) {
        self.sink.number_end(len)
    }
    fn identifier(&mut self, len: usize) {
        self.sink.identifier(len)
    }
}

/// A tokenizing session. Characters can be given in chunks of any
/// size, split anywhere; the events are the same as if the whole
/// input had been given at once.
#[derive(Debug)]
pub struct Lexer<'t> {
    ctx: LexContext,
    settings: &'t Settings<'t>,
    pos: Pos,
    offset: usize,
    status: Status,
}

impl<'t> Lexer<'t> {
    pub fn new(settings: &'t Settings<'t>) -> Self {
        Lexer {
            ctx: LexContext::new(),
            settings,
            pos: Pos::default(),
            offset: 0,
            status: Status::Running,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn context(&self) -> &LexContext {
        &self.ctx
    }

    /// Position of the next character.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Byte offset of the next character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.ctx.reset();
        self.pos = Pos::default();
        self.offset = 0;
        self.status = Status::Running;
    }

    /// Step a single character. Does nothing once the session is
    /// over.
    pub fn push(&mut self, c: char, sink: &mut impl EventSink) -> Status {
        if !self.status.is_running() {
            return self.status
        }
        sink.at(self.offset, self.pos);
        let mut watch = Watch { sink, error: None };
        step(&mut self.ctx, c, self.settings, &mut watch);
        if let Some(err) = watch.error {
            self.on_error(err);
        }
        self.offset += c.len_utf8();
        self.pos = self.pos.after(c);
        self.status
    }

    fn on_error(&mut self, err: LexError) {
        if err.is_terminal() {
            if err.is_end() {
                tracing::trace!("session ended after {} bytes", self.offset);
                self.status = Status::Ended;
            } else {
                tracing::debug!("unterminated string at end {}", self.pos);
                self.status = Status::Failed(err.at(self.pos));
            }
        } else if self.settings.modes.halt_on_error {
            tracing::debug!("halting on error: {} {}", err, self.pos);
            self.status = Status::Failed(err.at(self.pos));
        } else {
            tracing::debug!("continuing after error: {} {}", err, self.pos);
        }
    }

    /// Step all characters of `chunk`, stopping early if the session
    /// ends.
    pub fn feed(&mut self, chunk: &str, sink: &mut impl EventSink) -> Status {
        for c in chunk.chars() {
            if !self.push(c, sink).is_running() {
                break;
            }
        }
        self.status
    }

    /// Signal the end of input.
    pub fn finish(&mut self, sink: &mut impl EventSink) -> Status {
        self.push(self.settings.format.end_of_input, sink)
    }
}

/// Run a session over all of `source`.
pub fn lex_source(
    source: &mut impl Source,
    settings: &Settings,
    sink: &mut impl EventSink,
) -> Result<Status, SourceError> {
    let mut lexer = Lexer::new(settings);
    loop {
        let c = source.pull()?;
        let status = lexer.push(c, sink);
        if !status.is_running() {
            return Ok(status)
        }
    }
}

pub fn lex_str(
    s: &str,
    settings: &Settings,
    sink: &mut impl EventSink,
) -> Status {
    let mut lexer = Lexer::new(settings);
    lexer.feed(s, sink);
    lexer.finish(sink)
}

/// All events for `s`, with the final status.
pub fn lex_to_vec(s: &str, settings: &Settings) -> (Vec<Event>, Status) {
    let mut v = Vec::new();
    let status = lex_str(s, settings, &mut v);
    (v, status)
}

pub fn lex_read(
    fh: impl Read,
    settings: &Settings,
    sink: &mut impl EventSink,
) -> Result<Status, SourceError> {
    let mut source = CharsSource::new(buffered_chars(fh),
                                      settings.format.end_of_input);
    lex_source(&mut source, settings, sink)
}

pub fn lex_file(
    path: &Path,
    settings: &Settings,
    sink: &mut impl EventSink,
) -> Result<Status, LexFileError> {
    tracing::info!("lexing {:?}", path);
    let add_path = |err: SourceError| LexFileError { path: path.to_path_buf(), err };
    let fh = File::open(path).map_err(|e| add_path(e.into()))?;
    lex_read(fh, settings, sink).map_err(add_path)
}

/// The events of a session over `cs`, lazily. Ends after the end of
/// input, or when the session stops on an error; a failing `cs`
/// yields its error as the last item.
pub fn events<'s>(
    cs: impl Iterator<Item = Result<(char, Pos), SourceError>> + 's,
    settings: &'s Settings,
) -> impl Iterator<Item = Result<EventWithPos, SourceError>> + 's
{
    Gen::new(|co| async move {
        let mut source = CharsSource::new(cs, settings.format.end_of_input);
        let mut lexer = Lexer::new(settings);
        let mut buf: Vec<Event> = Vec::new();
        loop {
            let c = match source.pull() {
                Ok(c) => c,
                Err(e) => {
                    co.yield_(Err(e)).await;
                    return;
                }
            };
            let pos = lexer.pos();
            let status = lexer.push(c, &mut buf);
            for e in buf.drain(..) {
                co.yield_(Ok(EventWithPos(e, pos))).await;
            }
            if !status.is_running() {
                return;
            }
        }
    }).into_iter()
}

/// Same as [events](fn.events.html), over a string.
pub fn str_events<'s>(
    s: &'s str,
    settings: &'s Settings,
) -> impl Iterator<Item = EventWithPos> + 's
{
    let mut pos = Pos::default();
    let cs = s.chars().map(move |c| {
        let p = pos;
        pos = pos.after(c);
        Ok((c, p))
    });
    // a string source cannot fail
    events(cs, settings).filter_map(Result::ok)
}

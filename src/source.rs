// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Where characters come from: one at a time, no look-ahead, no
//! push-back. An exhausted source keeps handing out the
//! end-of-input character of the [Format](../settings/struct.Format.html).

use crate::pos::Pos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid UTF-8 byte sequence {0:?}")]
    InvalidUtf8(Vec<u8>),
}

pub trait Source {
    fn pull(&mut self) -> Result<char, SourceError>;
}

pub struct StrSource<'s> {
    chars: std::str::Chars<'s>,
    end_of_input: char,
}

impl<'s> StrSource<'s> {
    pub fn new(s: &'s str, end_of_input: char) -> Self {
        StrSource { chars: s.chars(), end_of_input }
    }
}

impl<'s> Source for StrSource<'s> {
    fn pull(&mut self) -> Result<char, SourceError> {
        Ok(self.chars.next().unwrap_or(self.end_of_input))
    }
}

/// Adapts an iterator of characters with positions, like
/// [buffered_chars](../buffered_chars/fn.buffered_chars.html)
/// returns.
pub struct CharsSource<I> {
    chars: I,
    end_of_input: char,
    pos: Pos,
    next_pos: Pos,
    exhausted: bool,
}

impl<I> CharsSource<I>
    where I: Iterator<Item = Result<(char, Pos), SourceError>>
{
    pub fn new(chars: I, end_of_input: char) -> Self {
        CharsSource {
            chars,
            end_of_input,
            pos: Pos::default(),
            next_pos: Pos::default(),
            exhausted: false,
        }
    }

    /// Position of the character last pulled (or of the end, once
    /// exhausted).
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl<I> Source for CharsSource<I>
    where I: Iterator<Item = Result<(char, Pos), SourceError>>
{
    fn pull(&mut self) -> Result<char, SourceError> {
        if self.exhausted {
            return Ok(self.end_of_input)
        }
        match self.chars.next() {
            Some(r) => {
                let (c, pos) = r?;
                self.pos = pos;
                self.next_pos = pos.after(c);
                Ok(c)
            }
            None => {
                // avoid calling next() again!
                self.exhausted = true;
                self.pos = self.next_pos;
                Ok(self.end_of_input)
            }
        }
    }
}

/// A closure handing out characters; it has to return the
/// end-of-input character itself.
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> char> Source for FnSource<F> {
    fn pull(&mut self) -> Result<char, SourceError> {
        Ok((self.0)())
    }
}

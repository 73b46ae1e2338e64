// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The stack of quoting modes (`'`, `` ` ``, `,`) active for the form
//! currently being read.
//!
//! Fixed capacity, no heap, so that a
//! [LexContext](../context/struct.LexContext.html) stays a small
//! `Copy` value.

use thiserror::Error;

/// The number of 2-bit slots in a 64-bit word (the tags are stored
/// unpacked, though).
pub const MODE_STACK_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTag {
    /// `,` inside a quasiquoted form
    Interpolate,
    /// `` ` ``
    Quasiquote,
    /// `'`
    Quoted,
}

impl ModeTag {
    pub fn marker(self) -> char {
        match self {
            ModeTag::Interpolate => ',',
            ModeTag::Quasiquote => '`',
            ModeTag::Quoted => '\'',
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quote modes nested deeper than {}", MODE_STACK_CAPACITY)]
pub struct ModeStackOverflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStack {
    tags: [ModeTag; MODE_STACK_CAPACITY],
    len: usize,
}

impl ModeStack {
    pub const fn new() -> ModeStack {
        ModeStack {
            tags: [ModeTag::Interpolate; MODE_STACK_CAPACITY],
            len: 0,
        }
    }

    /// Refuses (leaving the stack unchanged) when full.
    pub fn push(&mut self, tag: ModeTag) -> Result<(), ModeStackOverflow> {
        if self.len == MODE_STACK_CAPACITY {
            return Err(ModeStackOverflow)
        }
        self.tags[self.len] = tag;
        self.len += 1;
        Ok(())
    }

    /// Popping an empty stack is a no-op returning `None`.
    pub fn pop(&mut self) -> Option<ModeTag> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(self.tags[self.len])
        }
    }

    pub fn top(&self) -> Option<ModeTag> {
        self.len.checked_sub(1).map(|i| self.tags[i])
    }

    pub fn has_on_top(&self, tag: ModeTag) -> bool {
        self.top() == Some(tag)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MODE_STACK_CAPACITY
    }

    /// Top first.
    pub fn iter(&self) -> impl Iterator<Item = ModeTag> + '_ {
        self.tags[..self.len].iter().rev().copied()
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        ModeStack::new()
    }
}

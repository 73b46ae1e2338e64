// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! All of the state of a tokenizing session. It is owned by the
//! caller and only ever touched by
//! [step](../tokenize/fn.step.html), hence tokenizing can be
//! suspended between any two characters for as long as the caller
//! wishes.

use crate::modestack::ModeStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubState {
    #[default]
    Normal,
    InsideString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexContext {
    pub(crate) symbol_run: usize,
    pub(crate) number_run: usize,
    pub(crate) open_count: usize,
    pub(crate) close_count: usize,
    pub(crate) sub_state: SubState,
    pub(crate) modes: ModeStack,
}

impl LexContext {
    pub const fn new() -> LexContext {
        LexContext {
            symbol_run: 0,
            number_run: 0,
            open_count: 0,
            close_count: 0,
            sub_state: SubState::Normal,
            modes: ModeStack::new(),
        }
    }

    /// Start a new session.
    pub fn reset(&mut self) {
        *self = LexContext::new()
    }

    /// Count of non-digit characters in the current run.
    pub fn symbol_run_length(&self) -> usize {
        self.symbol_run
    }

    /// Count of digit characters in the current run.
    pub fn number_run_length(&self) -> usize {
        self.number_run
    }

    pub fn run_length(&self) -> usize {
        self.symbol_run + self.number_run
    }

    pub fn run_pending(&self) -> bool {
        self.run_length() != 0
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// Number of currently unclosed parentheses.
    pub fn depth(&self) -> usize {
        self.open_count - self.close_count
    }

    pub fn sub_state(&self) -> SubState {
        self.sub_state
    }

    pub fn in_string(&self) -> bool {
        self.sub_state == SubState::InsideString
    }

    pub fn modes(&self) -> &ModeStack {
        &self.modes
    }

    /// Returns the run as `(symbol_run_length, number_run_length)`
    /// and clears it.
    pub(crate) fn take_run(&mut self) -> (usize, usize) {
        let run = (self.symbol_run, self.number_run);
        self.symbol_run = 0;
        self.number_run = 0;
        run
    }
}

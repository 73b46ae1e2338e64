// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A tokenizer for S-expressions that reads one character per call
//! and keeps all of its state in a small value owned by the caller.
//!
//! * Preemptible: [tokenize::step] consumes exactly one character
//!   and returns. Between two calls, the caller may wait as long as
//!   it likes (e.g. for the next network packet); nothing is
//!   buffered, nothing is allocated, there's no global state.
//!
//! * Event based (SAX like): the tokenizer doesn't build tokens, it
//!   reports list starts and ends, and the lengths of strings,
//!   numbers and identifiers to an [event::EventSink]. Sinks that
//!   want the text keep the input themselves, see [token] and
//!   [debug].
//!
//! * Knows about `'`, `` ` `` and `,`, tracking the quoting modes in
//!   a bounded stack, and reports `,` outside of a quasiquoted form.
//!
//! * Does not build trees, does not evaluate, does not decode string
//!   escapes (it only marks where backslashes split strings).
//!
//! The [drive] module has the conveniences: a [drive::Lexer]
//! session to feed chunks to, and functions for strings, readers and
//! files.

pub mod buffered_chars;
pub mod context;
pub mod debug;
pub mod drive;
pub mod event;
pub mod modestack;
pub mod pos;
pub mod settings;
pub mod source;
pub mod token;
pub mod tokenize;

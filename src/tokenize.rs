// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tokenizer proper: a Mealy machine taking exactly one
//! character per call. Its whole state is the caller's
//! [LexContext](../context/struct.LexContext.html), its output goes
//! to an [EventSink](../event/trait.EventSink.html) before the call
//! returns.
//!
//! Strings are only delimited, not decoded: a backslash inside a
//! string ends a [StringChunk](../event/enum.Event.html) and the
//! character after it is treated like any other (thus a `"` after a
//! backslash still ends the string). What the escapes mean is up to
//! the sink.

use crate::context::{LexContext, SubState};
use crate::event::{EventSink, LexError};
use crate::modestack::ModeTag;
use crate::settings::Settings;
use crate::source::{Source, SourceError};

/// Report a pending number or identifier, if any.
fn end_run(ctx: &mut LexContext, sink: &mut impl EventSink) {
    match ctx.take_run() {
        (0, 0) => {}
        (0, numl) => sink.number_end(numl),
        (syml, numl) => sink.identifier(syml + numl),
    }
}

fn push_mode(ctx: &mut LexContext, tag: ModeTag, sink: &mut impl EventSink) {
    if let Err(e) = ctx.modes.push(tag) {
        sink.error(e.into())
    }
}

/// Process the character `c`.
pub fn step(
    ctx: &mut LexContext,
    c: char,
    settings: &Settings,
    sink: &mut impl EventSink,
) {
    if settings.is_end_of_input(c) {
        // the pending run is flushed like at any separator, even
        // inside a string
        end_run(ctx, sink);
        sink.error(if ctx.in_string() {
            LexError::UnterminatedString
        } else {
            LexError::StreamEndNormal
        });
        return;
    }
    match ctx.sub_state {
        SubState::InsideString => match c {
            '0'..='9' => ctx.number_run += 1,
            '\\' => {
                let (syml, numl) = ctx.take_run();
                sink.string_chunk(syml + numl);
            }
            '"' => {
                let (syml, numl) = ctx.take_run();
                sink.string_end(syml + numl);
                ctx.sub_state = SubState::Normal;
            }
            _ => ctx.symbol_run += 1,
        },
        SubState::Normal => match c {
            '0'..='9' => ctx.number_run += 1,
            '"' => {
                if ctx.run_pending() {
                    sink.error(LexError::IllegalQuoteStart);
                } else {
                    ctx.sub_state = SubState::InsideString;
                }
            }
            '(' => {
                end_run(ctx, sink);
                ctx.open_count += 1;
                sink.start_list(ctx.depth());
            }
            ')' => {
                end_run(ctx, sink);
                if ctx.close_count >= ctx.open_count {
                    sink.error(LexError::ExtraneousCloseParen);
                } else {
                    sink.end_list(ctx.depth());
                    ctx.close_count += 1;
                    ctx.modes.pop();
                }
            }
            '\'' => push_mode(ctx, ModeTag::Quoted, sink),
            '`' => push_mode(ctx, ModeTag::Quasiquote, sink),
            ',' => {
                if ctx.run_pending() {
                    sink.error(LexError::UnexpectedUnquote);
                } else if ctx.modes.has_on_top(ModeTag::Quasiquote) {
                    push_mode(ctx, ModeTag::Interpolate, sink);
                } else {
                    sink.error(LexError::UnquoteOutsideQuasiquote);
                }
            }
            c if settings.is_separator(c) => end_run(ctx, sink),
            _ => ctx.symbol_run += 1,
        },
    }
}

/// Pull one character from `source` and [step](fn.step.html) it. If
/// the source fails, `ctx` is left untouched.
pub fn tokenize(
    ctx: &mut LexContext,
    source: &mut impl Source,
    settings: &Settings,
    sink: &mut impl EventSink,
) -> Result<(), SourceError> {
    let c = source.pull()?;
    step(ctx, c, settings, sink);
    Ok(())
}

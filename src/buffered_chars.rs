// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from anything implementing
//! `Read`, decoding UTF-8 strictly.

use crate::pos::Pos;
use crate::source::SourceError;
use std::io::{self, Read};
use utf8::{BufReadDecoder, BufReadDecoderError};
use genawaiter::rc::Gen;


pub fn buffered_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos), SourceError>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos { line: 0, col: 0 };
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(x) => {
                    for c in x.chars() {
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.after(c);
                    }
                },
                Err(BufReadDecoderError::Io(e)) => {
                    co.yield_(Err(SourceError::Io(e))).await;
                    return;
                }
                Err(BufReadDecoderError::InvalidByteSequence(bytes)) => {
                    co.yield_(Err(SourceError::InvalidUtf8(bytes.to_vec()))).await;
                    return;
                }
            }
        }
    }).into_iter()
}

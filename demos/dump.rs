// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use stepsexpr::buffered_chars::buffered_chars;
use stepsexpr::debug::DebugPrinter;
use stepsexpr::drive::{events, lex_str, Status};
use stepsexpr::event::{Event, EventWithPos};
use stepsexpr::settings::{Settings, Modes, CLASSIC_FORMAT, CRLF_FORMAT};
use stepsexpr::token::{tokens, TokenWithSpan};
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Print the debug token stream (default: count only)
    #[clap(short, long, value_parser)]
    debug: bool,
    /// Print the events, indented by depth
    #[clap(short, long, value_parser)]
    events: bool,
    /// Print the collected tokens
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Show the event position (only with --events)
    #[clap(long, value_parser)]
    pos: bool,
    /// Do not stop at the first error
    #[clap(short, long, value_parser)]
    keep_going: bool,
    /// Treat carriage returns as whitespace
    #[clap(long, value_parser)]
    crlf: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = Settings {
        format: if args.crlf { &CRLF_FORMAT } else { &CLASSIC_FORMAT },
        modes: &Modes { halt_on_error: !args.keep_going },
    };

    if args.debug || args.tokens {

        // Both need the text to show what the events cover.

        let text = std::fs::read_to_string(&args.input_path)?;
        let status = if args.debug {
            let mut printer = DebugPrinter::new(&text, BufWriter::new(stdout()));
            let status = lex_str(&text, &settings, &mut printer);
            let mut out = printer.finish()?;
            writeln!(out)?;
            status
        } else {
            let (ts, status) = tokens(&text, &settings);
            for TokenWithSpan(token, span) in ts {
                println!("{:?}\t{}", span, token);
            }
            status
        };
        if let Status::Failed(e) = status {
            bail!("{:?}: {}", args.input_path, e)
        }

    } else {

        // Stream the events of the file contents, doing some
        // bookkeeping and optionally printing them.

        let fh = std::fs::File::open(&args.input_path)?;
        let mut count_toplevel = 0;
        let mut count_enter = 0;
        let mut count_errors = 0;
        for e in events(buffered_chars(fh), &settings) {
            let EventWithPos(event, pos) = e?;
            let indentlevel = match event {
                Event::StartList(depth) => {
                    count_enter += 1;
                    if depth == 1 {
                        count_toplevel += 1;
                    }
                    depth - 1
                }
                Event::EndList(depth) => depth - 1,
                Event::Error(err) => {
                    if !err.is_end() {
                        count_errors += 1;
                    }
                    0
                }
                _ => 0
            };
            if args.events {
                if let Some(indent) = indentstr(indentlevel) {
                    if args.pos {
                        println!("{indent}{pos} {event}");
                    } else {
                        println!("{indent}{event}");
                    }
                } else {
                    bail!("lists nested too deeply at {:?}{}", args.input_path, pos)
                }
            }
        }
        println!(";; count_toplevel = {count_toplevel}, count_enter = {count_enter}, \
                  count_errors = {count_errors}");

    }
    Ok(())
}

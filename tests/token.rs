use anyhow::Result;
use kstring::KString;
use num::BigInt;
use stepsexpr::debug::{debug_string, DebugPrinter};
use stepsexpr::drive::{lex_to_vec, Lexer, Status};
use stepsexpr::event::{Event, EventSink, LexError};
use stepsexpr::settings::{Settings, CLASSIC_FORMAT, DEFAULT_SETTINGS,
                          KEEP_GOING_MODES};
use stepsexpr::token::{tokens, Atom, Token, TokenWithSpan};

const KEEP_GOING: Settings<'static> = Settings {
    format: &CLASSIC_FORMAT,
    modes: &KEEP_GOING_MODES,
};

fn sym(s: &str) -> Token {
    Token::Atom(Atom::Symbol(KString::from_ref(s)))
}

fn string(s: &str) -> Token {
    Token::Atom(Atom::String(KString::from_ref(s)))
}

fn num(n: u32) -> Token {
    Token::Atom(Atom::Number(BigInt::from(n)))
}

#[test]
fn collects_tokens_with_spans() {
    let input = "(define x \"a\\nb\" 42 y2)";
    let (ts, status) = tokens(input, &DEFAULT_SETTINGS);
    assert_eq!(status, Status::Ended);
    assert_eq!(ts, [
        TokenWithSpan(Token::Open(1), 0..1),
        TokenWithSpan(sym("define"), 1..7),
        TokenWithSpan(sym("x"), 8..9),
        TokenWithSpan(string("a\\nb"), 10..16),
        TokenWithSpan(num(42), 17..19),
        TokenWithSpan(sym("y2"), 20..22),
        TokenWithSpan(Token::Close(1), 22..23),
    ]);
    let text: Vec<&str> = ts.iter().map(|TokenWithSpan(_, r)| &input[r.clone()]).collect();
    assert_eq!(text, ["(", "define", "x", "\"a\\nb\"", "42", "y2", ")"]);
}

#[test]
fn strings_are_kept_verbatim() {
    for raw in ["", "plain", "\\x", "b\\\\c", "trailing\\", "12 (a) 'q"] {
        let input = format!("\"{}\"", raw);
        let (ts, status) = tokens(&input, &DEFAULT_SETTINGS);
        assert_eq!(status, Status::Ended);
        assert_eq!(ts, [TokenWithSpan(string(raw), 0..input.len())], "{:?}", raw);
    }
}

#[test]
fn non_ascii_text() {
    let (ts, _) = tokens("(λ \"größe\" 7)", &DEFAULT_SETTINGS);
    assert_eq!(ts[1], TokenWithSpan(sym("λ"), 1..3));
    assert_eq!(ts[2], TokenWithSpan(string("größe"), 4..13));
    assert_eq!(ts[3], TokenWithSpan(num(7), 14..15));
}

#[test]
fn quote_marks_inside_runs() {
    let (ts, status) = tokens("(a'b)", &DEFAULT_SETTINGS);
    assert_eq!(status, Status::Ended);
    assert_eq!(ts, [
        TokenWithSpan(Token::Open(1), 0..1),
        TokenWithSpan(sym("ab"), 1..4),
        TokenWithSpan(Token::Close(1), 4..5),
    ]);

    let (ts, _) = tokens("1'2 ", &DEFAULT_SETTINGS);
    assert_eq!(ts, [TokenWithSpan(num(12), 0..3)]);

    // trailing quote marks are not part of the run
    let (ts, _) = tokens("a` b", &DEFAULT_SETTINGS);
    assert_eq!(ts, [TokenWithSpan(sym("a"), 0..1), TokenWithSpan(sym("b"), 3..4)]);

    let (ts, status) = tokens("`x,y", &KEEP_GOING);
    assert_eq!(status, Status::Ended);
    assert_eq!(ts, [
        TokenWithSpan(Token::Error(LexError::UnexpectedUnquote), 2..2),
        TokenWithSpan(sym("xy"), 1..4),
    ]);

    let (ts, _) = tokens("x1\"y ", &KEEP_GOING);
    assert_eq!(ts, [
        TokenWithSpan(Token::Error(LexError::IllegalQuoteStart), 2..2),
        TokenWithSpan(sym("x1y"), 0..4),
    ]);
}

#[test]
fn unterminated_string_is_no_token() {
    let (ts, status) = tokens("(x \"a'b", &DEFAULT_SETTINGS);
    assert_eq!(ts, [
        TokenWithSpan(Token::Open(1), 0..1),
        TokenWithSpan(sym("x"), 1..2),
        TokenWithSpan(Token::Error(LexError::UnterminatedString), 7..7),
    ]);
    assert_eq!(status.failure().map(|e| e.err), Some(LexError::UnterminatedString));
    // a run at the end outside of strings is kept
    let (ts, _) = tokens("(x) 12", &DEFAULT_SETTINGS);
    assert_eq!(ts.last(), Some(&TokenWithSpan(num(12), 4..6)));
}

#[test]
fn errors_become_tokens() {
    let (ts, status) = tokens("a)", &DEFAULT_SETTINGS);
    assert_eq!(ts, [
        TokenWithSpan(sym("a"), 0..1),
        TokenWithSpan(Token::Error(LexError::ExtraneousCloseParen), 1..1),
    ]);
    assert!(status.failure().is_some());
}

#[test]
fn token_display() {
    let (ts, _) = tokens("(f \"s\" 10 x)", &DEFAULT_SETTINGS);
    let shown: Vec<String> = ts.iter().map(|TokenWithSpan(t, _)| t.to_string()).collect();
    assert_eq!(shown, ["(", "f", "\"s\"", "10", "x", ")"]);
}

#[test]
fn debug_output() -> Result<()> {
    assert_eq!(debug_string("(a)", &DEFAULT_SETTINGS)?, " (ID:a)END");
    assert_eq!(debug_string("((a)(b (c)))", &DEFAULT_SETTINGS)?,
               " ((ID:a) (ID:b (ID:c)))END");
    assert_eq!(debug_string("(f \"x\" 12)", &DEFAULT_SETTINGS)?,
               " (ID:f STR:\"x\" NUM:12)END");
    assert_eq!(debug_string("(\"\")", &DEFAULT_SETTINGS)?, " (STR:\"\")END");
    assert_eq!(debug_string(")", &DEFAULT_SETTINGS)?, "extraneous ')'");
    assert_eq!(debug_string("\"ab", &DEFAULT_SETTINGS)?, " ID:abEOF");
    assert_eq!(debug_string("\"a'b", &DEFAULT_SETTINGS)?, " ID:a'bEOF");
    Ok(())
}

#[test]
fn debug_output_of_chunked_strings() -> Result<()> {
    assert_eq!(debug_string("(a \"b\\\\c\" 7)", &DEFAULT_SETTINGS)?,
               " (ID:a STR:\"bc\" NUM:7)END");
    // the opening marker is printed once per string
    assert_eq!(debug_string("\"a\" \"b\"", &DEFAULT_SETTINGS)?,
               " STR:\"a\" STR:\"b\"END");
    Ok(())
}

#[test]
fn debug_output_of_runs_with_quote_marks() -> Result<()> {
    assert_eq!(debug_string("(a'b 1`2)", &DEFAULT_SETTINGS)?,
               " (ID:ab NUM:12)END");
    assert_eq!(debug_string("'(a 'b)", &DEFAULT_SETTINGS)?,
               " (ID:a ID:b)END");
    assert_eq!(debug_string("x'y", &DEFAULT_SETTINGS)?, " ID:xyEND");
    Ok(())
}

#[test]
fn replayed_events_print_the_same() -> Result<()> {
    let input = "(f \"a\\b\" 12 (g))";
    let (events, status) = lex_to_vec(input, &DEFAULT_SETTINGS);
    assert!(status.is_ended());
    let errors: Vec<LexError> = events.iter().filter_map(Event::error).collect();
    assert_eq!(errors, [LexError::StreamEndNormal]);

    let mut printer = DebugPrinter::new(input, Vec::new());
    let mut lexer = Lexer::new(&DEFAULT_SETTINGS);
    let mut recorded: Vec<Event> = Vec::new();
    for c in input.chars() {
        recorded.clear();
        lexer.push(c, &mut recorded);
        // the position hint for `c` is the offset before stepping it
        let offset = lexer.offset() - c.len_utf8();
        printer.at(offset, lexer.pos());
        for e in &recorded {
            e.deliver(&mut printer);
        }
    }
    let end = input.len();
    recorded.clear();
    lexer.finish(&mut recorded);
    printer.at(end, lexer.pos());
    for e in &recorded {
        e.deliver(&mut printer);
    }
    assert_eq!(printer.finish()?, debug_string(input, &DEFAULT_SETTINGS)?.as_bytes());
    Ok(())
}

#[test]
fn debug_printer_over_chunks() -> Result<()> {
    let input = "(x \"yz\")";
    let mut printer = DebugPrinter::new(input, Vec::new());
    let mut lexer = Lexer::new(&DEFAULT_SETTINGS);
    lexer.feed(&input[..4], &mut printer);
    lexer.feed(&input[4..], &mut printer);
    lexer.finish(&mut printer);
    let out = printer.finish()?;
    assert_eq!(out, b" (ID:x STR:\"yz\")END");
    Ok(())
}

use stepsexpr::modestack::{ModeStack, ModeStackOverflow, ModeTag,
                           MODE_STACK_CAPACITY};

#[test]
fn push_pop_top() {
    let mut s = ModeStack::new();
    assert!(s.is_empty());
    assert_eq!(s.top(), None);
    s.push(ModeTag::Quasiquote).unwrap();
    s.push(ModeTag::Interpolate).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s.has_on_top(ModeTag::Interpolate));
    assert!(!s.has_on_top(ModeTag::Quasiquote));
    assert_eq!(s.pop(), Some(ModeTag::Interpolate));
    assert!(s.has_on_top(ModeTag::Quasiquote));
    assert_eq!(s.pop(), Some(ModeTag::Quasiquote));
    assert!(s.is_empty());
}

#[test]
fn pop_empty_is_noop() {
    let mut s = ModeStack::default();
    assert_eq!(s.pop(), None);
    assert_eq!(s.len(), 0);
    s.push(ModeTag::Quoted).unwrap();
    assert_eq!(s.top(), Some(ModeTag::Quoted));
}

#[test]
fn overflow_leaves_stack_unchanged() {
    let mut s = ModeStack::new();
    for _ in 0..MODE_STACK_CAPACITY - 1 {
        s.push(ModeTag::Quoted).unwrap();
    }
    s.push(ModeTag::Quasiquote).unwrap();
    assert!(s.is_full());
    assert_eq!(s.push(ModeTag::Interpolate), Err(ModeStackOverflow));
    assert_eq!(s.len(), MODE_STACK_CAPACITY);
    assert_eq!(s.top(), Some(ModeTag::Quasiquote));
}

#[test]
fn iter_is_top_first() {
    let mut s = ModeStack::new();
    s.push(ModeTag::Quoted).unwrap();
    s.push(ModeTag::Quasiquote).unwrap();
    s.push(ModeTag::Interpolate).unwrap();
    let markers: String = s.iter().map(ModeTag::marker).collect();
    assert_eq!(markers, ",`'");
}

#[test]
fn overflow_message() {
    assert_eq!(ModeStackOverflow.to_string(), "quote modes nested deeper than 32");
}

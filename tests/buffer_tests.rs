//! Tests for scans over line buffers: wrap-around, direction, word tables
//! and match retention.

#![allow(clippy::uninlined_format_args)]

use patscan::{BufPos, Pattern, PatternHistory, SavedMatch, ScanDirection, WordTable};

fn scan(
    lines: &[&str],
    spec: &str,
    start: BufPos,
    dir: ScanDirection,
    count: usize,
) -> Option<(BufPos, BufPos)> {
    let p = Pattern::new(spec).unwrap();
    let word = WordTable::default();
    p.scan_buffer(lines, start, dir, count, &word)
        .map(|m| (m.start, m.end))
}

#[test]
fn test_forward_scan_from_middle() {
    let lines = ["alpha beta", "gamma delta"];
    assert_eq!(
        scan(&lines, "delta", BufPos::new(0, 3), ScanDirection::Forward, 1),
        Some((BufPos::new(1, 6), BufPos::new(1, 11)))
    );
}

#[test]
fn test_wrap_around_forward() {
    let lines = ["target here", "nothing there"];
    // Starting past the only occurrence wraps to find it.
    assert_eq!(
        scan(&lines, "target", BufPos::new(1, 0), ScanDirection::Forward, 1),
        Some((BufPos::new(0, 0), BufPos::new(0, 6)))
    );
    // A pattern that never occurs terminates after one full cycle.
    assert_eq!(
        scan(&lines, "absent", BufPos::new(1, 0), ScanDirection::Forward, 1),
        None
    );
}

#[test]
fn test_wrap_around_backward() {
    let lines = ["early words", "late words"];
    // A backward scan from the top wraps to the bottom.
    assert_eq!(
        scan(&lines, "late", BufPos::new(0, 0), ScanDirection::Backward, 1),
        Some((BufPos::new(1, 0), BufPos::new(1, 4)))
    );
}

#[test]
fn test_backward_scan() {
    let lines = ["one two one", "two one two"];
    let end = BufPos::new(1, 11);
    assert_eq!(
        scan(&lines, "one", end, ScanDirection::Backward, 1),
        Some((BufPos::new(1, 4), BufPos::new(1, 7)))
    );
    assert_eq!(
        scan(&lines, "one", end, ScanDirection::Backward, 2),
        Some((BufPos::new(0, 8), BufPos::new(0, 11)))
    );
    assert_eq!(
        scan(&lines, "one", end, ScanDirection::Backward, 3),
        Some((BufPos::new(0, 0), BufPos::new(0, 3)))
    );
}

#[test]
fn test_line_anchors_on_buffers() {
    let lines = ["indent", "  indent"];
    // With 'm', ^ anchors at each line's start.
    // Starting inside the word, the scan wraps back to the line start.
    assert_eq!(
        scan(&lines, "^indent:m", BufPos::new(0, 1), ScanDirection::Forward, 1),
        Some((BufPos::new(0, 0), BufPos::new(0, 6)))
    );
    let m = scan(&lines, "^  :m", BufPos::new(0, 0), ScanDirection::Forward, 1);
    assert_eq!(m, Some((BufPos::new(1, 0), BufPos::new(1, 2))));
}

#[test]
fn test_regex_across_lines() {
    let lines = ["ends here", "starts"];
    // An explicit \n element crosses the line boundary.
    assert_eq!(
        scan(&lines, r"here\nstarts", BufPos::new(0, 0), ScanDirection::Forward, 1),
        Some((BufPos::new(0, 5), BufPos::new(1, 6)))
    );
    // But the any-char element does not.
    assert_eq!(
        scan(&lines, "here.starts", BufPos::new(0, 0), ScanDirection::Forward, 1),
        None
    );
}

#[test]
fn test_empty_lines() {
    let lines = ["a", "", "b"];
    assert_eq!(
        scan(&lines, "b", BufPos::new(0, 0), ScanDirection::Forward, 1),
        Some((BufPos::new(2, 0), BufPos::new(2, 1)))
    );
    // An empty line is an anchor-only position.
    assert_eq!(
        scan(&lines, "^$:m", BufPos::new(0, 0), ScanDirection::Forward, 1),
        Some((BufPos::new(1, 0), BufPos::new(1, 0)))
    );
}

#[test]
fn test_word_table_customization() {
    let lines = ["foo-bar baz"];
    let p = Pattern::new(r"\bfoo\b").unwrap();

    let word = WordTable::default();
    assert!(p
        .scan_buffer(&lines[..], BufPos::new(0, 0), ScanDirection::Forward, 1, &word)
        .is_some());

    // Making '-' a word constituent removes the boundary after "foo".
    let mut joined = WordTable::default();
    joined.add(b'-');
    assert!(p
        .scan_buffer(&lines[..], BufPos::new(0, 0), ScanDirection::Forward, 1, &joined)
        .is_none());
}

#[test]
fn test_saved_match_recall() {
    let lines = ["name: alpha", "name: beta"];
    let p = Pattern::new(r"name: (\w+)").unwrap();
    let word = WordTable::default();
    let mut saved = SavedMatch::default();

    p.scan_buffer_saving(
        &lines[..],
        BufPos::new(0, 0),
        ScanDirection::Forward,
        1,
        &word,
        &mut saved,
    )
    .unwrap();
    assert_eq!(saved.group_text(1), Some(&b"alpha"[..]));

    // A second scan overwrites the retained text.
    p.scan_buffer_saving(
        &lines[..],
        BufPos::new(0, 11),
        ScanDirection::Forward,
        1,
        &word,
        &mut saved,
    )
    .unwrap();
    assert_eq!(saved.last_match(), Some(&b"name: beta"[..]));
    assert_eq!(saved.group_text(1), Some(&b"beta"[..]));
}

#[test]
fn test_saved_match_spans_lines() {
    let lines = ["head tail", "next"];
    let p = Pattern::new(r"tail\nnext").unwrap();
    let word = WordTable::default();
    let mut saved = SavedMatch::default();
    p.scan_buffer_saving(
        &lines[..],
        BufPos::new(0, 0),
        ScanDirection::Forward,
        1,
        &word,
        &mut saved,
    )
    .unwrap();
    assert_eq!(saved.last_match(), Some(&b"tail\nnext"[..]));
}

#[test]
fn test_pattern_history() {
    let mut history = PatternHistory::new(3);
    history.push("first");
    history.push("second");
    history.push("second");
    history.push("third");
    assert_eq!(history.latest(), Some("third"));
    assert_eq!(
        history.iter().collect::<Vec<_>>(),
        vec!["third", "second", "first"]
    );
    history.push("fourth");
    assert_eq!(
        history.iter().collect::<Vec<_>>(),
        vec!["fourth", "third", "second"]
    );

    // Recalled entries recompile as-is, suffix included.
    history.push("spot:i");
    let p = Pattern::new(history.latest().unwrap()).unwrap();
    assert!(p.options().ignore_case);
}

#[test]
fn test_out_of_range_start_positions() {
    // Positions past a line's end or past the last line act as the nearest
    // input edge instead of faulting.
    let lines = ["ab", "cd"];
    assert_eq!(
        scan(&lines, "ab", BufPos::new(0, 99), ScanDirection::Backward, 1),
        Some((BufPos::new(0, 0), BufPos::new(0, 2)))
    );
    assert_eq!(
        scan(&lines, "cd", BufPos::new(9, 9), ScanDirection::Backward, 1),
        Some((BufPos::new(1, 0), BufPos::new(1, 2)))
    );
    assert_eq!(
        scan(&lines, "ab", BufPos::new(9, 9), ScanDirection::Forward, 1),
        Some((BufPos::new(0, 0), BufPos::new(0, 2)))
    );
}

#[test]
fn test_degenerate_buffers() {
    let empty: [&str; 0] = [];
    assert_eq!(
        scan(&empty, "x", BufPos::new(0, 0), ScanDirection::Forward, 1),
        None
    );
    let one = [""];
    assert_eq!(
        scan(&one, "x", BufPos::new(0, 0), ScanDirection::Forward, 1),
        None
    );
    assert_eq!(
        scan(&one, "^$", BufPos::new(0, 0), ScanDirection::Forward, 1),
        Some((BufPos::new(0, 0), BufPos::new(0, 0)))
    );
}

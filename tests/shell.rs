// Command-shell integration suite: scripts fed through in-memory buffers,
// replies compared exactly against the line protocol.

use std::io::Cursor;

fn run_script(script: &str) -> String {
    let mut out = Vec::new();
    quash::shell::run(Cursor::new(script), &mut out).expect("in-memory io cannot fail");
    String::from_utf8(out).expect("replies are ascii")
}

// Test: the full protocol in one session — inserts with duplicates, lookup,
// multiplicity-aware deletes, extraction across signs, print, and absence
// replies.
#[test]
fn full_session_transcript() {
    let script = "\
insert 5
insert -3
insert 5
lookup 5
lookup 42
delete 5
delete 5
delete 5
deleteMin
deleteMin
print
exit
";
    assert_eq!(
        run_script(script),
        "\
inserted, count = 1
inserted, count = 1
inserted, count = 2
found, count = 2
not found
decremented, count = 1
removed
not found
min -3 removed
heap is empty

"
    );
}

// Test: repeated deleteMin over a shuffled insertion emits the numerals in
// ascending numeric order.
#[test]
fn delete_min_drains_in_numeric_order() {
    let values = [30i64, -2, 7, 100, -40, 0, 9, 55, -1, 8];
    let mut script = String::new();
    for v in values {
        script.push_str(&format!("insert {}\n", v));
    }
    for _ in 0..values.len() {
        script.push_str("deleteMin\n");
    }
    script.push_str("exit\n");

    let output = run_script(&script);
    let minima: Vec<i64> = output
        .lines()
        .filter_map(|line| line.strip_prefix("min "))
        .filter_map(|rest| rest.strip_suffix(" removed"))
        .map(|v| v.parse().unwrap())
        .collect();
    let mut expected = values.to_vec();
    expected.sort_unstable();
    assert_eq!(minima, expected);
}

// Test: input ending without `exit` terminates at end of stream.
#[test]
fn end_of_input_terminates() {
    assert_eq!(run_script("insert 1\n"), "inserted, count = 1\n");
}

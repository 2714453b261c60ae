// End-to-end decoding of capture lines into suite assertions, and the
// two-run determinism check built on top of it.

use unitsynth_runtime::{
    AssertKind, AssignKind, Decoder, Stmt, StmtPrinter, SuitePrinter, validate_runs,
};

fn print_all(stmts: &[Stmt]) -> Vec<String> {
    let printer = SuitePrinter::default();
    stmts.iter().map(|s| printer.print_stmt(s)).collect()
}

#[test]
fn int_leaf_becomes_equal_assertion() {
    let mut decoder = Decoder::new();
    let stmts = decoder.decode_line(r#"{"type":"int","var_name":"x","val":"42"}"#);
    assert_eq!(
        stmts,
        vec![Stmt::Assert {
            kind: AssertKind::EqualValues,
            expected: "int(42)".to_string(),
            value: Some("x".to_string()),
        }]
    );
    assert_eq!(print_all(&stmts), ["s.EqualValues(int(42), x)"]);
}

#[test]
fn pointer_dereference_declares_then_reassigns() {
    let line = r#"{"type":"pointer","var_name":"p","val":"0xdead","child":{"type":"int","var_name":"y","val":"7"}}"#;
    let mut decoder = Decoder::new();

    let first = decoder.decode_line(line);
    assert_eq!(
        first[0],
        Stmt::Assign {
            lhs: "y".to_string(),
            rhs: "*p".to_string(),
            kind: AssignKind::Define,
        }
    );
    assert_eq!(print_all(&first), ["y := *p", "s.EqualValues(int(7), y)"]);

    let second = decoder.decode_line(line);
    assert_eq!(print_all(&second), ["y = *p", "s.EqualValues(int(7), y)"]);
}

#[test]
fn fresh_decoder_declares_again() {
    let line = r#"{"type":"pointer","var_name":"p","val":"0xdead","child":{"type":"int","var_name":"y","val":"7"}}"#;
    Decoder::new().decode_line(line);
    let stmts = Decoder::new().decode_line(line);
    assert_eq!(print_all(&stmts), ["y := *p", "s.EqualValues(int(7), y)"]);
}

#[test]
fn nil_pointer_leaf_is_a_single_nil_assertion() {
    let mut decoder = Decoder::new();
    let stmts = decoder.decode_line(r#"{"type":"pointer","var_name":"p","val":"nil"}"#);
    assert_eq!(print_all(&stmts), ["s.Nil(p)"]);
    assert!(stmts.iter().all(Stmt::is_assert));
}

#[test]
fn nil_pointer_with_child_is_not_dereferenced() {
    let mut decoder = Decoder::new();
    let stmts = decoder.decode_line(
        r#"{"type":"pointer","var_name":"p","val":"nil","child":{"type":"pointer","var_name":"p","val":"nil"}}"#,
    );
    assert_eq!(print_all(&stmts), ["s.Nil(p)"]);
}

#[test]
fn identical_runs_are_accepted() {
    let run = [
        r#"{"type":"int","var_name":"x","val":"42"}"#,
        r#"{"type":"pointer","var_name":"p","val":"0xdead","child":{"type":"int","var_name":"y","val":"7"}}"#,
        r#"{"type":"error","var_name":"err","val":"nil"}"#,
    ];
    let info = validate_runs(run, run, &SuitePrinter::default());
    assert!(info.is_valid);
    assert_eq!(
        info.accepted(),
        [
            "s.EqualValues(int(42), x)".to_string(),
            "y := *p".to_string(),
            "s.EqualValues(int(7), y)".to_string(),
            "s.NoError(err)".to_string(),
        ]
    );
}

#[test]
fn differing_map_key_is_rejected() {
    let first = [
        r#"{"type":"map","arr_ident":"k","map_key_type":"string","val":"a","child":{"type":"int","var_name":"res[k]","val":"1"}}"#,
    ];
    let second = [
        r#"{"type":"map","arr_ident":"k","map_key_type":"string","val":"b","child":{"type":"int","var_name":"res[k]","val":"1"}}"#,
    ];
    let info = validate_runs(first, second, &SuitePrinter::default());
    assert_eq!(info.assert_stmts, ["s.EqualValues(int(1), res[\"a\"])"]);
    assert_eq!(info.second_run, ["s.EqualValues(int(1), res[\"b\"])"]);
    assert!(!info.is_valid);
    assert!(info.accepted().is_empty());
}

#[test]
fn extra_capture_in_one_run_is_rejected() {
    let first = [r#"{"type":"bool","var_name":"ok","val":"true"}"#];
    let second = [
        r#"{"type":"bool","var_name":"ok","val":"true"}"#,
        r#"{"type":"bool","var_name":"done","val":"false"}"#,
    ];
    let info = validate_runs(first, second, &SuitePrinter::default());
    assert!(!info.is_valid);
}

#[test]
fn malformed_capture_does_not_abort_the_run() {
    let run = [
        "{not json",
        r#"{"type":"uint8","var_name":"b","val":"255"}"#,
    ];
    let info = validate_runs(run, run, &SuitePrinter::default());
    assert!(info.is_valid);
    assert_eq!(info.assert_stmts, ["s.EqualValues(uint8(255), b)"]);
}

#[test]
fn named_wrapper_compares_underlying_value() {
    let mut decoder = Decoder::new();
    let stmts = decoder.decode_line(
        r#"{"type":"custom","var_name":"d","val":"5","child":{"type":"int","var_name":"d","val":"5"}}"#,
    );
    assert_eq!(print_all(&stmts), ["s.EqualValues(int(5), d)"]);
}

#[test]
fn panic_capture_yields_no_statements() {
    let mut decoder = Decoder::new();
    assert!(!decoder.panicked());
    let stmts = decoder.decode_line(r#"{"type":"panic","val":"nil map"}"#);
    assert!(stmts.is_empty());
    assert!(decoder.panicked());
}

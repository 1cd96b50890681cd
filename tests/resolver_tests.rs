/// Symbol resolution tests: slot order, reference lines, table dumps
use tiny_lang::{
    resolve, Error, Interpreter, Parser, Program, ScriptedInput, SymbolEntry, SymbolTable,
};

fn parse(source: &str) -> Program {
    Parser::from_text(source).unwrap().parse_program().unwrap()
}

#[test]
fn test_slots_are_dense_and_ordered() {
    let symbols = resolve(&parse("c := 1; a := c; b := a + c; write b"));
    let names: Vec<&str> = symbols.iter().map(|e| e.name.as_str()).collect();
    let slots: Vec<usize> = symbols.iter().map(|e| e.slot).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(slots, vec![0, 1, 2]);
}

#[test]
fn test_repeat_body_before_condition() {
    let symbols = resolve(&parse("repeat a := a + 1 until b = a"));
    assert_eq!(symbols.slot_of("a"), Some(0));
    assert_eq!(symbols.slot_of("b"), Some(1));
}

#[test]
fn test_if_condition_then_else_order() {
    let symbols = resolve(&parse("if c < 1 then t := 1 else e := 2 end"));
    let names: Vec<&str> = symbols.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["c", "t", "e"]);
}

#[test]
fn test_every_reference_line_recorded() {
    let source = "read x;\nrepeat\n  x := x - 1\nuntil x = 0;\nwrite x";
    let symbols = resolve(&parse(source));
    assert_eq!(
        symbols.lookup("x"),
        Some(&SymbolEntry {
            name: "x".to_string(),
            slot: 0,
            lines: vec![1, 3, 3, 4, 5],
        })
    );
}

#[test]
fn test_names_are_case_sensitive() {
    let symbols = resolve(&parse("x := 1; X := 2"));
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.slot_of("X"), Some(1));
}

#[test]
fn test_resolution_is_idempotent() {
    let program = parse("read n; f := 1; repeat f := f * n; n := n - 1 until n = 0; write f");
    assert_eq!(resolve(&program), resolve(&program));
}

#[test]
fn test_symbol_dump() {
    let symbols = resolve(&parse("x := 1;\ny := x;\nwrite y"));
    assert_eq!(
        symbols.to_string(),
        "[Var=x][Mem=0][Line=1][Line=2]\n[Var=y][Mem=1][Line=2][Line=3]\n"
    );
}

#[test]
fn test_symbol_json_round_trip() {
    let symbols = resolve(&parse("b := 1; a := b"));
    let json = symbols.to_json().unwrap();
    let back: SymbolTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, symbols);
    assert_eq!(back.slot_of("a"), Some(1));
}

#[test]
fn test_foreign_table_is_unresolved_reference() {
    let program = parse("x := 1;\nwrite y");
    let other = resolve(&parse("x := 5"));

    let mut output: Vec<i64> = Vec::new();
    let mut interpreter = Interpreter::new(&other, ScriptedInput::default(), &mut output);
    let err = interpreter.execute(&program).unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedReference {
            name: "y".to_string(),
            line: 2,
        }
    );
    drop(interpreter);
    assert!(output.is_empty());
}

#[test]
fn test_unresolved_read_target_is_fatal() {
    let program = parse("read z");
    let empty = SymbolTable::new();

    let mut interpreter = Interpreter::new(&empty, ScriptedInput::new([1]), Vec::<i64>::new());
    assert_eq!(
        interpreter.execute(&program).unwrap_err(),
        Error::UnresolvedReference {
            name: "z".to_string(),
            line: 1,
        }
    );
}

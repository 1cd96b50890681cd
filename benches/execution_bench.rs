use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tiny_lang::{resolve, Interpreter, Parser, Scanner, ScriptedInput};

const FACTORIAL: &str = r#"
    { factorial of the input }
    read x;
    if 0 < x then
      fact := 1;
      repeat
        fact := fact * x;
        x := x - 1
      until x = 0;
      write fact
    end
"#;

fn counting_loop(n: usize) -> String {
    format!(
        "i := 0; sum := 0;\nrepeat\n  sum := sum + i * i / 3 ^ 1;\n  i := i + 1\nuntil {} < i;\nwrite sum",
        n
    )
}

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize factorial", |b| {
        b.iter(|| {
            let mut scanner = Scanner::from_text(black_box(FACTORIAL));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    c.bench_function("parse factorial", |b| {
        b.iter(|| {
            let mut parser = Parser::from_text(black_box(FACTORIAL)).unwrap();
            parser.parse_program().unwrap()
        })
    });
}

fn execution_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_loop");

    for size in [10usize, 100, 1_000].iter() {
        let source = counting_loop(*size);
        let program = Parser::from_text(&source).unwrap().parse_program().unwrap();
        let symbols = resolve(&program);

        group.bench_with_input(BenchmarkId::new("execute", size), size, |b, _| {
            b.iter(|| {
                let mut output: Vec<i64> = Vec::new();
                let mut interpreter =
                    Interpreter::new(&symbols, ScriptedInput::default(), &mut output);
                interpreter.execute(black_box(&program)).unwrap();
                drop(interpreter);
                black_box(output)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, scanner_benchmark, parser_benchmark, execution_benchmark);
criterion_main!(benches);

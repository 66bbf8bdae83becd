//! Simulation driving: load a program, run the initial pass once and N
//! stepped passes, record every `(scope, variable)` value after each
//! step, and print the recorded series.

use std::collections::BTreeMap;
use std::path::Path;

use rill_core::{lex, parse, ParseNode, SourceError, Token};
use rill_eval::{run_initial, run_step, Store};

use crate::OutputFormat;

/// Recorded per-tick values, keyed `scope:variable`.
///
/// A variable that first appears at tick t joins with a shorter series;
/// each series holds one value per tick since the variable existed.
#[derive(Debug, Default)]
struct SeriesSet {
    series: BTreeMap<String, Vec<f64>>,
}

impl SeriesSet {
    fn record(&mut self, store: &Store) {
        for (scope, name, value) in store.iter() {
            let key = format!("{}:{}", trim_scope(scope), name);
            self.series.entry(key).or_default().push(value);
        }
    }
}

/// Scope keys carry the literal scope-name line; presentation drops the
/// leading ':' and surrounding whitespace.
fn trim_scope(scope: &str) -> &str {
    scope.trim_start_matches(':').trim()
}

pub(crate) fn cmd_run(file: &Path, steps: u32, output: OutputFormat) -> i32 {
    let filename = file.display().to_string();
    let tree = match load_program(file, &filename, output) {
        Ok(tree) => tree,
        Err(code) => return code,
    };

    let mut store = Store::new();
    if let Err(e) = run_initial(&tree, &mut store) {
        report_error(&format!("eval error: {}", e), output);
        return 1;
    }

    let mut recorded = SeriesSet::default();
    for _ in 0..steps {
        if let Err(e) = run_step(&tree, &mut store) {
            report_error(&format!("eval error: {}", e), output);
            return 1;
        }
        recorded.record(&store);
    }

    match output {
        OutputFormat::Text => {
            for (key, values) in &recorded.series {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                println!("{}: {}", key, rendered.join(" "));
            }
        }
        OutputFormat::Json => {
            let out = serde_json::json!({ "steps": steps, "series": recorded.series });
            println!("{}", out);
        }
    }
    0
}

pub(crate) fn cmd_check(
    file: &Path,
    dump_tokens: bool,
    dump_tree: bool,
    output: OutputFormat,
) -> i32 {
    let filename = file.display().to_string();
    let src = match std::fs::read_to_string(file) {
        Ok(src) => src,
        Err(_) => {
            report_error(
                &format!("error: program file not found: {}", file.display()),
                output,
            );
            return 1;
        }
    };

    let tokens = match lex(&src, &filename) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_source_error(&e, output);
            return 1;
        }
    };
    if dump_tokens {
        dump_token_kinds(&tokens);
    }

    let tree = match parse(&tokens, &filename) {
        Ok(tree) => tree,
        Err(e) => {
            report_source_error(&e, output);
            return 1;
        }
    };
    if dump_tree {
        print!("{}", tree.render());
    }

    match output {
        OutputFormat::Text => println!("ok: {}", filename),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "ok": true, "file": filename }));
        }
    }
    0
}

fn dump_token_kinds(tokens: &[Token]) {
    for tok in tokens {
        println!("{:?}", tok.kind);
    }
}

fn load_program(file: &Path, filename: &str, output: OutputFormat) -> Result<ParseNode, i32> {
    let src = match std::fs::read_to_string(file) {
        Ok(src) => src,
        Err(_) => {
            report_error(
                &format!("error: program file not found: {}", file.display()),
                output,
            );
            return Err(1);
        }
    };
    let tokens = lex(&src, filename).map_err(|e| {
        report_source_error(&e, output);
        1
    })?;
    parse(&tokens, filename).map_err(|e| {
        report_source_error(&e, output);
        1
    })
}

fn report_error(message: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("{}", message),
        OutputFormat::Json => println!("{}", serde_json::json!({ "error": message })),
    }
}

fn report_source_error(err: &SourceError, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("{}", err),
        OutputFormat::Json => match serde_json::to_value(err) {
            Ok(value) => println!("{}", serde_json::json!({ "error": value })),
            Err(_) => println!("{}", serde_json::json!({ "error": err.to_string() })),
        },
    }
}

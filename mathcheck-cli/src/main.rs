//! Interactive shell for the equivalence checker.
//!
//! A line of the form `LHS == RHS` translates both sides from markup and reports whether they
//! are algebraically equivalent; prefix the line with `:exact` to compare surface forms instead.
//! A bare expression prints its translation and canonical simplified form. Input can also come
//! from a file argument or stdin, one query per line.

use ariadne::Source;
use mathcheck_markup::translate;
use mathcheck_parser::parser::{ast::Expr, Parser};
use mathcheck_symbolic::equiv::{verdict, ComparisonMode, Verdict};
use mathcheck_symbolic::{simplify, SymExpr};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};

/// Handles a single query line.
fn check_line(input: &str) {
    let input = input.trim();
    let (mode, rest) = match input.strip_prefix(":exact") {
        Some(rest) => (ComparisonMode::Exact, rest.trim()),
        None => (ComparisonMode::Algebraic, input),
    };

    if let Some((lhs, rhs)) = rest.split_once("==") {
        let (lhs, rhs) = match mode {
            ComparisonMode::Algebraic => (translate(lhs.trim()), translate(rhs.trim())),
            ComparisonMode::Exact => (lhs.trim().to_string(), rhs.trim().to_string()),
        };

        match verdict(&lhs, &rhs, mode) {
            Verdict::Equivalent => println!("equivalent"),
            Verdict::NotEquivalent => println!("not equivalent"),
            Verdict::Malformed => println!("malformed input"),
        }
    } else {
        // show what the translator and the simplifier make of the expression
        let translated = translate(rest);
        match Parser::new(&translated).try_parse_full::<Expr>() {
            Ok(expr) => {
                println!("{} = {}", translated, simplify(&SymExpr::from(expr)));
            },
            Err(err) => {
                err.build_report("input")
                    .eprint(("input", Source::from(translated.as_str())))
                    .unwrap();
            },
        }
    }
}

/// Runs every non-empty line of the given input.
fn run(input: &str) {
    for line in input.lines() {
        if !line.trim().is_empty() {
            check_line(line);
        }
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run queries from a file
        let mut input = String::new();
        BufReader::new(File::open(filename).unwrap())
            .read_to_string(&mut input)
            .unwrap();

        run(&input);
    } else if !io::stdin().is_terminal() {
        // read queries from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap();

        run(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new().unwrap();

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            check_line(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}

//! CLI driver (C10): a thin binary for evaluating and debugging JSON
//! Logic rules from the shell. Contains no engine logic of its own — it
//! only calls `create_logic`, `apply_json`, and `data_accessor` from the
//! library surface.
//!
//! # Commands
//!
//! - `eval`: evaluate a rule against data, print the resulting value.
//! - `translate`: print the translated expression tree and its static
//!   variable-name table, without evaluating.
//! - `test`: run a JSON test-suite file and report pass/fail counts.

use clap::{Parser, Subcommand};
use colored::Colorize;
use jsonlogic_engine::{apply_json, create_logic};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jsonlogic-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a JSON Logic rule against data
    Eval {
        /// JSON Logic rule (inline JSON or @file.json)
        #[arg(short, long)]
        rule: String,

        /// Data to evaluate against (inline JSON or @file.json)
        #[arg(short, long)]
        data: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Translate a rule and print its expression tree, without evaluating
    Translate {
        /// JSON Logic rule (inline JSON or @file.json)
        #[arg(short, long)]
        rule: String,
    },

    /// Run a test suite from a JSON file
    Test {
        /// Path to the test suite JSON file
        test_file: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Test case definition for test suites.
#[derive(Debug, Deserialize)]
struct TestCase {
    description: String,
    rule: Value,
    data: Value,
    expected: Value,
}

/// Test suite definition.
#[derive(Debug, Deserialize)]
struct TestSuite {
    name: String,
    tests: Vec<TestCase>,
}

/// Loads content from a file or parses as inline JSON. File references
/// use the `@` prefix (e.g. `@rules/basic.json`).
fn load_json(input: &str) -> Result<Value, String> {
    if let Some(file_path) = input.strip_prefix('@') {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(format!("File not found: {file_path}"));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{file_path}': {e}"))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse JSON from '{file_path}': {e}"))
    } else {
        serde_json::from_str(input).map_err(|e| format!("Failed to parse JSON: {e}"))
    }
}

fn run_eval(rule: &str, data: &str, pretty: bool) -> Result<(), String> {
    let rule_value = load_json(rule)?;
    let data_value = load_json(data)?;

    let start = Instant::now();
    let result = apply_json(&rule_value, &data_value);
    let duration = start.elapsed();

    match result {
        Ok(value) => {
            println!("{} Evaluation succeeded", "✓".green());
            if pretty {
                println!(
                    "Result: {}",
                    serde_json::to_string_pretty(&value)
                        .unwrap_or_else(|_| value.to_string())
                        .green()
                );
            } else {
                println!("Result: {}", value.to_string().green());
            }
            println!("Time: {duration:?}");
            Ok(())
        }
        Err(e) => {
            println!("{} Evaluation failed", "✗".red());
            println!("Error: {}", e.to_string().red());
            Err(e.to_string())
        }
    }
}

fn run_translate(rule: &str) -> Result<(), String> {
    let rule_value = load_json(rule)?;
    let bundle = create_logic(&rule_value).map_err(|e| e.to_string())?;

    println!("{}", "Tree:".bold());
    println!("  {:#?}", bundle.tree);
    println!();
    println!("{}", "Static variables:".bold());
    if bundle.var_names.is_empty() {
        println!("  (none)");
    } else {
        for (idx, name) in bundle.var_names.iter().enumerate() {
            println!("  [{idx}] {name}");
        }
    }
    println!();
    println!("has_computed_vars: {}", bundle.has_computed_vars);
    Ok(())
}

fn run_test(test_file: &str, verbose: bool) -> Result<(), String> {
    let path = Path::new(test_file);
    if !path.exists() {
        return Err(format!("Test file not found: {test_file}"));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read test file '{test_file}': {e}"))?;
    let suite: TestSuite = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse test suite '{test_file}': {e}"))?;

    println!("Running: {}", suite.name.bold());
    println!();

    let mut passed = 0;
    let mut failed = 0;
    let mut total_duration = std::time::Duration::ZERO;

    for test in &suite.tests {
        let start = Instant::now();
        let result = apply_json(&test.rule, &test.data);
        let duration = start.elapsed();
        total_duration += duration;

        let success = matches!(&result, Ok(actual) if *actual == test.expected);

        if success {
            passed += 1;
            println!("{} {} ({duration:?})", "✓".green(), test.description);
            if verbose {
                println!("  Rule: {}", test.rule);
                println!("  Data: {}", test.data);
                println!("  Expected: {}", test.expected);
                println!("  Actual: {}", result.unwrap());
                println!();
            }
        } else {
            failed += 1;
            println!("{} {} ({duration:?})", "✗".red(), test.description);
            match result {
                Ok(actual) => {
                    println!("  Expected: {}", test.expected.to_string().green());
                    println!("  Actual: {}", actual.to_string().red());
                }
                Err(e) => println!("  Error: {}", e.to_string().red()),
            }
            println!();
        }
    }

    println!();
    let summary = format!("Results: {passed} passed, {failed} failed ({total_duration:?})");
    if failed == 0 {
        println!("{}", summary.green());
        Ok(())
    } else {
        println!("{}", summary.red());
        Err(format!("{failed} test(s) failed"))
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { rule, data, pretty } => run_eval(&rule, &data, pretty),
        Commands::Translate { rule } => run_translate(&rule),
        Commands::Test { test_file, verbose } => run_test(&test_file, verbose),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

use rungs::{Numeric, Problem};
use std::io;

// Try each free-standing operator in turn until both sides parse
fn binary(expr: &str) -> Option<Result<Numeric, Problem>> {
    let words: Vec<&str> = expr.split_whitespace().collect();
    for (i, word) in words.iter().enumerate().skip(1) {
        let op = match *word {
            "+" | "-" | "−" | "*" | "×" | "/" | "÷" => *word,
            _ => continue,
        };
        let left: Result<Numeric, _> = words[..i].join(" ").parse();
        let right: Result<Numeric, _> = words[i + 1..].join(" ").parse();
        let (Ok(left), Ok(right)) = (left, right) else {
            continue;
        };
        return Some(match op {
            "+" => left.add(&right),
            "-" | "−" => left.subtract(&right),
            "*" | "×" => left.multiply(&right),
            _ => left.divide(&right),
        });
    }
    None
}

fn evaluate(expr: &str) -> Result<Numeric, Problem> {
    if let Some(operand) = expr.strip_prefix("sqrt") {
        let operand: Numeric = operand.trim().parse()?;
        return operand.sqrt();
    }
    match binary(expr) {
        Some(ans) => ans,
        None => expr.parse(),
    }
}

pub fn main() {
    loop {
        let mut input = String::new();

        io::stdin()
            .read_line(&mut input)
            .expect("Failed to read calculator input");

        let expr = input.trim();
        if expr.is_empty() {
            break;
        }

        match evaluate(expr) {
            Ok(ans) if ans.is_exact() => println!("{ans} (exact)"),
            Ok(ans) => println!("{ans} (inexact)"),
            Err(Problem::DivideByZero) => println!("Attempted division by zero"),
            Err(problem) if problem.kind() == rungs::ProblemKind::Construction => {
                eprintln!("Parsing your input failed: {problem}")
            }
            Err(problem) => println!("Calculation failed: {problem}"),
        }
    }
}

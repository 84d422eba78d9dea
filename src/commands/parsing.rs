//! Shared argument parsing for console commands.
use crate::core::prelude::*;

/// Splits a command line on whitespace; double quotes group words.
///
/// `cart add "Green Chilli" ravi@farm.in 40` yields four tokens.
/// `\"` inside quotes is a literal quote.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(AppError::Validation("Unterminated quote".to_string()));
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Positive finite price such as `40` or `37.5`.
pub fn parse_price(arg: &str) -> Option<f64> {
    arg.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Splits `name|solution` input; both halves trimmed.
pub fn split_pair(arg: &str) -> (String, String) {
    match arg.split_once('|') {
        Some((left, right)) => (left.trim().to_string(), right.trim().to_string()),
        None => (arg.trim().to_string(), String::new()),
    }
}

//! Interactive prompts used by `member add` and `member edit`.

use std::fmt::Display;

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use crate::dates::parse_date;

/// Free text, pre-filled with `initial`. May be left empty.
pub fn text(prompt: &str, initial: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(format!("  {prompt}"))
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Text that must not be blank; asks again until it isn't.
pub fn required_text(prompt: &str, initial: &str) -> Result<String> {
    loop {
        let value = text(prompt, initial)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        eprintln!("  {}", format!("{prompt} is required").red());
    }
}

/// Pick one of `options`, starting on `current`.
pub fn choose<T: Copy + PartialEq + Display>(
    prompt: &str,
    options: &[T],
    current: T,
) -> Result<T> {
    let items: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let start = options.iter().position(|o| *o == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(format!("  {prompt}"))
        .items(&items)
        .default(start)
        .interact()?;
    Ok(options[selection])
}

/// A date that may be cleared by leaving the answer empty.
/// Unparseable answers are reported and asked again.
pub fn optional_date(prompt: &str, current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let initial = current.map(|d| d.to_string()).unwrap_or_default();
    loop {
        let input = text(&format!("{prompt} (empty for none)"), &initial)?;
        if input.trim().is_empty() {
            return Ok(None);
        }
        match parse_date(&input) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(answer)
}

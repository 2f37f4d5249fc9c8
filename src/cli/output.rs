use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::OutputFormat;

/// Print data in the specified format
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Table => {
            println!("{}", Table::new(data));
        }
        OutputFormat::Plain => {
            for line in plain_lines(data)? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// One line per item, field values in declaration order separated by `|`
fn plain_lines<T: Serialize>(data: &[T]) -> Result<Vec<String>> {
    let json = serde_json::to_value(data)?;
    let lines = json
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item.as_object())
        .map(|obj| {
            obj.values()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    Ok(lines)
}

/// Print a single item as JSON
pub fn print_single<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

//! Output formatting utilities

use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print a failure message
pub(crate) fn fail(msg: &str) {
    println!("{} {}", "[FAIL]".red().bold(), msg);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Print an error message
pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Print a value as pretty JSON on stdout
pub(crate) fn json<T: serde::Serialize>(value: &T) -> crate::error::Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

/// Pretty JSON plus a trailing newline; write failures surface as `CliError::Io`
pub(crate) fn write_json<W: std::io::Write, T: serde::Serialize>(
    out: &mut W,
    value: &T,
) -> crate::error::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

/// Format a probability: 4 decimals, scientific below 1e-4
pub(crate) fn format_p(p: f64) -> String {
    if p > 0.0 && p < 1e-4 {
        format!("{p:.3e}")
    } else {
        format!("{p:.4}")
    }
}

//! Seed data export commands.
//!
//! Serializes the built-in seed data to pretty-printed JSON, either to
//! stdout or to a file given with `-o`.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use masoro_core::seed;

/// Export the seed menu items.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn menu(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    write_json("menu", &seed::menu_items(), output)
}

/// Export the seed order history.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn orders(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    write_json("orders", &seed::orders(), output)
}

/// Export the seed staff accounts.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn staff(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    write_json("staff", &seed::staff_accounts(), output)
}

/// Export the seed restaurant settings. Wrapped in a one-element array so
/// every export shares the same top-level shape.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn settings(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    write_json("settings", &[seed::settings()], output)
}

fn write_json<T: Serialize>(
    kind: &str,
    value: &T,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            info!(kind, path, bytes = json.len(), "Wrote export file");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

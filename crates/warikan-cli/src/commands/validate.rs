//! The `warikan validate` command.

use std::path::PathBuf;

use anyhow::Result;

use warikan_core::parser;

pub fn execute(request_path: PathBuf) -> Result<()> {
    let files = parser::load_requests(&request_path)?;

    let mut total_warnings = 0;

    for file in &files {
        println!(
            "Request: {} ({} roles, {} people)",
            file.display_name(),
            file.request.roles.len(),
            file.request.total_headcount()
        );

        let warnings = parser::validate_request(file);
        for w in &warnings {
            let prefix = w
                .role
                .as_ref()
                .map(|role| format!("  [{role}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if files.is_empty() {
        println!("No request files found.");
    } else if total_warnings == 0 {
        println!("All requests valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

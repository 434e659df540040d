//! The `warikan init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create warikan.toml
    if std::path::Path::new("warikan.toml").exists() {
        println!("warikan.toml already exists, skipping.");
    } else {
        std::fs::write("warikan.toml", SAMPLE_CONFIG)?;
        println!("Created warikan.toml");
    }

    // Create example request
    std::fs::create_dir_all("requests")?;
    let example_path = std::path::Path::new("requests/example.toml");
    if example_path.exists() {
        println!("requests/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_REQUEST)?;
        println!("Created requests/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit requests/example.toml with your roles and total");
    println!("  2. Run: warikan validate --request requests/example.toml");
    println!("  3. Run: warikan split --request requests/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# warikan configuration

# Tilt the search starts from (0 = split by headcount, 100 = steepest).
default_tilt = 50

# Never accept a schedule that collects less than the total.
shortfall_skip = false

currency = "JPY"
output_dir = "./warikan-results"
"#;

const EXAMPLE_REQUEST: &str = r#"# Roles are listed from highest rank to lowest.
[allocation]
name = "Year-end party"
total_amount = 97560
default_tilt = 50
payer = "Staff"
shortfall_skip = false

[[roles]]
name = "Director"
headcount = 7

[[roles]]
name = "Manager"
headcount = 5

[[roles]]
name = "Deputy manager"
headcount = 7

[[roles]]
name = "Staff"
headcount = 5
"#;

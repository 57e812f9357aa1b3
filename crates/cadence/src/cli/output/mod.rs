//! Output formatting utilities

use console::{style, Style};
use serde_json::{json, Value};

use cadence_release::{PackageOutcome, SessionSnapshot};
use cadence_strategies::BumpType;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for a bump type
pub fn bump_style(bump: BumpType) -> Style {
    match bump {
        BumpType::Major => Style::new().red().bold(),
        BumpType::Minor => Style::new().green().bold(),
        BumpType::Patch => Style::new().cyan(),
        BumpType::Sync => Style::new().magenta(),
        BumpType::None => Style::new().dim(),
    }
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// JSON document describing a batch of package outcomes
pub fn outcomes_json(outcomes: &[PackageOutcome]) -> Value {
    let packages: Vec<Value> = outcomes
        .iter()
        .map(|outcome| match outcome {
            PackageOutcome::Completed(snapshot) => json!({
                "package": snapshot.package,
                "ok": true,
                "snapshot": snapshot,
            }),
            PackageOutcome::Failed(err) => json!({
                "package": err.package,
                "ok": false,
                "error": err.source.to_string(),
            }),
        })
        .collect();
    json!({ "packages": packages })
}

/// Print the version decision of a session
pub fn print_decision(snapshot: &SessionSnapshot) {
    let decision = &snapshot.decision;
    println!("{}", header(&snapshot.package));
    println!("{}", key_value("Range", &snapshot.range));
    println!("{}", key_value("Commits", &snapshot.commit_count.to_string()));
    println!("{}", key_value("Current", &decision.current_version));
    println!(
        "{}",
        key_value(
            "Next",
            &bump_style(decision.bump_type)
                .apply_to(&decision.target_version)
                .to_string()
        )
    );
    println!(
        "{}",
        key_value(
            "Bump",
            &bump_style(decision.bump_type)
                .apply_to(decision.bump_type)
                .to_string()
        )
    );
    println!("{}", key_value("Reason", &decision.reason));
}

//! Output formatting for the CLI.

use console::style;
use pcforge_core::build::{BuildStatus, IncompatibilityIssue};
use pcforge_core::money::{Currency, Money};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print compatibility issues, or a confirmation when there are none.
    pub fn issues(&self, issues: &[IncompatibilityIssue]) {
        if self.json {
            return;
        }
        if issues.is_empty() {
            println!("  {} All components are compatible", style("✓").green());
            return;
        }
        for issue in issues {
            let (a, b) = issue.categories();
            println!(
                "  {} {} {}",
                style("✗").red(),
                style(format!("[{}/{}]", a, b)).dim(),
                issue
            );
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Status badge for build states.
pub fn status_badge(status: BuildStatus) -> String {
    match status {
        BuildStatus::Published => style(status.display_name()).green().to_string(),
        BuildStatus::Draft => style(status.display_name()).yellow().to_string(),
        BuildStatus::Archived => style(status.display_name()).dim().to_string(),
    }
}

/// Format an amount in the store currency.
pub fn format_price(amount: i64, currency: Currency) -> String {
    Money::new(amount, currency).display()
}

/// Format a signed amount with an explicit sign, for profits.
pub fn format_profit(amount: i64, currency: Currency) -> String {
    let text = format_price(amount, currency);
    if amount > 0 {
        style(format!("+{}", text)).green().to_string()
    } else if amount < 0 {
        style(text).red().to_string()
    } else {
        text
    }
}

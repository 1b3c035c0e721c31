//! Output formatting for CLI reports

use crate::stats::DurationSummary;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a duration summary as `(key, value)` rows
pub fn summary_rows(summary: &DurationSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Games", summary.count.to_string()),
        ("Shortest", summary.min.to_string()),
        ("Longest", summary.max.to_string()),
        ("Median", format!("{:.1}", summary.median)),
        ("Mean", format!("{:.2}", summary.mean)),
        (
            "Std dev",
            summary
                .std_dev
                .map_or_else(|| "n/a".to_string(), |sd| format!("{sd:.2}")),
        ),
    ]
}

/// Print a duration summary, or a placeholder when there are no games
pub fn print_summary(summary: Option<&DurationSummary>) {
    match summary {
        Some(summary) => {
            for (key, value) in summary_rows(summary) {
                print_kv(key, &value);
            }
        }
        None => print_kv("Games", "0"),
    }
}

//! Compact terminal output.

use std::fmt::Write;

use crate::linter::LintResult;

/// Format lint results as one `file:line:col  severity  message  rule` line
/// per diagnostic. Columns are 1-based.
pub fn format_text(results: &[LintResult]) -> String {
    let mut output = String::new();

    for result in results {
        for diagnostic in &result.diagnostics {
            if !output.is_empty() {
                output.push('\n');
            }
            let _ = write!(
                output,
                "{}:{}:{}  {}  {}  {}",
                result.filename,
                diagnostic.loc.line,
                diagnostic.loc.column + 1,
                diagnostic.severity.as_str(),
                diagnostic.message,
                diagnostic.rule_name,
            );
        }
    }

    output
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let mut parts = Vec::new();

    if error_count > 0 {
        parts.push(format!(
            "{} error{}",
            error_count,
            if error_count == 1 { "" } else { "s" }
        ));
    }

    if warning_count > 0 {
        parts.push(format!(
            "{} warning{}",
            warning_count,
            if warning_count == 1 { "" } else { "s" }
        ));
    }

    if parts.is_empty() {
        format!("No problems found in {} file(s)", file_count)
    } else {
        format!(
            "{} in {} file{}",
            parts.join(", "),
            file_count,
            if file_count == 1 { "" } else { "s" }
        )
    }
}

//! Output formatters for lint diagnostics.

mod text;

pub use text::*;

use serde::Serialize;

use crate::diagnostic::Severity;
use crate::linter::LintResult;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `file:line:col` line per diagnostic
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// Format lint results according to the specified format
pub fn format_results(results: &[LintResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(results),
        OutputFormat::Json => format_json(results),
    }
}

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileResult<'a> {
    pub file: &'a str,
    pub messages: Vec<JsonMessage<'a>>,
    pub error_count: usize,
    pub warning_count: usize,
    pub used_script_bindings: &'a [sgraffito_carton::CompactString],
}

/// JSON output structure for a single message.
///
/// Lines and columns are 1-based, as editors and eslint formatters expect.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage<'a> {
    pub rule_id: &'static str,
    pub severity: u8,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<&'static str>,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<&'a crate::diagnostic::Fix>,
}

/// Format results as JSON
fn format_json(results: &[LintResult]) -> String {
    let json_results: Vec<JsonFileResult> = results
        .iter()
        .map(|r| JsonFileResult {
            file: &r.filename,
            messages: r
                .diagnostics
                .iter()
                .map(|d| JsonMessage {
                    rule_id: d.rule_name,
                    severity: match d.severity {
                        Severity::Error => 2,
                        Severity::Warning => 1,
                    },
                    message: &d.message,
                    message_id: d.message_id,
                    line: d.loc.line,
                    column: d.loc.column + 1,
                    end_line: d.loc.end_line,
                    end_column: d.loc.end_column + 1,
                    fix: d.fix.as_ref(),
                })
                .collect(),
            error_count: r.error_count,
            warning_count: r.warning_count,
            used_script_bindings: &r.used_script_bindings,
        })
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;
    use crate::rules::vue::{AttributeHyphenation, RequireVForKey};

    fn lint(files: &[(&str, &str)]) -> Vec<LintResult> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(RequireVForKey));
        registry.register(Box::new(AttributeHyphenation::default()));
        let linter = Linter::with_registry(registry);
        files
            .iter()
            .map(|(name, source)| linter.lint_template(source, name))
            .collect()
    }

    #[test]
    fn test_format_text() {
        let results = lint(&[
            ("a.pug", "ul\n  li(v-for=\"x in list\")"),
            ("b.pug", "p ok"),
            ("c.pug", "my-comp(myProp=\"a\")"),
        ]);
        insta::assert_snapshot!(format_results(&results, OutputFormat::Text), @r"
        a.pug:2:6  error  Elements in iteration expect to have 'v-bind:key' directives.  vue/require-v-for-key
        c.pug:1:9  warning  Attribute 'myProp' must be hyphenated.  vue/attribute-hyphenation
        ");
    }

    #[test]
    fn test_format_json() {
        let results = lint(&[("c.pug", "my-comp(myProp=\"a\")")]);
        let output = format_results(&results, OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        let file = &json[0];
        assert_eq!(file["file"], "c.pug");
        assert_eq!(file["warningCount"], 1);
        let message = &file["messages"][0];
        assert_eq!(message["ruleId"], "vue/attribute-hyphenation");
        assert_eq!(message["severity"], 1);
        assert_eq!(message["messageId"], "mustBeHyphenated");
        assert_eq!((message["line"].as_u64(), message["column"].as_u64()), (Some(1), Some(9)));
        assert_eq!(message["endColumn"], 15);
        assert_eq!(message["fix"]["edits"][0]["newText"], "my-prop");
    }

    #[test]
    fn test_format_json_empty() {
        assert_eq!(format_results(&[], OutputFormat::Json), "[]");
    }
}

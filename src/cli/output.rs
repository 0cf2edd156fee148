//! Output formatting for interop-preflight.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! All formatters produce valid output for any ValidationReport input,
//! including a report with zero suites.

use crate::checks::classify::{InstanceOutcome, InstanceReport};
use crate::cli::args::OutputFormat;
use crate::engine::result::{ResultSummary, ValidationReport};
use crate::error::{PreflightError, Result};
use crate::platform::handles::describe_handle_type;
use crate::Verdict;
#[cfg(feature = "json")]
use serde::Serialize;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation report into a string
    fn format(&self, report: &ValidationReport) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.colorize(text, "32")
    }

    fn red(&self, text: &str) -> String {
        self.colorize(text, "31")
    }

    fn gray(&self, text: &str) -> String {
        self.colorize(text, "90")
    }

    fn format_instance(&self, output: &mut String, instance: &InstanceReport) {
        let outcome = match instance.outcome {
            InstanceOutcome::Excluded => "excluded".to_string(),
            InstanceOutcome::Pass => "pass".to_string(),
            InstanceOutcome::Fail(violation) => format!("fail - {}", violation),
        };
        output.push_str(&format!(
            "         {} {} ({}): {}\n",
            instance.scope, instance.index, instance.label, outcome
        ));

        for entry in &instance.entries {
            let values = if entry.supported() {
                entry
                    .handle_types
                    .iter()
                    .map(|c| describe_handle_type(*c))
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                "not supported".to_string()
            };
            output.push_str(&format!("           {}: {}\n", entry.name, values));
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        // Header
        output.push_str(RULE);
        output.push('\n');
        output.push_str("interop-preflight validation report\n");
        output.push_str(&format!("Backend: {}\n", report.backend));
        output.push_str(&format!(
            "Timestamp: {}\n",
            report.timestamp.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        output.push_str(RULE);
        output.push_str("\n\n");

        for suite in &report.suites {
            // Skip passing suites in quiet mode
            if self.quiet && !suite.verdict.is_fail() {
                continue;
            }

            let (status, message) = match &suite.verdict {
                Verdict::Pass { message } => (self.green("[PASS]"), message),
                Verdict::Fail { message } => (self.red("[FAIL]"), message),
                Verdict::Skipped { reason } => (self.gray("[SKIP]"), reason),
            };

            let message = if self.verbose {
                format!("{} ({}ms)", message, suite.duration_ms)
            } else {
                message.clone()
            };
            output.push_str(&format!("  {} {}: {}\n", status, suite.suite, message));

            if self.verbose {
                for instance in &suite.instances {
                    self.format_instance(&mut output, instance);
                }
            }
        }

        // Summary
        let summary = report.summary();
        output.push('\n');
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} passed, {} failed, {} skipped\n",
            summary.passed, summary.failed, summary.skipped
        ));
        output.push_str(&format!(
            "Total time: {:.1}s\n",
            report.total_duration_ms as f64 / 1000.0
        ));

        let exit_desc = match report.exit_code() {
            1 => "failures detected",
            2 => "suites skipped",
            _ => "all suites passed",
        };
        output.push_str(&format!("Exit code: {} ({})\n", report.exit_code(), exit_desc));
        output.push_str(RULE);

        output
    }
}

/// JSON formatter
#[cfg(feature = "json")]
pub struct JsonFormatter {
    pretty: bool,
}

#[cfg(feature = "json")]
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ValidationReport,
    summary: ResultSummary,
}

#[cfg(feature = "json")]
impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

#[cfg(feature = "json")]
impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let document = JsonReport {
            report,
            summary: report.summary(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        // Every field is a plain string, number, or enum, so this cannot fail.
        rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

/// JUnit XML formatter
#[cfg(feature = "junit")]
pub struct JunitFormatter;

#[cfg(feature = "junit")]
impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }

    fn system_out(report: &ValidationReport, index: usize) -> String {
        let mut lines = Vec::new();
        for instance in &report.suites[index].instances {
            lines.push(format!("{} {} ({})", instance.scope, instance.index, instance.label));
            for entry in &instance.entries {
                let codes: Vec<_> = entry.handle_types.iter().map(|c| format!("{:x}", c)).collect();
                lines.push(format!("  {}: [{}]", entry.name, codes.join(", ")));
            }
        }
        lines.join("\n")
    }
}

#[cfg(feature = "junit")]
impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "junit")]
impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let summary: ResultSummary = report.summary();
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        output.push_str(&format!(
            "<testsuites name=\"interop-preflight\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
            summary.total,
            summary.failed,
            summary.skipped,
            report.total_duration_ms as f64 / 1000.0
        ));
        output.push_str(&format!(
            "  <testsuite name=\"interop\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
            summary.total,
            summary.failed,
            summary.skipped,
            summary.total_duration_ms as f64 / 1000.0
        ));

        for (index, suite) in report.suites.iter().enumerate() {
            output.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"interop-preflight.{}\" time=\"{:.3}\">\n",
                suite.suite,
                suite.suite,
                suite.duration_ms as f64 / 1000.0
            ));

            match &suite.verdict {
                Verdict::Pass { .. } => {}
                Verdict::Fail { message } => {
                    output.push_str(&format!(
                        "      <failure message=\"{}\"/>\n",
                        Self::escape_xml(message)
                    ));
                }
                Verdict::Skipped { reason } => {
                    output.push_str(&format!(
                        "      <skipped message=\"{}\"/>\n",
                        Self::escape_xml(reason)
                    ));
                }
            }

            let diagnostics = Self::system_out(report, index);
            if !diagnostics.is_empty() {
                output.push_str(&format!(
                    "      <system-out>{}</system-out>\n",
                    Self::escape_xml(&diagnostics)
                ));
            }
            output.push_str("    </testcase>\n");
        }

        output.push_str("  </testsuite>\n");
        output.push_str("</testsuites>");
        output
    }
}

/// Get the formatter for the selected output format
pub fn get_formatter(
    format: OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Result<Box<dyn OutputFormatter>> {
    match format {
        OutputFormat::Text => Ok(Box::new(TerminalFormatter::new(!no_color, verbose, quiet))),
        #[cfg(feature = "json")]
        OutputFormat::Json => Ok(Box::new(JsonFormatter::new(true))),
        #[cfg(feature = "junit")]
        OutputFormat::Junit => Ok(Box::new(JunitFormatter::new())),
        #[allow(unreachable_patterns)]
        other => Err(PreflightError::UnsupportedFormat(format!("{:?}", other).to_lowercase())),
    }
}

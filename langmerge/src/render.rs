//! Rendering the merged output file and the diagnostic report.

use crate::merge::{MergeErrors, TranslationMap};
use crate::region::{self, HandlerChain};
use crate::template;

/// Renders the success map into the final output text.
///
/// Every entry renders through `entry_template` (bindings `{{key}}` and
/// `{{value}}`) in insertion order; the concatenation is threaded through
/// the handler chain's render-output phase, then wrapped once by
/// `file_template` (binding `{{txt}}`) when one is configured.
pub fn render_output(
    success: &TranslationMap,
    entry_template: &str,
    file_template: Option<&str>,
    chain: &mut HandlerChain,
) -> String {
    let mut txt = String::new();
    for (key, value) in success {
        txt.push_str(&template::render(entry_template, &[
            ("key", key.as_str()),
            ("value", value.as_str()),
        ]));
    }

    let txt = region::apply_output_chain(chain, txt);

    match file_template {
        Some(wrapper) => template::render(wrapper, &[("txt", &txt)]),
        None => txt,
    }
}

/// One report category: the bare entry text and the labeled section around it.
///
/// The bare body is what the warn filter tests for emptiness; the labeled
/// section is what gets written and printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub body: String,
    pub text: String,
}

impl ReportSection {
    fn new(label: &str, body: String) -> Self {
        let text = format!("#{label}:\n{body}\n");
        Self { body, text }
    }
}

/// The rendered diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub not_found: ReportSection,
    pub duplicate: ReportSection,
    pub not_use: ReportSection,
    /// All three sections concatenated, after the handler chain's
    /// render-error phase.
    pub combined: String,
}

/// Renders the three error categories into a [`Report`].
///
/// `not_found` entries use the same per-entry template as the output file
/// (key and raw template value). `duplicate` renders `'<key>': <count>`
/// lines for reference counts above 1 only. `not_use` renders one line per
/// recorded input line.
pub fn render_report(
    errors: &MergeErrors,
    entry_template: &str,
    chain: &mut HandlerChain,
) -> Report {
    let mut not_found = String::new();
    for (key, raw_value) in &errors.not_found {
        not_found.push_str(&template::render(entry_template, &[
            ("key", key.as_str()),
            ("value", raw_value.as_str()),
        ]));
    }

    let mut duplicate = String::new();
    for (key, count) in &errors.duplicate {
        if *count > 1 {
            duplicate.push_str(&format!("'{key}': {count}\n"));
        }
    }

    let mut not_use = String::new();
    for line in &errors.not_use {
        not_use.push_str(line);
        not_use.push('\n');
    }

    let not_found = ReportSection::new("NOT_FOUND", not_found);
    let duplicate = ReportSection::new("DUPLICATE", duplicate);
    let not_use = ReportSection::new("NOT_USE", not_use);

    let combined = region::apply_error_chain(
        chain,
        format!("{}{}{}", not_found.text, duplicate.text, not_use.text),
    );

    Report {
        not_found,
        duplicate,
        not_use,
        combined,
    }
}

/// Builds the console warning for the configured categories.
///
/// Concatenates the labeled sections of the named categories whose bare body
/// is non-empty; unknown category names are skipped. Returns `None` when
/// nothing accumulated, meaning no warning should be printed.
pub fn warn_text(report: &Report, categories: &[String]) -> Option<String> {
    let mut out = String::new();
    for category in categories {
        let section = match category.as_str() {
            "not_found" => &report.not_found,
            "duplicate" => &report.duplicate,
            "not_use" => &report.not_use,
            _ => continue,
        };
        if !section.body.is_empty() {
            out.push_str(&section.text);
        }
    }
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;

    use super::*;
    use crate::region::{HandlerRegistry, RegionScanner};

    fn success() -> TranslationMap {
        IndexMap::from([
            ("TITLE".to_string(), "Hello".to_string()),
            ("BODY".to_string(), "World".to_string()),
        ])
    }

    fn errors() -> MergeErrors {
        MergeErrors {
            not_found: IndexMap::from([("MISSING".to_string(), "fallback".to_string())]),
            duplicate: IndexMap::from([
                ("TITLE".to_string(), 1usize),
                ("MISSING".to_string(), 3usize),
            ]),
            not_use: vec!["stray line".to_string()],
        }
    }

    #[test]
    fn test_render_output_entry_order_and_wrapper() {
        let out = render_output(
            &success(),
            "'{{key}}': '{{value}}',\n",
            Some("module.exports = {\n{{txt}}};\n"),
            &mut Vec::new(),
        );
        assert_eq!(
            out,
            "module.exports = {\n'TITLE': 'Hello',\n'BODY': 'World',\n};\n"
        );
    }

    #[test]
    fn test_render_output_without_wrapper() {
        let out = render_output(&success(), "{{key}}={{value}}\n", None, &mut Vec::new());
        assert_eq!(out, "TITLE=Hello\nBODY=World\n");
    }

    #[test]
    fn test_handler_chain_runs_before_wrapper() {
        let mut scanner = RegionScanner::new(Arc::new(HandlerRegistry::with_builtins()));
        scanner.feed("lang.start: [use without validate]");
        scanner.feed("extra();");
        scanner.feed("lang.end: [use without validate]");
        let mut chain = scanner.finish();

        let out = render_output(
            &success(),
            "{{key}};",
            Some("[{{txt}}]"),
            &mut chain,
        );
        // Raw block lines are appended to the entries, then the wrapper
        // encloses the whole thing.
        assert_eq!(
            out,
            "[TITLE;BODY;lang.start: [use without validate]\nextra();\nlang.end: [use without validate]\n]"
        );
    }

    #[test]
    fn test_report_sections() {
        let report = render_report(&errors(), "{{key}}={{value}}\n", &mut Vec::new());
        assert_eq!(report.not_found.text, "#NOT_FOUND:\nMISSING=fallback\n\n");
        // Count of 1 is filtered; only counts above 1 appear.
        assert_eq!(report.duplicate.text, "#DUPLICATE:\n'MISSING': 3\n\n");
        assert_eq!(report.not_use.text, "#NOT_USE:\nstray line\n\n");
        assert_eq!(
            report.combined,
            format!(
                "{}{}{}",
                report.not_found.text, report.duplicate.text, report.not_use.text
            )
        );
    }

    #[test]
    fn test_report_empty_categories() {
        let report = render_report(&MergeErrors::default(), "{{key}}\n", &mut Vec::new());
        assert_eq!(report.not_found.body, "");
        assert_eq!(report.not_found.text, "#NOT_FOUND:\n\n");
    }

    #[test]
    fn test_warn_filter_skips_empty_and_unknown_categories() {
        let report = render_report(&errors(), "{{key}}={{value}}\n", &mut Vec::new());
        let warn = warn_text(&report, &[
            "not_found".to_string(),
            "bogus".to_string(),
            "duplicate".to_string(),
        ])
        .unwrap();
        assert!(warn.contains("#NOT_FOUND:"));
        assert!(warn.contains("#DUPLICATE:"));
        assert!(!warn.contains("#NOT_USE:"));
    }

    #[test]
    fn test_warn_filter_none_when_all_clean() {
        let report = render_report(&MergeErrors::default(), "{{key}}\n", &mut Vec::new());
        assert_eq!(
            warn_text(&report, &["not_found".to_string(), "duplicate".to_string()]),
            None
        );
    }
}

//! End-to-end pipeline tests: parse real files, combine, merge, render.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indoc::indoc;
use langmerge::{
    HandlerRegistry, RegionScanner, combine, merge_file, parse_lang_file, parse_lang_reader,
    render_output, render_report, warn_text,
};
use regex::Regex;
use tempfile::TempDir;

const LANG_PATTERN: &str = r"^(\w+)=(.*)$";
const MAIN_PATTERN: &str = r#"use\("(\w+)", "(.*)"\)"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

struct Fixture {
    _dir: TempDir,
    registry: Arc<HandlerRegistry>,
    lang_files: Vec<std::path::PathBuf>,
    main_file: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let base = write(
        dir.path(),
        "base.txt",
        indoc! {"
            TITLE=Base Title
            BODY=Base Body
        "},
    );
    let zh = write(
        dir.path(),
        "zh.txt",
        indoc! {"
            TITLE=你好
            // lang.start: [use without validate]
            SECRET=never parsed
            // lang.end: [use without validate]
        "},
    );
    let main_file = write(
        dir.path(),
        "main.tpl",
        indoc! {r#"
            use("TITLE", "Default Title")
            use("BODY", "Default Body")
            use("FOOTER", "Default Footer")
            use("FOOTER", "Default Footer")
            stray line
        "#},
    );
    Fixture {
        _dir: dir,
        registry: Arc::new(HandlerRegistry::with_builtins()),
        lang_files: vec![base, zh],
        main_file,
    }
}

#[test]
fn merges_language_files_with_last_file_override() {
    let fixture = fixture();
    let pattern = Regex::new(LANG_PATTERN).unwrap();

    let mut maps = Vec::new();
    let mut chain = Vec::new();
    for file in &fixture.lang_files {
        let mut scanner = RegionScanner::new(Arc::clone(&fixture.registry));
        maps.push(parse_lang_file(file, &pattern, &mut scanner).unwrap());
        chain.extend(scanner.finish());
    }
    let combined = combine(maps);

    // zh.txt overrides TITLE, base.txt still provides BODY, the region
    // never contributes SECRET.
    assert_eq!(combined["TITLE"], "你好");
    assert_eq!(combined["BODY"], "Base Body");
    assert!(!combined.contains_key("SECRET"));
    assert_eq!(chain.len(), 1);

    let main_pattern = Regex::new(MAIN_PATTERN).unwrap();
    let result = merge_file(&fixture.main_file, &main_pattern, &combined, false).unwrap();

    assert_eq!(result.success["TITLE"], "你好");
    assert_eq!(result.success["BODY"], "Base Body");
    assert!(!result.success.contains_key("FOOTER"));
    assert_eq!(result.errors.not_found["FOOTER"], "Default Footer");
    assert_eq!(result.errors.duplicate["FOOTER"], 2);
    assert_eq!(result.errors.not_use, vec!["stray line"]);
}

#[test]
fn rendered_output_carries_entries_and_region_block() {
    let fixture = fixture();
    let pattern = Regex::new(LANG_PATTERN).unwrap();

    let mut maps = Vec::new();
    let mut chain = Vec::new();
    for file in &fixture.lang_files {
        let mut scanner = RegionScanner::new(Arc::clone(&fixture.registry));
        maps.push(parse_lang_file(file, &pattern, &mut scanner).unwrap());
        chain.extend(scanner.finish());
    }
    let combined = combine(maps);
    let main_pattern = Regex::new(MAIN_PATTERN).unwrap();
    let result = merge_file(&fixture.main_file, &main_pattern, &combined, true).unwrap();

    let out = render_output(
        &result.success,
        "    '{{key}}': '{{value}}',\n",
        Some("module.exports = {\n{{txt}}};\n"),
        &mut chain,
    );

    assert!(out.starts_with("module.exports = {\n"));
    assert!(out.contains("    'TITLE': '你好',\n"));
    // use_not_found resolved FOOTER to its raw template value.
    assert!(out.contains("    'FOOTER': 'Default Footer',\n"));
    // The raw block from zh.txt rides along, markers included.
    assert!(out.contains("SECRET=never parsed"));
    assert!(out.contains("// lang.start: [use without validate]"));
    assert!(out.ends_with("};\n"));

    let report = render_report(&result.errors, "{{key}}={{value}}\n", &mut chain);
    assert!(report.combined.contains("#NOT_FOUND:\nFOOTER=Default Footer\n"));
    assert!(report.combined.contains("#DUPLICATE:\n'FOOTER': 2\n"));
    assert!(report.combined.contains("#NOT_USE:\nstray line\n"));

    let warn = warn_text(&report, &["not_found".to_string()]).unwrap();
    assert!(warn.contains("FOOTER"));
    assert!(!warn.contains("#NOT_USE:"));
}

#[test]
fn identity_template_round_trips_the_success_map() {
    let fixture = fixture();
    let pattern = Regex::new(LANG_PATTERN).unwrap();

    let mut maps = Vec::new();
    for file in &fixture.lang_files {
        let mut scanner = RegionScanner::new(Arc::clone(&fixture.registry));
        maps.push(parse_lang_file(file, &pattern, &mut scanner).unwrap());
    }
    let combined = combine(maps);
    let main_pattern = Regex::new(MAIN_PATTERN).unwrap();
    let result = merge_file(&fixture.main_file, &main_pattern, &combined, false).unwrap();

    let rendered = render_output(&result.success, "{{key}}={{value}}\n", None, &mut Vec::new());

    let mut scanner = RegionScanner::new(Arc::clone(&fixture.registry));
    let reparsed = parse_lang_reader(rendered.as_bytes(), &pattern, &mut scanner).unwrap();
    assert_eq!(reparsed, result.success);
}

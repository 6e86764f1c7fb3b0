//! Runs one merge job: parse, combine, merge, write output and report.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, Local, Timelike};
use colored::Colorize;
use langmerge::{
    Config, Error, HandlerChain, HandlerRegistry, RegionScanner, Report, TranslationMap, combine,
    merge_file, parse_lang_file, render_output, render_report, template, warn_text,
};
use rayon::prelude::*;
use regex::Regex;

/// Executes the job described by `config_path` from start to finish.
///
/// Language files parse in parallel, each with its own scanner and map; the
/// completed handler chains join in config order, matching the order regions
/// were encountered. Merge diagnostics never fail the job — only I/O does.
pub fn run_job<P: AsRef<Path>>(config_path: P) -> Result<(), Error> {
    let config = Config::load(config_path)?;
    let registry = Arc::new(HandlerRegistry::with_builtins());

    let parses = config
        .langs
        .par_iter()
        .map(|lang| -> Result<(TranslationMap, HandlerChain), Error> {
            let pattern = Regex::new(&lang.pattern)?;
            let mut scanner = RegionScanner::new(Arc::clone(&registry));
            let map = parse_lang_file(&lang.file, &pattern, &mut scanner)?;
            Ok((map, scanner.finish()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut maps = Vec::with_capacity(parses.len());
    let mut chain: HandlerChain = Vec::new();
    for (map, handlers) in parses {
        maps.push(map);
        chain.extend(handlers);
    }
    let combined = combine(maps);

    let main_pattern = Regex::new(&config.main.pattern)?;
    let result = merge_file(
        &config.main.file,
        &main_pattern,
        &combined,
        config.use_not_found,
    )?;

    let output_text = render_output(
        &result.success,
        &config.output.template,
        config.output.content.as_deref(),
        &mut chain,
    );
    fs::create_dir_all(&config.output.dir)?;
    let output_path = config.output.dir.join(&config.output.file);
    fs::write(&output_path, &output_text)?;
    println!("created {}", output_path.display());

    let report = render_report(&result.errors, &config.output.template, &mut chain);
    let warn = config.warn_categories();

    match (&config.report.dir, &config.report.file) {
        (Some(dir_template), Some(file)) => {
            let dir = report_dir(dir_template, config.report.disable_version);
            fs::create_dir_all(&dir)?;
            let report_path = dir.join(file);
            fs::write(&report_path, &report.combined)?;
            println!("created {}", report_path.display());
            emit_warning(&report, &warn, &report_path);
        }
        _ if !warn.is_empty() => emit_warning(&report, &warn, &output_path),
        _ => {}
    }

    Ok(())
}

/// Renders the report directory template and, unless versioning is
/// disabled, probes for a free `(1)`, `(2)`, … suffix so earlier reports
/// are never overwritten.
fn report_dir(template_str: &str, disable_version: bool) -> PathBuf {
    let now = Local::now();
    // No zero padding, month is 1-based.
    let time = format!(
        "{}{}{}{}{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute()
    );
    let base = template::render(template_str, &[("time", time.as_str())]);

    if disable_version {
        return PathBuf::from(base);
    }

    let mut dir = PathBuf::from(&base);
    let mut version = 0u32;
    while dir.exists() {
        version += 1;
        dir = PathBuf::from(format!("{base}({version})"));
    }
    dir
}

fn emit_warning(report: &Report, warn: &[String], path: &Path) {
    if let Some(text) = warn_text(report, warn) {
        eprintln!("{} {}\n{}", "warn:".red().bold(), path.display(), text);
    }
}

#![forbid(unsafe_code)]
//! Line-oriented merge engine for per-language translation files.
//!
//! Merges any number of per-language key/value files into a single
//! target-language source file, substituting translation keys referenced in a
//! "main" template file with the corresponding localized value. Alongside the
//! merged output it produces a diagnostic report classifying unresolved keys,
//! duplicated key references, and unmatched lines.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use langmerge::{HandlerRegistry, RegionScanner, combine, merge_file, parse_lang_file};
//! use regex::Regex;
//!
//! let registry = Arc::new(HandlerRegistry::with_builtins());
//! let pattern = Regex::new(r"^(\w+)=(.*)$")?;
//! let mut scanner = RegionScanner::new(Arc::clone(&registry));
//! let map = parse_lang_file("lang/zh.txt", &pattern, &mut scanner)?;
//!
//! let combined = combine([map]);
//! let main_pattern = Regex::new(r#"use\("(\w+)", "(.*)"\)"#)?;
//! let result = merge_file("src/main.tpl", &main_pattern, &combined, false)?;
//! println!("{} keys resolved", result.success.len());
//! # Ok::<(), langmerge::Error>(())
//! ```
//!
//! # Pipeline
//!
//! - **Parsing**: each language file is read line by line; lines inside a
//!   bracketed region (`lang.start: [name]` … `lang.end: [name]`) are routed
//!   to a registered [`RegionHandler`](region::RegionHandler), everything else
//!   is matched against the per-file key/value pattern.
//! - **Merging**: parsed maps combine left to right (last file wins), then
//!   the main file is scanned to build the success map and the three error
//!   categories (`not_found`, `duplicate`, `not_use`).
//! - **Rendering**: the success map and the report are rendered through a
//!   constrained `{{placeholder}}` template and post-processed by every
//!   region handler that fired during parsing, in encounter order.

pub mod config;
pub mod error;
pub mod merge;
pub mod parser;
pub mod region;
pub mod render;
pub mod template;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, LangSpec, MainSpec, OutputSpec, ReportSpec},
    error::Error,
    merge::{MergeErrors, MergeResult, TranslationMap, combine, merge_file, merge_reader},
    parser::{parse_lang_file, parse_lang_reader},
    region::{HandlerChain, HandlerRegistry, RegionEvent, RegionHandler, RegionScanner},
    render::{Report, ReportSection, render_output, render_report, warn_text},
};

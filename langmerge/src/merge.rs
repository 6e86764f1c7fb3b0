//! Combining parsed maps and scanning the main template file.
//!
//! The merge has two steps: [`combine`] folds the per-file maps into one
//! (later files override earlier ones, a designed fallback chain rather than
//! an error), then [`merge_file`] scans the main file and classifies every
//! key reference into the success map or one of the three error categories.

use std::io::BufRead;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::Error;
use crate::parser::read_decoded;

/// Insertion-ordered key→value mapping, one per parsed language file.
pub type TranslationMap = IndexMap<String, String>;

/// The three error categories built while scanning the main file.
///
/// None of these is fatal; they are report data.
#[derive(Debug, Default)]
pub struct MergeErrors {
    /// Keys referenced in the main file but absent from every language file,
    /// mapped to the raw template value carried on the reference.
    pub not_found: IndexMap<String, String>,

    /// Total reference count per key, in first-seen order. Every referenced
    /// key is present with a count of at least 1; only counts above 1 are
    /// surfaced in the report. This is a reference count, not a dedup set:
    /// repeated references all resolve to the same combined-map value.
    pub duplicate: IndexMap<String, usize>,

    /// Non-empty main-file lines that matched neither the key pattern nor a
    /// region boundary, verbatim.
    pub not_use: Vec<String>,
}

/// Result of one merge run, immutable once the main file is fully scanned.
#[derive(Debug, Default)]
pub struct MergeResult {
    /// Resolved key→value entries destined for the output file, in
    /// first-reference order. Values are quote-escaped.
    pub success: TranslationMap,
    pub errors: MergeErrors,
}

/// Folds per-file maps into one combined map, in list order.
///
/// On key collision the later map wins and the key keeps its original
/// position. No warning is emitted: the file list is a fallback chain.
pub fn combine<I>(maps: I) -> TranslationMap
where
    I: IntoIterator<Item = TranslationMap>,
{
    let mut combined = TranslationMap::new();
    for map in maps {
        combined.extend(map);
    }
    combined
}

/// Prefixes every unescaped `"` or `'` with a backslash.
///
/// A quote immediately preceded by a backslash counts as already escaped and
/// is left alone, so escaping never doubles up.
pub fn escape_quotes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev = None;
    for c in value.chars() {
        if (c == '"' || c == '\'') && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Scans the main file against the combined map. A missing main file yields
/// an empty [`MergeResult`].
pub fn merge_file<P: AsRef<Path>>(
    path: P,
    key_pattern: &Regex,
    combined: &TranslationMap,
    use_not_found: bool,
) -> Result<MergeResult, Error> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(MergeResult::default());
    }
    let decoded = read_decoded(path)?;
    merge_reader(decoded.as_bytes(), key_pattern, combined, use_not_found)
}

/// Scans main-file content from any reader.
///
/// `key_pattern` must capture `(key, raw_value)`. Per matching line:
/// - key present in `combined`: the escaped value lands in `success`;
/// - key absent: the raw value lands in `not_found`, and also in `success`
///   when `use_not_found` is set;
/// - either way the key's reference count is bumped.
///
/// Non-matching lines are recorded in `not_use` unless exactly empty (no
/// trimming).
pub fn merge_reader<R: BufRead>(
    reader: R,
    key_pattern: &Regex,
    combined: &TranslationMap,
    use_not_found: bool,
) -> Result<MergeResult, Error> {
    let mut result = MergeResult::default();
    for line in reader.lines() {
        let line = line?;
        let Some(caps) = key_pattern.captures(&line) else {
            if !line.is_empty() {
                result.errors.not_use.push(line);
            }
            continue;
        };
        let Some(key) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let raw_value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        match combined.get(key) {
            Some(value) => {
                result
                    .success
                    .insert(key.to_string(), escape_quotes(value));
            }
            None => {
                if use_not_found {
                    result.success.insert(key.to_string(), raw_value.to_string());
                }
                result
                    .errors
                    .not_found
                    .insert(key.to_string(), raw_value.to_string());
            }
        }

        *result.errors.duplicate.entry(key.to_string()).or_insert(0) += 1;
    }
    Ok(result)
}

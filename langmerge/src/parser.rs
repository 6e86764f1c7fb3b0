//! Language-file parsing.
//!
//! A language file is plain line-oriented text. Each line is first offered to
//! the [`RegionScanner`]; lines absorbed by a region never reach the
//! key/value pattern. Remaining lines are matched against the per-file
//! pattern, whose two capture groups yield `(key, value)`.

use std::fs::File;
use std::io::{BufRead, Read};
use std::path::Path;

use regex::Regex;

use crate::error::Error;
use crate::merge::TranslationMap;
use crate::region::RegionScanner;

/// Reads `path` into a UTF-8 string, honoring a BOM if present (language
/// files exported from translation tools are frequently UTF-16).
pub(crate) fn read_decoded(path: &Path) -> Result<String, Error> {
    let file = File::open(path)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

/// Parses a language file into a key→value map.
///
/// A missing file is treated as empty input, not an error: translations for
/// a language frequently arrive file by file, and an absent file simply
/// contributes nothing to the merge.
///
/// Within one file a repeated key overwrites the earlier value.
pub fn parse_lang_file<P: AsRef<Path>>(
    path: P,
    pattern: &Regex,
    scanner: &mut RegionScanner,
) -> Result<TranslationMap, Error> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(TranslationMap::new());
    }
    let decoded = read_decoded(path)?;
    parse_lang_reader(decoded.as_bytes(), pattern, scanner)
}

/// Parses language-file content from any reader. See [`parse_lang_file`].
pub fn parse_lang_reader<R: BufRead>(
    reader: R,
    pattern: &Regex,
    scanner: &mut RegionScanner,
) -> Result<TranslationMap, Error> {
    let mut map = TranslationMap::new();
    for line in reader.lines() {
        let line = line?;
        if scanner.feed(&line) {
            continue;
        }
        if let Some(caps) = pattern.captures(&line) {
            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                map.insert(key.as_str().to_string(), value.as_str().to_string());
            }
        }
    }
    Ok(map)
}

//! Constrained `{{placeholder}}` interpolation.
//!
//! Templates coming from configuration are never evaluated as code; the only
//! thing a template can do is reference one of the variables bound for the
//! current rendering step (`key`/`value` for entry templates, `txt` for the
//! whole-file wrapper, `time` for the report directory).

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();
}

/// Renders `template`, substituting every `{{name}}` placeholder with the
/// matching value from `bindings`.
///
/// Placeholders that do not match any binding are left in the output
/// verbatim, so a typo in a config template is visible in the result rather
/// than silently dropped.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match bindings.iter().find(|(bound, _)| *bound == name) {
                Some((_, value)) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

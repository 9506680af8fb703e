// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statement formatting
//!
//! Numbers, names and whole statements are rendered here so every section
//! writer produces the same spelling for the same value.

use std::fmt;

/// Separator between the fields of a statement
const SEPARATOR: &str = "  ";

/// Magnitudes below this are written in scientific notation
const SCIENTIFIC_BELOW: f64 = 1e-4;

/// Name token substituted for quote-like characters (inch marks)
const INCH: &str = "inch";

/// Format a number the way E2K statements carry it
///
/// Values of magnitude 1e-4 and above are rounded to 8 decimals with
/// trailing zeros dropped (`120`, `0.0002836`). Smaller values use the
/// shortest scientific form (`6.5E-6`). Zero, negative zero and non-finite
/// values are written `0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    if value.abs() < SCIENTIFIC_BELOW {
        return format!("{:E}", value);
    }
    let fixed = format!("{:.8}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Make a name safe to place between double quotes
///
/// Quote marks and their typographic equivalents become `inch`; line
/// breaks and tabs become spaces.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' | '\u{201C}' | '\u{201D}' | '\u{2033}' => out.push_str(INCH),
            '\r' | '\n' | '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// One E2K statement under construction
///
/// ```
/// use e2k_writer::Statement;
///
/// let st = Statement::new("STORY").quoted("Story1").key_number("HEIGHT", 120.0);
/// assert_eq!(st.to_string(), "STORY  \"Story1\"  HEIGHT  120");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    text: String,
}

impl Statement {
    pub fn new(keyword: &str) -> Self {
        Self {
            text: keyword.to_string(),
        }
    }

    /// Quoted string field, sanitized
    pub fn quoted(mut self, value: &str) -> Self {
        self.text.push_str(SEPARATOR);
        self.text.push('"');
        self.text.push_str(&sanitize_name(value));
        self.text.push('"');
        self
    }

    /// Bare word field
    pub fn word(mut self, value: &str) -> Self {
        self.text.push_str(SEPARATOR);
        self.text.push_str(value);
        self
    }

    pub fn number(self, value: f64) -> Self {
        self.word(&format_number(value))
    }

    pub fn count(self, value: usize) -> Self {
        self.word(&value.to_string())
    }

    pub fn key_quoted(self, key: &str, value: &str) -> Self {
        self.word(key).quoted(value)
    }

    pub fn key_number(self, key: &str, value: f64) -> Self {
        self.word(key).number(value)
    }

    pub fn key_word(self, key: &str, value: &str) -> Self {
        self.word(key).word(value)
    }

    /// Add `KEY value` only when a value is present
    pub fn maybe_number(self, key: &str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.key_number(key, value),
            None => self,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

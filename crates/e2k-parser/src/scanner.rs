// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section scanner
//!
//! Splits E2K text into `$ TITLE` delimited sections using memchr line
//! scanning. Blank lines and comment lines are dropped; statements keep
//! their 1-based line number for diagnostics.

use e2k_model::SectionKind;
use memchr::memchr;

/// A statement line with its position in the file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
}

/// Statements found under one section header
#[derive(Clone, Debug, PartialEq)]
pub struct Section<'a> {
    /// `None` for sections this reader does not understand
    pub kind: Option<SectionKind>,
    pub title: &'a str,
    pub lines: Vec<SourceLine<'a>>,
}

/// Iterator over the lines of a text, with line numbers
pub struct LineScanner<'a> {
    content: &'a str,
    pos: usize,
    number: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            pos: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.content.len() {
            return None;
        }
        let rest = &self.content[self.pos..];
        let (line, advance) = match memchr(b'\n', rest.as_bytes()) {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        self.number += 1;
        Some(SourceLine {
            number: self.number,
            text: line.strip_suffix('\r').unwrap_or(line),
        })
    }
}

/// Group statement lines by section
///
/// Statements before the first header land in an untitled section with no
/// kind, as do statements under unrecognized headers.
pub fn scan_sections(content: &str) -> Vec<Section<'_>> {
    let mut sections = vec![Section {
        kind: None,
        title: "",
        lines: Vec::new(),
    }];

    for line in LineScanner::new(content) {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }
        if text.starts_with('$') {
            let title = text.trim_start_matches('$').trim();
            // Any other comment keeps the current section open
            if let Some(kind) = SectionKind::from_header(text) {
                sections.push(Section {
                    kind: Some(kind),
                    title,
                    lines: Vec::new(),
                });
            } else if looks_like_title(title) {
                sections.push(Section {
                    kind: None,
                    title,
                    lines: Vec::new(),
                });
            }
            continue;
        }
        if let Some(current) = sections.last_mut() {
            current.lines.push(SourceLine {
                number: line.number,
                text,
            });
        }
    }

    sections.retain(|s| s.kind.is_some() || !s.lines.is_empty());
    sections
}

/// Section titles are upper case; free comments are not
fn looks_like_title(title: &str) -> bool {
    !title.is_empty()
        && title.chars().any(|c| c.is_ascii_alphabetic())
        && !title.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "$ File C:\\model.e2k saved 2024-01-01\r\n\
                        \r\n\
                        $ STORIES - IN SEQUENCE FROM TOP\r\n\
                        \x20 STORY \"Story1\"  HEIGHT 120\r\n\
                        \x20 STORY \"Base\"  ELEV 0\r\n\
                        \r\n\
                        $ FUNCTIONS\n\
                        \x20 FUNCTION \"UNIFTH\"\n\
                        $ GRIDS\n\
                        \x20 GRIDSYSTEM \"G1\"  TYPE \"CARTESIAN\"  BUBBLESIZE 60\n";

    #[test]
    fn test_line_numbers() {
        let lines: Vec<SourceLine> = LineScanner::new("a\r\nb\n\nc").collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], SourceLine { number: 2, text: "b" });
        assert_eq!(lines[3].text, "c");
    }

    #[test]
    fn test_sections() {
        let sections = scan_sections(TEXT);
        let kinds: Vec<Option<SectionKind>> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![Some(SectionKind::Stories), None, Some(SectionKind::Grids)]
        );
        assert_eq!(sections[0].lines.len(), 2);
        assert_eq!(sections[0].lines[0].number, 4);
        assert_eq!(sections[0].lines[0].text, "STORY \"Story1\"  HEIGHT 120");
        assert_eq!(sections[1].title, "FUNCTIONS");
    }

    #[test]
    fn test_no_sections() {
        assert!(scan_sections("hello\nworld").iter().all(|s| s.kind.is_none()));
        assert!(scan_sections("").is_empty());
    }
}

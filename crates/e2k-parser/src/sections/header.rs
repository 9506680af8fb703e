// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::Record;
use e2k_model::Result;

/// Program information and controls
pub fn import_header(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let metadata = &mut ctx.model.metadata;
    for line in lines {
        match &line.record {
            Record::Program { name, version } => {
                metadata.program = name.clone();
                if let Some(version) = version {
                    metadata.version = version.clone();
                }
            }
            Record::Units(units) => metadata.units = units.clone(),
            // TITLE2 is a continuation; the first title is kept
            Record::Title(title) if metadata.title.is_none() => {
                metadata.title = Some(title.clone());
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_record;
    use crate::ImportConfig;
    use e2k_model::SectionKind;

    #[test]
    fn test_header_fills_metadata() {
        let texts = [
            (SectionKind::ProgramInformation, "PROGRAM  \"ETABS\"  VERSION \"9.7.4\""),
            (SectionKind::Controls, "UNITS  \"KN\"  \"M\"  \"C\""),
            (SectionKind::Controls, "TITLE1  \"Office tower\""),
            (SectionKind::Controls, "TITLE2  \"Scheme B\""),
        ];
        let lines: Vec<ParsedLine> = texts
            .iter()
            .enumerate()
            .map(|(i, (section, text))| ParsedLine {
                section: *section,
                number: i + 1,
                text,
                record: parse_record(*section, text).unwrap(),
            })
            .collect();

        let config = ImportConfig::default();
        let mut ctx = ImportContext::new(&config);
        import_header(&mut ctx, &lines).unwrap();
        let metadata = &ctx.model.metadata;
        assert_eq!(metadata.units.length, "M");
        assert_eq!(metadata.title.as_deref(), Some("Office tower"));
        assert_eq!(metadata.version, "9.7.4");
    }
}

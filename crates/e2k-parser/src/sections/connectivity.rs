// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point coordinates and line/area connectivity records
//!
//! Connectivity records only carry geometry; elements are created from
//! their assignment rows.

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::Record;
use e2k_model::Result;

pub fn import_points(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        let Record::Point(point) = &line.record else {
            continue;
        };
        if !ctx.points.insert(&point.id, point.location) {
            ctx.malformed(line, format!("point '{}' declared twice", point.id));
        }
    }
    Ok(())
}

pub fn import_lines(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        let Record::Line(record) = &line.record else {
            continue;
        };
        if ctx.lines.contains_key(&record.id) {
            ctx.malformed(line, format!("line '{}' declared twice", record.id));
            continue;
        }
        ctx.lines.insert(record.id.clone(), record.clone());
    }
    Ok(())
}

pub fn import_areas(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        let Record::Area(record) = &line.record else {
            continue;
        };
        if ctx.areas.contains_key(&record.id) {
            ctx.malformed(line, format!("area '{}' declared twice", record.id));
            continue;
        }
        ctx.areas.insert(record.id.clone(), record.clone());
    }
    Ok(())
}

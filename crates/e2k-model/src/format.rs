// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K section vocabulary shared by reader and writer

/// A `$ TITLE` delimited section of an E2K file
///
/// Variants are declared in file order; the writer emits sections in this
/// order and the reader imports them in dependency order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    ProgramInformation,
    Controls,
    Stories,
    Grids,
    Diaphragms,
    Materials,
    FrameSections,
    ShellProperties,
    PointCoordinates,
    LineConnectivities,
    AreaConnectivities,
    PointAssigns,
    LineAssigns,
    AreaAssigns,
    LoadPatterns,
    ShellUniformLoadSets,
    LoadCases,
    LoadCombinations,
    EndOfModel,
}

impl SectionKind {
    pub const ALL: [SectionKind; 19] = [
        SectionKind::ProgramInformation,
        SectionKind::Controls,
        SectionKind::Stories,
        SectionKind::Grids,
        SectionKind::Diaphragms,
        SectionKind::Materials,
        SectionKind::FrameSections,
        SectionKind::ShellProperties,
        SectionKind::PointCoordinates,
        SectionKind::LineConnectivities,
        SectionKind::AreaConnectivities,
        SectionKind::PointAssigns,
        SectionKind::LineAssigns,
        SectionKind::AreaAssigns,
        SectionKind::LoadPatterns,
        SectionKind::ShellUniformLoadSets,
        SectionKind::LoadCases,
        SectionKind::LoadCombinations,
        SectionKind::EndOfModel,
    ];

    /// Title written after `$ `
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::ProgramInformation => "PROGRAM INFORMATION",
            SectionKind::Controls => "CONTROLS",
            SectionKind::Stories => "STORIES - IN SEQUENCE FROM TOP",
            SectionKind::Grids => "GRIDS",
            SectionKind::Diaphragms => "DIAPHRAGM NAMES",
            SectionKind::Materials => "MATERIAL PROPERTIES",
            SectionKind::FrameSections => "FRAME SECTIONS",
            SectionKind::ShellProperties => "WALL/SLAB/DECK PROPERTIES",
            SectionKind::PointCoordinates => "POINT COORDINATES",
            SectionKind::LineConnectivities => "LINE CONNECTIVITIES",
            SectionKind::AreaConnectivities => "AREA CONNECTIVITIES",
            SectionKind::PointAssigns => "POINT ASSIGNS",
            SectionKind::LineAssigns => "LINE ASSIGNS",
            SectionKind::AreaAssigns => "AREA ASSIGNS",
            SectionKind::LoadPatterns => "LOAD PATTERNS",
            SectionKind::ShellUniformLoadSets => "SHELL UNIFORM LOAD SETS",
            SectionKind::LoadCases => "LOAD CASES",
            SectionKind::LoadCombinations => "LOAD COMBINATIONS",
            SectionKind::EndOfModel => "END OF MODEL FILE",
        }
    }

    /// Header prefixes recognized on import
    fn prefixes(&self) -> &'static [&'static str] {
        match self {
            SectionKind::ProgramInformation => &["PROGRAM INFORMATION"],
            SectionKind::Controls => &["CONTROLS"],
            SectionKind::Stories => &["STORIES"],
            SectionKind::Grids => &["GRIDS"],
            SectionKind::Diaphragms => &["DIAPHRAGM NAMES"],
            SectionKind::Materials => &["MATERIAL PROPERTIES"],
            SectionKind::FrameSections => &["FRAME SECTIONS"],
            SectionKind::ShellProperties => &["WALL/SLAB/DECK PROPERTIES", "WALL/SLAB PROPERTIES"],
            SectionKind::PointCoordinates => &["POINT COORDINATES"],
            SectionKind::LineConnectivities => &["LINE CONNECTIVITIES"],
            SectionKind::AreaConnectivities => &["AREA CONNECTIVITIES"],
            SectionKind::PointAssigns => &["POINT ASSIGNS"],
            SectionKind::LineAssigns => &["LINE ASSIGNS"],
            SectionKind::AreaAssigns => &["AREA ASSIGNS"],
            SectionKind::LoadPatterns => &["LOAD PATTERNS", "STATIC LOADS"],
            SectionKind::ShellUniformLoadSets => &["SHELL UNIFORM LOAD SETS"],
            SectionKind::LoadCases => &["LOAD CASES"],
            SectionKind::LoadCombinations => &["LOAD COMBINATIONS"],
            SectionKind::EndOfModel => &["END OF MODEL FILE"],
        }
    }

    /// Statement keywords that belong to the section
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SectionKind::ProgramInformation => &["PROGRAM"],
            SectionKind::Controls => &["UNITS", "TITLE1", "TITLE2"],
            SectionKind::Stories => &["STORY"],
            SectionKind::Grids => &["GRIDSYSTEM", "GRID", "GENGRID"],
            SectionKind::Diaphragms => &["DIAPHRAGM"],
            SectionKind::Materials => &["MATERIAL"],
            SectionKind::FrameSections => &["FRAMESECTION"],
            SectionKind::ShellProperties => &["SHELLPROP"],
            SectionKind::PointCoordinates => &["POINT"],
            SectionKind::LineConnectivities => &["LINE"],
            SectionKind::AreaConnectivities => &["AREA"],
            SectionKind::PointAssigns => &["POINTASSIGN"],
            SectionKind::LineAssigns => &["LINEASSIGN"],
            SectionKind::AreaAssigns => &["AREAASSIGN"],
            SectionKind::LoadPatterns => &["LOADPATTERN"],
            SectionKind::ShellUniformLoadSets => &["SHELLUNIFORMLOADSET"],
            SectionKind::LoadCases => &["LOADCASE"],
            SectionKind::LoadCombinations => &["COMBO"],
            SectionKind::EndOfModel => &[],
        }
    }

    /// Match a header comment such as `$ STORIES - IN SEQUENCE FROM TOP`
    ///
    /// Returns `None` for comments that are not a known section title.
    pub fn from_header(line: &str) -> Option<Self> {
        let title = line.trim_start().strip_prefix('$')?.trim().to_uppercase();
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.prefixes().iter().any(|p| title.starts_with(p)))
    }

    pub fn accepts(&self, keyword: &str) -> bool {
        self.keywords()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

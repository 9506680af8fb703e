// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line grammar, one rule per statement keyword
//!
//! Each rule reads the leading positional fields of its statement and then
//! the trailing `KEY value` pairs. A leading field that does not parse makes
//! the whole line malformed; unknown trailing pairs are ignored.

use crate::tokenizer::{tokenize, Token};
use e2k_model::elevation::StoryDeclaration;
use e2k_model::{
    CombinationType, DeckType, DiaphragmType, ElementKind, EndReleases, GridAxis, LoadType,
    MaterialProperty, MaterialType, ModifierField, Point2D, Restraint, SectionKind, Units,
};

/// Reason a line did not match its rule
pub type GrammarError = String;

type Result<T> = std::result::Result<T, GrammarError>;

// ============================================================================
// Statement Cursor
// ============================================================================

/// Tokenized statement with a read position
pub struct Statement<'a> {
    keyword: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Statement<'a> {
    pub fn parse(line: &'a str) -> Result<Self> {
        let tokens = tokenize(line)?;
        let Some(Token::Word(keyword)) = tokens.first().copied() else {
            return Err("statement does not start with a keyword".to_string());
        };
        Ok(Self {
            keyword,
            tokens,
            pos: 1,
        })
    }

    pub fn keyword(&self) -> &'a str {
        self.keyword
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    /// Positional quoted string or bare word
    fn text(&mut self, what: &str) -> Result<&'a str> {
        match self.peek().and_then(|t| t.text()) {
            Some(text) => {
                self.pos += 1;
                Ok(text)
            }
            None => Err(format!("expected {}", what)),
        }
    }

    /// Positional quoted string
    fn quoted(&mut self, what: &str) -> Result<&'a str> {
        match self.peek() {
            Some(Token::Quoted(text)) => {
                self.pos += 1;
                Ok(text)
            }
            _ => Err(format!("expected quoted {}", what)),
        }
    }

    fn number(&mut self, what: &str) -> Result<f64> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            _ => Err(format!("expected number for {}", what)),
        }
    }

    fn optional_number(&mut self) -> Option<f64> {
        let n = self.peek()?.number()?;
        self.pos += 1;
        Some(n)
    }

    /// Remaining tokens as `KEY value` pairs
    fn pairs(&mut self) -> Result<Pairs<'a>> {
        let mut pairs = Vec::new();
        while let Some(key) = self.peek() {
            let Token::Word(key) = key else {
                return Err(format!("unexpected value {:?} where a keyword belongs", key));
            };
            self.pos += 1;
            let value = self
                .peek()
                .ok_or_else(|| format!("missing value for {}", key))?;
            self.pos += 1;
            pairs.push((key, value));
        }
        Ok(Pairs(pairs))
    }
}

/// Trailing `KEY value` pairs of a statement
pub struct Pairs<'a>(Vec<(&'a str, Token<'a>)>);

impl<'a> Pairs<'a> {
    fn get(&self, key: &str) -> Option<Token<'a>> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }

    pub fn text(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(t) => t
                .text()
                .map(Some)
                .ok_or_else(|| format!("{} expects text", key)),
        }
    }

    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(t) => t
                .number()
                .map(Some)
                .ok_or_else(|| format!("{} expects a number", key)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'a str, Token<'a>)> + '_ {
        self.0.iter()
    }
}

fn count(value: f64, what: &str) -> Result<u32> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(format!("{} must be a non-negative integer", what))
    }
}

fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}

/// Bubble flags `(start, end)` from a `BUBBLELOC` value
fn bubble_flags(value: Option<&str>) -> Result<(bool, bool)> {
    match value.map(|v| v.to_uppercase()).as_deref() {
        None | Some("END") => Ok((false, true)),
        Some("START") => Ok((true, false)),
        Some("BOTH") => Ok((true, true)),
        Some("NONE") => Ok((false, false)),
        Some(other) => Err(format!("unknown BUBBLELOC {}", other)),
    }
}

/// Modifier pairs in statement order
fn modifiers(pairs: &Pairs<'_>) -> Result<Vec<(ModifierField, f64)>> {
    let mut found = Vec::new();
    for (key, value) in pairs.iter() {
        if let Some(field) = ModifierField::from_keyword(key) {
            let value = value
                .number()
                .ok_or_else(|| format!("{} expects a number", key))?;
            found.push((field, value));
        }
    }
    Ok(found)
}

// ============================================================================
// Records
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct GridSystemRecord {
    pub name: String,
    pub bubble_size: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridRecord {
    pub system: String,
    pub label: String,
    pub axis: GridAxis,
    pub coordinate: f64,
    pub bubbles: (bool, bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenGridRecord {
    pub system: String,
    pub label: String,
    pub start: Point2D,
    pub end: Point2D,
    pub bubbles: (bool, bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub material_type: Option<MaterialType>,
    pub grade: Option<String>,
    pub properties: Vec<(MaterialProperty, f64)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSectionRecord {
    pub name: String,
    pub material: Option<String>,
    pub shape: Option<String>,
    pub depth: Option<f64>,
    pub width: Option<f64>,
    pub flange_thickness: Option<f64>,
    pub web_thickness: Option<f64>,
    pub modifiers: Vec<(ModifierField, f64)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellPropType {
    Wall,
    Slab,
    Deck,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckFields {
    pub deck_type: DeckType,
    pub concrete_material: Option<String>,
    pub deck_material: Option<String>,
    pub slab_depth: Option<f64>,
    pub rib_depth: Option<f64>,
    pub rib_width_top: Option<f64>,
    pub rib_width_bottom: Option<f64>,
    pub rib_spacing: Option<f64>,
    pub shear_thickness: Option<f64>,
    pub unit_weight: Option<f64>,
    pub stud_diameter: Option<f64>,
    pub stud_height: Option<f64>,
    pub stud_fu: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShellPropRecord {
    pub name: String,
    pub prop_type: ShellPropType,
    pub material: Option<String>,
    pub thickness: Option<f64>,
    pub deck: DeckFields,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
    pub id: String,
    pub location: Point2D,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord {
    pub id: String,
    pub kind: ElementKind,
    pub i: String,
    pub j: String,
    /// Stories between the I and J ends
    pub span: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaRecord {
    pub id: String,
    pub kind: ElementKind,
    pub points: Vec<String>,
    /// Per-vertex story offsets, empty when not given
    pub offsets: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointAssignRecord {
    pub point: String,
    pub story: String,
    pub restraint: Option<Restraint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineAssignRecord {
    pub line: String,
    pub story: String,
    pub section: Option<String>,
    pub angle: f64,
    pub releases: Option<EndReleases>,
    pub design_procedure: Option<String>,
    pub modifiers: Vec<(ModifierField, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaAssignRecord {
    pub area: String,
    pub story: String,
    pub section: Option<String>,
    pub diaphragm: Option<String>,
    pub load_set: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadPatternRecord {
    pub name: String,
    pub load_type: LoadType,
    pub self_weight: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShellLoadSetRecord {
    pub name: String,
    pub pattern: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadCaseRecord {
    pub name: String,
    pub case_type: Option<String>,
    /// `LOADPAT` term with its scale factor
    pub pattern: Option<(String, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComboRecord {
    pub name: String,
    pub combination_type: Option<CombinationType>,
    /// `LOADCASE` term with its scale factor
    pub term: Option<(String, f64)>,
}

/// A parsed statement
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Program { name: String, version: Option<String> },
    Units(Units),
    Title(String),
    Story(StoryDeclaration),
    GridSystem(GridSystemRecord),
    Grid(GridRecord),
    GenGrid(GenGridRecord),
    Diaphragm { name: String, diaphragm_type: DiaphragmType },
    Material(MaterialRecord),
    FrameSection(FrameSectionRecord),
    ShellProp(ShellPropRecord),
    Point(PointRecord),
    Line(LineRecord),
    Area(AreaRecord),
    PointAssign(PointAssignRecord),
    LineAssign(LineAssignRecord),
    AreaAssign(AreaAssignRecord),
    LoadPattern(LoadPatternRecord),
    ShellLoadSet(ShellLoadSetRecord),
    LoadCase(LoadCaseRecord),
    Combo(ComboRecord),
}

// ============================================================================
// Rules
// ============================================================================

/// Parse one statement of a section
pub fn parse_record(section: SectionKind, line: &str) -> Result<Record> {
    let mut st = Statement::parse(line)?;
    let keyword = st.keyword().to_uppercase();
    if !section.accepts(&keyword) {
        return Err(format!(
            "{} does not belong in {}",
            keyword,
            section.title()
        ));
    }
    match keyword.as_str() {
        "PROGRAM" => program(&mut st),
        "UNITS" => units(&mut st),
        "TITLE1" | "TITLE2" => Ok(Record::Title(st.text("title")?.to_string())),
        "STORY" => story(&mut st),
        "GRIDSYSTEM" => grid_system(&mut st),
        "GRID" => grid(&mut st),
        "GENGRID" => gen_grid(&mut st),
        "DIAPHRAGM" => diaphragm(&mut st),
        "MATERIAL" => material(&mut st),
        "FRAMESECTION" => frame_section(&mut st),
        "SHELLPROP" => shell_prop(&mut st),
        "POINT" => point(&mut st),
        "LINE" => line_record(&mut st),
        "AREA" => area_record(&mut st),
        "POINTASSIGN" => point_assign(&mut st),
        "LINEASSIGN" => line_assign(&mut st),
        "AREAASSIGN" => area_assign(&mut st),
        "LOADPATTERN" => load_pattern(&mut st),
        "SHELLUNIFORMLOADSET" => shell_load_set(&mut st),
        "LOADCASE" => load_case(&mut st),
        "COMBO" => combo(&mut st),
        other => Err(format!("unsupported statement {}", other)),
    }
}

fn program(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("program name")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::Program {
        name,
        version: pairs.text("VERSION")?.map(str::to_string),
    })
}

fn units(st: &mut Statement<'_>) -> Result<Record> {
    let force = st.text("force unit")?.to_string();
    let length = st.text("length unit")?.to_string();
    let temperature = st.text("temperature unit")?.to_string();
    Ok(Record::Units(Units {
        force,
        length,
        temperature,
    }))
}

fn story(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("story name")?.to_string();
    let pairs = st.pairs()?;
    let height = pairs.number("HEIGHT")?;
    let elevation = pairs.number("ELEV")?;
    if height.is_none() && elevation.is_none() {
        return Err("STORY needs HEIGHT or ELEV".to_string());
    }
    Ok(Record::Story(StoryDeclaration {
        name,
        height,
        elevation,
        master: is_yes(pairs.text("MASTERSTORY")?),
        similar_to: pairs.text("SIMILARTO")?.map(str::to_string),
    }))
}

fn grid_system(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("grid system name")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::GridSystem(GridSystemRecord {
        name,
        bubble_size: pairs.number("BUBBLESIZE")?,
    }))
}

fn grid(st: &mut Statement<'_>) -> Result<Record> {
    let system = st.text("grid system")?.to_string();
    let pairs = st.pairs()?;
    let label = pairs.text("LABEL")?.ok_or("missing LABEL")?.to_string();
    let dir = pairs.text("DIR")?.ok_or("missing DIR")?;
    let axis = GridAxis::parse(dir).ok_or_else(|| format!("unknown DIR {}", dir))?;
    let coordinate = pairs.number("COORD")?.ok_or("missing COORD")?;
    Ok(Record::Grid(GridRecord {
        system,
        label,
        axis,
        coordinate,
        bubbles: bubble_flags(pairs.text("BUBBLELOC")?)?,
    }))
}

fn gen_grid(st: &mut Statement<'_>) -> Result<Record> {
    let system = st.text("grid system")?.to_string();
    let pairs = st.pairs()?;
    let label = pairs.text("LABEL")?.ok_or("missing LABEL")?.to_string();
    let coord = |key: &str| -> Result<f64> {
        pairs.number(key)?.ok_or_else(|| format!("missing {}", key))
    };
    Ok(Record::GenGrid(GenGridRecord {
        system,
        label,
        start: Point2D::new(coord("X1")?, coord("Y1")?),
        end: Point2D::new(coord("X2")?, coord("Y2")?),
        bubbles: bubble_flags(pairs.text("BUBBLELOC")?)?,
    }))
}

fn diaphragm(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("diaphragm name")?.to_string();
    let pairs = st.pairs()?;
    let diaphragm_type = match pairs.text("TYPE")? {
        None => DiaphragmType::default(),
        Some(t) => DiaphragmType::parse(t).ok_or_else(|| format!("unknown diaphragm TYPE {}", t))?,
    };
    Ok(Record::Diaphragm {
        name,
        diaphragm_type,
    })
}

fn material(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("material name")?.to_string();
    let pairs = st.pairs()?;
    let mut properties = Vec::new();
    for (key, value) in pairs.iter() {
        if let Some(property) = MaterialProperty::from_keyword(key) {
            let value = value
                .number()
                .ok_or_else(|| format!("{} expects a number", key))?;
            properties.push((property, value));
        }
    }
    Ok(Record::Material(MaterialRecord {
        name,
        material_type: pairs.text("TYPE")?.map(MaterialType::parse),
        grade: pairs.text("GRADE")?.map(str::to_string),
        properties,
    }))
}

fn frame_section(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("section name")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::FrameSection(FrameSectionRecord {
        name,
        material: pairs.text("MATERIAL")?.map(str::to_string),
        shape: pairs.text("SHAPE")?.map(str::to_string),
        depth: pairs.number("D")?,
        width: pairs.number("B")?,
        flange_thickness: pairs.number("TF")?,
        web_thickness: pairs.number("TW")?,
        modifiers: modifiers(&pairs)?,
    }))
}

fn shell_prop(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("property name")?.to_string();
    let pairs = st.pairs()?;
    let prop_type = match pairs.text("PROPTYPE")?.map(|t| t.to_uppercase()).as_deref() {
        Some("WALL") => ShellPropType::Wall,
        Some("SLAB") => ShellPropType::Slab,
        Some("DECK") => ShellPropType::Deck,
        Some(other) => return Err(format!("unknown PROPTYPE {}", other)),
        None => return Err("missing PROPTYPE".to_string()),
    };
    let thickness = match prop_type {
        ShellPropType::Wall => pairs.number("WALLTHICKNESS")?,
        ShellPropType::Slab => pairs.number("SLABTHICKNESS")?,
        ShellPropType::Deck => pairs.number("DECKSLABDEPTH")?,
    };
    let thickness = match thickness {
        Some(t) => Some(t),
        None => pairs.number("THICKNESS")?,
    };
    let deck_type = match pairs.text("DECKTYPE")? {
        None => DeckType::default(),
        Some(t) => DeckType::parse(t).ok_or_else(|| format!("unknown DECKTYPE {}", t))?,
    };
    Ok(Record::ShellProp(ShellPropRecord {
        name,
        prop_type,
        material: pairs.text("MATERIAL")?.map(str::to_string),
        thickness,
        deck: DeckFields {
            deck_type,
            concrete_material: pairs.text("CONCMATERIAL")?.map(str::to_string),
            deck_material: pairs.text("DECKMATERIAL")?.map(str::to_string),
            slab_depth: pairs.number("DECKSLABDEPTH")?,
            rib_depth: pairs.number("DECKRIBDEPTH")?,
            rib_width_top: pairs.number("DECKRIBWIDTHTOP")?,
            rib_width_bottom: pairs.number("DECKRIBWIDTHBOTTOM")?,
            rib_spacing: pairs.number("DECKRIBSPACING")?,
            shear_thickness: pairs.number("DECKSHEARTHICKNESS")?,
            unit_weight: pairs.number("DECKUNITWEIGHT")?,
            stud_diameter: pairs.number("SHEARSTUDDIAM")?,
            stud_height: pairs.number("SHEARSTUDHEIGHT")?,
            stud_fu: pairs.number("SHEARSTUDFU")?,
        },
    }))
}

fn point(st: &mut Statement<'_>) -> Result<Record> {
    let id = st.text("point id")?.to_string();
    let x = st.number("X")?;
    let y = st.number("Y")?;
    Ok(Record::Point(PointRecord {
        id,
        location: Point2D::new(x, y),
    }))
}

fn line_record(st: &mut Statement<'_>) -> Result<Record> {
    let id = st.text("line id")?.to_string();
    let kind = match st.text("line type")?.to_uppercase().as_str() {
        "COLUMN" => ElementKind::Column,
        "BEAM" => ElementKind::Beam,
        "BRACE" => ElementKind::Brace,
        other => return Err(format!("unknown line type {}", other)),
    };
    let i = st.quoted("I-end point")?.to_string();
    let j = st.quoted("J-end point")?.to_string();
    let default_span = if kind == ElementKind::Beam { 0 } else { 1 };
    let span = match st.optional_number() {
        Some(n) => count(n, "story span")?,
        None => default_span,
    };
    Ok(Record::Line(LineRecord {
        id,
        kind,
        i,
        j,
        span,
    }))
}

fn area_record(st: &mut Statement<'_>) -> Result<Record> {
    let id = st.text("area id")?.to_string();
    let kind = match st.text("area type")?.to_uppercase().as_str() {
        "PANEL" | "WALL" => ElementKind::Wall,
        "FLOOR" => ElementKind::Floor,
        other => return Err(format!("unknown area type {}", other)),
    };
    let declared = st
        .optional_number()
        .map(|n| count(n, "vertex count"))
        .transpose()?;

    let mut points = Vec::new();
    while let Some(Token::Quoted(p)) = st.peek() {
        points.push(p.to_string());
        st.pos += 1;
    }
    let mut offsets = Vec::new();
    while let Some(n) = st.optional_number() {
        offsets.push(count(n, "story offset")?);
    }

    if points.len() < 3 {
        return Err(format!("area needs at least 3 points, found {}", points.len()));
    }
    if let Some(n) = declared {
        if n as usize != points.len() {
            return Err(format!("declared {} points, found {}", n, points.len()));
        }
    }
    if !offsets.is_empty() && offsets.len() != points.len() {
        return Err(format!(
            "{} story offsets for {} points",
            offsets.len(),
            points.len()
        ));
    }
    Ok(Record::Area(AreaRecord {
        id,
        kind,
        points,
        offsets,
    }))
}

fn point_assign(st: &mut Statement<'_>) -> Result<Record> {
    let point = st.text("point id")?.to_string();
    let story = st.text("story")?.to_string();
    let pairs = st.pairs()?;
    let restraint = match pairs.text("RESTRAINT")? {
        None => None,
        Some(r) => Some(Restraint::parse(r).ok_or_else(|| format!("unsupported RESTRAINT {}", r))?),
    };
    Ok(Record::PointAssign(PointAssignRecord {
        point,
        story,
        restraint,
    }))
}

fn line_assign(st: &mut Statement<'_>) -> Result<Record> {
    let line = st.text("line id")?.to_string();
    let story = st.text("story")?.to_string();
    let pairs = st.pairs()?;
    let releases = match pairs.text("RELEASE")? {
        None => None,
        Some(r) => Some(EndReleases::parse(r).ok_or_else(|| format!("invalid RELEASE {}", r))?),
    };
    Ok(Record::LineAssign(LineAssignRecord {
        line,
        story,
        section: pairs.text("SECTION")?.map(str::to_string),
        angle: pairs.number("ANG")?.unwrap_or(0.0),
        releases,
        design_procedure: pairs.text("DESIGNPROCTYPE")?.map(str::to_string),
        modifiers: modifiers(&pairs)?,
    }))
}

fn area_assign(st: &mut Statement<'_>) -> Result<Record> {
    let area = st.text("area id")?.to_string();
    let story = st.text("story")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::AreaAssign(AreaAssignRecord {
        area,
        story,
        section: pairs.text("SECTION")?.map(str::to_string),
        diaphragm: pairs.text("DIAPHRAGM")?.map(str::to_string),
        load_set: pairs.text("SHELLUNIFORMLOADSET")?.map(str::to_string),
    }))
}

fn load_pattern(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("load pattern name")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::LoadPattern(LoadPatternRecord {
        name,
        load_type: pairs.text("TYPE")?.map(LoadType::parse).unwrap_or(LoadType::Other),
        self_weight: pairs.number("SELFWEIGHT")?,
    }))
}

fn shell_load_set(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("load set name")?.to_string();
    let pairs = st.pairs()?;
    Ok(Record::ShellLoadSet(ShellLoadSetRecord {
        name,
        pattern: pairs.text("LOADPAT")?.ok_or("missing LOADPAT")?.to_string(),
        value: pairs.number("VALUE")?.ok_or("missing VALUE")?,
    }))
}

fn load_case(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("load case name")?.to_string();
    let pairs = st.pairs()?;
    let pattern = match pairs.text("LOADPAT")? {
        Some(p) => Some((p.to_string(), pairs.number("SF")?.unwrap_or(1.0))),
        None => None,
    };
    Ok(Record::LoadCase(LoadCaseRecord {
        name,
        case_type: pairs.text("TYPE")?.map(str::to_string),
        pattern,
    }))
}

fn combo(st: &mut Statement<'_>) -> Result<Record> {
    let name = st.text("combination name")?.to_string();
    let pairs = st.pairs()?;
    let combination_type = match pairs.text("TYPE")? {
        None => None,
        Some(t) => Some(
            CombinationType::parse(t).ok_or_else(|| format!("unknown combination TYPE {}", t))?,
        ),
    };
    let term = match pairs.text("LOADCASE")? {
        Some(c) => Some((c.to_string(), pairs.number("SF")?.unwrap_or(1.0))),
        None => None,
    };
    Ok(Record::Combo(ComboRecord {
        name,
        combination_type,
        term,
    }))
}

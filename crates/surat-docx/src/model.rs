//! Typed view of `word/document.xml`.
//!
//! # Structure
//!
//! ```xml
//! <w:body>
//!   <w:p>                      <!-- Paragraph -->
//!     <w:pPr>...</w:pPr>       <!-- paragraph properties -->
//!     <w:r><w:t>text</w:t></w:r>
//!   </w:p>
//!   <w:tbl>                    <!-- Table -->
//!     <w:tblPr/><w:tblGrid/>
//!     <w:tr>                   <!-- Row -->
//!       <w:trPr/>
//!       <w:tc>                 <!-- Cell -->
//!         <w:tcPr/>
//!         <w:p>...</w:p>
//!       </w:tc>
//!     </w:tr>
//!   </w:tbl>
//!   <w:sectPr/>                <!-- kept as an opaque node -->
//! </w:body>
//! ```
//!
//! Anything the pipeline does not edit is carried as an opaque [`XmlNode`]
//! and written back unchanged. Tables nested inside cells are opaque.

use crate::xml::{XmlElement, XmlNode};
use surat_core::{CellAlignment, HorizontalAlignment, Result, SuratError, VerticalAlignment};

pub(crate) const W_BODY: &str = "w:body";
pub(crate) const W_P: &str = "w:p";
pub(crate) const W_PPR: &str = "w:pPr";
pub(crate) const W_R: &str = "w:r";
pub(crate) const W_RPR: &str = "w:rPr";
pub(crate) const W_T: &str = "w:t";
pub(crate) const W_TBL: &str = "w:tbl";
pub(crate) const W_TBL_GRID: &str = "w:tblGrid";
pub(crate) const W_TR: &str = "w:tr";
pub(crate) const W_TRPR: &str = "w:trPr";
pub(crate) const W_TC: &str = "w:tc";
pub(crate) const W_TCPR: &str = "w:tcPr";
const W_VAL: &str = "w:val";

/// Child order of `w:pPr` (ECMA-376 `CT_PPr`)
const PPR_ORDER: &[&str] = &[
    "w:pStyle",
    "w:keepNext",
    "w:keepLines",
    "w:pageBreakBefore",
    "w:framePr",
    "w:widowControl",
    "w:numPr",
    "w:suppressLineNumbers",
    "w:pBdr",
    "w:shd",
    "w:tabs",
    "w:suppressAutoHyphens",
    "w:kinsoku",
    "w:wordWrap",
    "w:overflowPunct",
    "w:topLinePunct",
    "w:autoSpaceDE",
    "w:autoSpaceDN",
    "w:bidi",
    "w:adjustRightInd",
    "w:snapToGrid",
    "w:spacing",
    "w:ind",
    "w:contextualSpacing",
    "w:mirrorIndents",
    "w:suppressOverlap",
    "w:jc",
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

/// Child order of `w:tcPr` (`CT_TcPr`)
const TCPR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:tcW",
    "w:gridSpan",
    "w:hMerge",
    "w:vMerge",
    "w:tcBorders",
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
    "w:headers",
    "w:cellIns",
    "w:cellDel",
    "w:cellMerge",
    "w:tcPrChange",
];

/// Child order of `w:trPr` as Word writes it
const TRPR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:divId",
    "w:gridBefore",
    "w:gridAfter",
    "w:wBefore",
    "w:wAfter",
    "w:cantSplit",
    "w:trHeight",
    "w:tblHeader",
    "w:tblCellSpacing",
    "w:jc",
    "w:hidden",
    "w:ins",
    "w:del",
    "w:trPrChange",
];

const fn jc_value(alignment: HorizontalAlignment) -> &'static str {
    match alignment {
        HorizontalAlignment::Left => "left",
        HorizontalAlignment::Center => "center",
        HorizontalAlignment::Right => "right",
    }
}

const fn v_align_value(alignment: VerticalAlignment) -> &'static str {
    match alignment {
        VerticalAlignment::Top => "top",
        VerticalAlignment::Center => "center",
        VerticalAlignment::Bottom => "bottom",
    }
}

/// Turn an on/off property on, dropping any explicit `w:val="0"`
fn switch_on(properties: &mut XmlElement, name: &str, order: &[&str]) {
    properties
        .ensure_child_ordered(name, order)
        .attributes
        .retain(|(k, _)| k != W_VAL);
}

fn is_switched_on(properties: Option<&XmlElement>, name: &str) -> bool {
    properties
        .and_then(|p| p.child(name))
        .is_some_and(|e| !matches!(e.attr(W_VAL), Some("0" | "false" | "off")))
}

/// Split off the first `props_name` child (the properties element) from the rest
fn split_properties(
    children: Vec<XmlNode>,
    props_name: &str,
) -> (Option<XmlElement>, Vec<XmlNode>) {
    let mut properties = None;
    let mut rest = Vec::with_capacity(children.len());
    for node in children {
        match node {
            XmlNode::Element(e) if properties.is_none() && e.name == props_name => {
                properties = Some(e);
            }
            other => rest.push(other),
        }
    }
    (properties, rest)
}

// ========================================================================
// Run
// ========================================================================

/// A run of uniformly formatted text (`w:r`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub attributes: Vec<(String, String)>,
    /// `w:rPr`, kept verbatim
    pub properties: Option<XmlElement>,
    pub content: Vec<XmlNode>,
}

impl Run {
    /// New run without formatting. `\n` becomes `w:br`, `\t` becomes `w:tab`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut run = Self::default();
        run.set_text(text);
        run
    }

    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        let (properties, content) = split_properties(element.children, W_RPR);
        Self {
            attributes: element.attributes,
            properties,
            content,
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_R);
        element.attributes = self.attributes;
        if let Some(props) = self.properties {
            element.children.push(XmlNode::Element(props));
        }
        element.children.extend(self.content);
        element
    }

    /// Visible text: `w:t` text, tabs as `\t`, line breaks as `\n`
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            let XmlNode::Element(e) = node else { continue };
            match e.name.as_str() {
                W_T => out.push_str(&e.text_content()),
                "w:tab" => out.push('\t'),
                "w:cr" => out.push('\n'),
                "w:br" => {
                    if !matches!(e.attr("w:type"), Some("page" | "column")) {
                        out.push('\n');
                    }
                }
                "w:noBreakHyphen" => out.push('-'),
                _ => {}
            }
        }
        out
    }

    /// Replace the run's content with `text`, keeping `w:rPr`
    pub fn set_text(&mut self, text: &str) {
        self.content.clear();
        let mut pending = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\t' | '\n' | '\r' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        continue;
                    }
                    self.flush_text(&mut pending);
                    let name = if c == '\t' { "w:tab" } else { "w:br" };
                    self.content.push(XmlNode::Element(XmlElement::new(name)));
                }
                _ => pending.push(c),
            }
        }
        self.flush_text(&mut pending);
    }

    fn flush_text(&mut self, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let mut t = XmlElement::new(W_T);
        if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
            t.set_attr("xml:space", "preserve");
        }
        t.children.push(XmlNode::Text(std::mem::take(pending)));
        self.content.push(XmlNode::Element(t));
    }
}

// ========================================================================
// Paragraph
// ========================================================================

/// Paragraph child: a run or anything else (bookmarks, hyperlinks, fields)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Run(Run),
    Other(XmlNode),
}

/// A paragraph (`w:p`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub attributes: Vec<(String, String)>,
    /// `w:pPr`
    pub properties: Option<XmlElement>,
    pub content: Vec<Inline>,
}

impl Paragraph {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        let (properties, rest) = split_properties(element.children, W_PPR);
        let content = rest
            .into_iter()
            .map(|node| match node {
                XmlNode::Element(e) if e.name == W_R => Inline::Run(Run::from_element(e)),
                other => Inline::Other(other),
            })
            .collect();
        Self {
            attributes: element.attributes,
            properties,
            content,
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_P);
        element.attributes = self.attributes;
        if let Some(props) = self.properties {
            element.children.push(XmlNode::Element(props));
        }
        element
            .children
            .extend(self.content.into_iter().map(|inline| match inline {
                Inline::Run(run) => XmlNode::Element(run.into_element()),
                Inline::Other(node) => node,
            }));
        element
    }

    /// Direct runs of this paragraph
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run),
            Inline::Other(_) => None,
        })
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.content.iter_mut().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run),
            Inline::Other(_) => None,
        })
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Text of all direct runs, concatenated
    #[must_use]
    pub fn text(&self) -> String {
        self.runs().map(Run::text).collect()
    }

    /// Append a new unformatted run holding `text`
    pub fn push_run(&mut self, text: &str) {
        self.content.push(Inline::Run(Run::new(text)));
    }

    /// Discard every run and append one run holding `text`.
    ///
    /// Character formatting of the old runs is lost; non-run children
    /// (bookmarks, fields) stay where they were.
    pub fn replace_runs(&mut self, text: &str) {
        self.content.retain(|inline| !matches!(inline, Inline::Run(_)));
        self.push_run(text);
    }

    /// `w:pPr`, created if missing
    pub fn properties_mut(&mut self) -> &mut XmlElement {
        self.properties.get_or_insert_with(|| XmlElement::new(W_PPR))
    }

    /// Style id from `w:pStyle`
    #[must_use]
    pub fn style_id(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:pStyle"))
            .and_then(|s| s.attr(W_VAL))
    }

    pub fn set_style_id(&mut self, style_id: &str) {
        self.properties_mut()
            .ensure_child_ordered("w:pStyle", PPR_ORDER)
            .set_attr(W_VAL, style_id);
    }

    #[must_use]
    pub fn alignment(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:jc"))
            .and_then(|jc| jc.attr(W_VAL))
    }

    pub fn set_alignment(&mut self, alignment: HorizontalAlignment) {
        self.properties_mut()
            .ensure_child_ordered("w:jc", PPR_ORDER)
            .set_attr(W_VAL, jc_value(alignment));
    }

    /// Keep this paragraph on the same page as the next one (`w:keepNext`)
    pub fn set_keep_with_next(&mut self) {
        switch_on(self.properties_mut(), "w:keepNext", PPR_ORDER);
    }

    /// Keep all lines of this paragraph on one page (`w:keepLines`)
    pub fn set_keep_lines(&mut self) {
        switch_on(self.properties_mut(), "w:keepLines", PPR_ORDER);
    }

    #[must_use]
    pub fn keeps_with_next(&self) -> bool {
        is_switched_on(self.properties.as_ref(), "w:keepNext")
    }

    #[must_use]
    pub fn keeps_lines(&self) -> bool {
        is_switched_on(self.properties.as_ref(), "w:keepLines")
    }
}

// ========================================================================
// Blocks
// ========================================================================

/// Body or cell child
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Other(XmlNode),
}

impl Block {
    /// Body-level conversion: paragraphs and tables are typed
    fn from_body_node(node: XmlNode) -> Self {
        match node {
            XmlNode::Element(e) if e.name == W_P => Self::Paragraph(Paragraph::from_element(e)),
            XmlNode::Element(e) if e.name == W_TBL => Self::Table(Table::from_element(e)),
            other => Self::Other(other),
        }
    }

    /// Cell-level conversion: nested tables stay opaque
    fn from_cell_node(node: XmlNode) -> Self {
        match node {
            XmlNode::Element(e) if e.name == W_P => Self::Paragraph(Paragraph::from_element(e)),
            other => Self::Other(other),
        }
    }

    fn into_node(self) -> XmlNode {
        match self {
            Self::Paragraph(p) => XmlNode::Element(p.into_element()),
            Self::Table(t) => XmlNode::Element(t.into_element()),
            Self::Other(node) => node,
        }
    }
}

fn paragraphs_of(blocks: &[Block]) -> impl Iterator<Item = &Paragraph> {
    blocks.iter().filter_map(|block| match block {
        Block::Paragraph(p) => Some(p),
        _ => None,
    })
}

fn paragraphs_of_mut(blocks: &mut [Block]) -> impl Iterator<Item = &mut Paragraph> {
    blocks.iter_mut().filter_map(|block| match block {
        Block::Paragraph(p) => Some(p),
        _ => None,
    })
}

// ========================================================================
// Body
// ========================================================================

/// Document body (`w:body`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    pub attributes: Vec<(String, String)>,
    pub content: Vec<Block>,
}

impl Body {
    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        Self {
            attributes: element.attributes,
            content: element
                .children
                .into_iter()
                .map(Block::from_body_node)
                .collect(),
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_BODY);
        element.attributes = self.attributes;
        element.children = self.content.into_iter().map(Block::into_node).collect();
        element
    }

    /// Top-level paragraphs, in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.content)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.content)
    }

    /// Top-level tables, in document order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.content.iter_mut().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    #[must_use]
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables().nth(index)
    }

    pub fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables_mut().nth(index)
    }
}

// ========================================================================
// Table
// ========================================================================

/// Table child: a row or anything else (`w:tblPr`, `w:tblGrid`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableContent {
    Row(Row),
    Other(XmlNode),
}

/// A table (`w:tbl`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub attributes: Vec<(String, String)>,
    pub content: Vec<TableContent>,
}

impl Table {
    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        Self {
            attributes: element.attributes,
            content: element
                .children
                .into_iter()
                .map(|node| match node {
                    XmlNode::Element(e) if e.name == W_TR => {
                        TableContent::Row(Row::from_element(e))
                    }
                    other => TableContent::Other(other),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_TBL);
        element.attributes = self.attributes;
        element.children = self
            .content
            .into_iter()
            .map(|c| match c {
                TableContent::Row(row) => XmlNode::Element(row.into_element()),
                TableContent::Other(node) => node,
            })
            .collect();
        element
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.content.iter().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Other(_) => None,
        })
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.content.iter_mut().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Other(_) => None,
        })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Delete every row after the first `keep` rows
    pub fn truncate_rows(&mut self, keep: usize) {
        let mut seen = 0usize;
        self.content.retain(|c| match c {
            TableContent::Row(_) => {
                seen += 1;
                seen <= keep
            }
            TableContent::Other(_) => true,
        });
    }

    /// Append a row after the last existing row
    pub fn push_row(&mut self, row: Row) {
        let index = self
            .content
            .iter()
            .rposition(|c| matches!(c, TableContent::Row(_)))
            .map_or_else(|| self.grid_position().map_or(self.content.len(), |i| i + 1), |i| i + 1);
        self.content.insert(index, TableContent::Row(row));
    }

    fn grid(&self) -> Option<&XmlElement> {
        self.content.iter().find_map(|c| match c {
            TableContent::Other(XmlNode::Element(e)) if e.name == W_TBL_GRID => Some(e),
            _ => None,
        })
    }

    fn grid_position(&self) -> Option<usize> {
        self.content.iter().position(
            |c| matches!(c, TableContent::Other(XmlNode::Element(e)) if e.name == W_TBL_GRID),
        )
    }

    /// Column widths from `w:tblGrid/w:gridCol/@w:w` (twips), one entry per grid column
    #[must_use]
    pub fn grid_widths(&self) -> Vec<Option<String>> {
        self.grid()
            .map(|grid| {
                grid.elements()
                    .filter(|e| e.name == "w:gridCol")
                    .map(|col| col.attr("w:w").map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ========================================================================
// Row
// ========================================================================

/// Row child: a cell or anything else (`w:tblPrEx`, `w:trPr`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    Cell(Cell),
    Other(XmlNode),
}

/// A table row (`w:tr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub attributes: Vec<(String, String)>,
    pub content: Vec<RowContent>,
}

impl Row {
    /// Row made of the given cells, no row properties
    #[must_use]
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self {
            attributes: Vec::new(),
            content: cells.into_iter().map(RowContent::Cell).collect(),
        }
    }

    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        Self {
            attributes: element.attributes,
            content: element
                .children
                .into_iter()
                .map(|node| match node {
                    XmlNode::Element(e) if e.name == W_TC => RowContent::Cell(Cell::from_element(e)),
                    other => RowContent::Other(other),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_TR);
        element.attributes = self.attributes;
        element.children = self
            .content
            .into_iter()
            .map(|c| match c {
                RowContent::Cell(cell) => XmlNode::Element(cell.into_element()),
                RowContent::Other(node) => node,
            })
            .collect();
        element
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.content.iter().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Other(_) => None,
        })
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.content.iter_mut().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Other(_) => None,
        })
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    fn properties(&self) -> Option<&XmlElement> {
        self.content.iter().find_map(|c| match c {
            RowContent::Other(XmlNode::Element(e)) if e.name == W_TRPR => Some(e),
            _ => None,
        })
    }

    /// `w:trPr`, created after any `w:tblPrEx` and before the first cell
    pub fn properties_mut(&mut self) -> &mut XmlElement {
        let existing = self.content.iter().position(
            |c| matches!(c, RowContent::Other(XmlNode::Element(e)) if e.name == W_TRPR),
        );
        let index = existing.unwrap_or_else(|| {
            let at = self
                .content
                .iter()
                .position(|c| match c {
                    RowContent::Cell(_) => true,
                    RowContent::Other(XmlNode::Element(e)) => e.name != "w:tblPrEx",
                    RowContent::Other(_) => false,
                })
                .unwrap_or(self.content.len());
            self.content.insert(
                at,
                RowContent::Other(XmlNode::Element(XmlElement::new(W_TRPR))),
            );
            at
        });
        match &mut self.content[index] {
            RowContent::Other(XmlNode::Element(e)) => e,
            _ => unreachable!("index points at w:trPr"),
        }
    }

    /// Whether the row repeats as a header on every page (`w:tblHeader`)
    #[must_use]
    pub fn is_repeating_header(&self) -> bool {
        is_switched_on(self.properties(), "w:tblHeader")
    }

    /// Flag the row as a repeating header. Returns `false` if it already was.
    pub fn mark_repeating_header(&mut self) -> bool {
        if self.is_repeating_header() {
            return false;
        }
        switch_on(self.properties_mut(), "w:tblHeader", TRPR_ORDER);
        true
    }
}

// ========================================================================
// Cell
// ========================================================================

/// A table cell (`w:tc`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub attributes: Vec<(String, String)>,
    /// `w:tcPr`
    pub properties: Option<XmlElement>,
    pub content: Vec<Block>,
}

impl Cell {
    /// Empty cell holding one empty paragraph, optionally with a fixed width in twips
    #[must_use]
    pub fn empty(width: Option<&str>) -> Self {
        let mut cell = Self {
            content: vec![Block::Paragraph(Paragraph::new())],
            ..Self::default()
        };
        if let Some(width) = width {
            cell.set_width(width);
        }
        cell
    }

    #[must_use]
    pub fn from_element(element: XmlElement) -> Self {
        let (properties, rest) = split_properties(element.children, W_TCPR);
        Self {
            attributes: element.attributes,
            properties,
            content: rest.into_iter().map(Block::from_cell_node).collect(),
        }
    }

    #[must_use]
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement::new(W_TC);
        element.attributes = self.attributes;
        if let Some(props) = self.properties {
            element.children.push(XmlNode::Element(props));
        }
        element
            .children
            .extend(self.content.into_iter().map(Block::into_node));
        element
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.content)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.content)
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append a paragraph at the end of the cell
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(Block::Paragraph(paragraph));
    }

    /// `w:tcPr`, created if missing
    pub fn properties_mut(&mut self) -> &mut XmlElement {
        self.properties.get_or_insert_with(|| XmlElement::new(W_TCPR))
    }

    /// Fixed cell width (`w:tcW`, dxa)
    pub fn set_width(&mut self, twips: &str) {
        let tc_w = self.properties_mut().ensure_child_ordered("w:tcW", TCPR_ORDER);
        tc_w.set_attr("w:w", twips);
        tc_w.set_attr("w:type", "dxa");
    }

    #[must_use]
    pub fn vertical_alignment(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:vAlign"))
            .and_then(|v| v.attr(W_VAL))
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.properties_mut()
            .ensure_child_ordered("w:vAlign", TCPR_ORDER)
            .set_attr(W_VAL, v_align_value(alignment));
    }

    /// Replace the runs of the first paragraph with one run holding `text`.
    ///
    /// A cell without paragraphs gets one.
    pub fn set_text(&mut self, text: &str) {
        if self.paragraphs().next().is_none() {
            self.push_paragraph(Paragraph::new());
        }
        if let Some(paragraph) = self.paragraphs_mut().next() {
            paragraph.replace_runs(text);
        }
    }

    /// Align the first paragraph horizontally and the cell vertically
    pub fn apply_alignment(&mut self, alignment: CellAlignment) -> Result<()> {
        let paragraph = self.paragraphs_mut().next().ok_or_else(|| {
            SuratError::AlignmentApplication("cell has no paragraph".to_string())
        })?;
        paragraph.set_alignment(alignment.horizontal);
        self.set_vertical_alignment(alignment.vertical);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn paragraph(xml: &str) -> Paragraph {
        Paragraph::from_element(parse_document(xml).unwrap())
    }

    #[test]
    fn test_run_text_maps_breaks_and_tabs() {
        let p = paragraph(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        assert_eq!(p.text(), "a\tb\nc");
    }

    #[test]
    fn test_run_new_emits_breaks_and_preserve() {
        let run = Run::new(" lead\r\nnext\tend");
        let names: Vec<&str> = run
            .content
            .iter()
            .filter_map(|n| match n {
                XmlNode::Element(e) => Some(e.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["w:t", "w:br", "w:t", "w:tab", "w:t"]);
        assert_eq!(run.text(), " lead\nnext\tend");
        let XmlNode::Element(first) = &run.content[0] else {
            panic!("expected element");
        };
        assert_eq!(first.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_set_text_keeps_run_properties() {
        let p = paragraph(r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>old</w:t></w:r></w:p>"#);
        let mut run = p.runs().next().unwrap().clone();
        run.set_text("new");
        assert!(run.properties.as_ref().unwrap().has_child("w:b"));
        assert_eq!(run.text(), "new");
    }

    #[test]
    fn test_replace_runs_collapses_to_one() {
        let mut p = paragraph(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hello </w:t></w:r><w:bookmarkStart w:id="0"/><w:r><w:t>World</w:t></w:r></w:p>"#,
        );
        assert_eq!(p.run_count(), 2);
        p.replace_runs("Hi there");
        assert_eq!(p.run_count(), 1);
        assert_eq!(p.text(), "Hi there");
        assert!(p.runs().next().unwrap().properties.is_none());
        // bookmark kept
        assert_eq!(p.content.len(), 2);
    }

    #[test]
    fn test_paragraph_round_trip() {
        let xml = r#"<w:p w:rsidR="1"><w:pPr><w:jc w:val="both"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#;
        let element = parse_document(xml).unwrap();
        let p = Paragraph::from_element(element.clone());
        assert_eq!(p.alignment(), Some("both"));
        assert_eq!(p.into_element(), element);
    }

    #[test]
    fn test_ppr_children_are_schema_ordered() {
        let mut p = paragraph(
            r#"<w:p><w:pPr><w:pStyle w:val="Body"/><w:spacing w:after="0"/><w:jc w:val="both"/></w:pPr></w:p>"#,
        );
        p.set_alignment(HorizontalAlignment::Center);
        p.set_keep_lines();
        p.set_keep_with_next();
        p.set_keep_with_next();
        let names: Vec<&str> = p
            .properties
            .as_ref()
            .unwrap()
            .elements()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["w:pStyle", "w:keepNext", "w:keepLines", "w:spacing", "w:jc"]
        );
        assert_eq!(p.alignment(), Some("center"));
        assert!(p.keeps_with_next());
        assert!(p.keeps_lines());
    }

    #[test]
    fn test_keep_next_overrides_explicit_off() {
        let mut p = paragraph(r#"<w:p><w:pPr><w:keepNext w:val="0"/></w:pPr></w:p>"#);
        assert!(!p.keeps_with_next());
        p.set_keep_with_next();
        assert!(p.keeps_with_next());
    }

    #[test]
    fn test_table_truncate_and_push_rows() {
        let xml = r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol w:w="500"/><w:gridCol w:w="3000"/></w:tblGrid><w:tr><w:tc><w:p/></w:tc></w:tr><w:tr><w:tc><w:p/></w:tc></w:tr><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>"#;
        let mut table = Table::from_element(parse_document(xml).unwrap());
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.grid_widths(),
            vec![Some("500".to_string()), Some("3000".to_string())]
        );

        table.truncate_rows(1);
        assert_eq!(table.row_count(), 1);
        table.push_row(Row::with_cells(vec![Cell::empty(Some("500"))]));
        assert_eq!(table.row_count(), 2);
        // tblPr and tblGrid untouched and still first
        assert!(matches!(table.content[0], TableContent::Other(_)));
        assert!(matches!(table.content[1], TableContent::Other(_)));
    }

    #[test]
    fn test_push_row_into_table_without_rows() {
        let xml = r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol w:w="500"/></w:tblGrid><w:bookmarkEnd w:id="1"/></w:tbl>"#;
        let mut table = Table::from_element(parse_document(xml).unwrap());
        table.push_row(Row::default());
        assert!(matches!(table.content[2], TableContent::Row(_)));
    }

    #[test]
    fn test_row_header_marker_is_idempotent() {
        let xml = r#"<w:tr><w:tblPrEx/><w:tc><w:p/></w:tc></w:tr>"#;
        let mut row = Row::from_element(parse_document(xml).unwrap());
        assert!(!row.is_repeating_header());
        assert!(row.mark_repeating_header());
        assert!(!row.mark_repeating_header());
        assert!(row.is_repeating_header());

        let element = row.into_element();
        let names: Vec<&str> = element.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:tblPrEx", "w:trPr", "w:tc"]);
        assert_eq!(element.child("w:trPr").unwrap().elements().count(), 1);
    }

    #[test]
    fn test_cell_empty_has_width_and_paragraph() {
        let cell = Cell::empty(Some("1200"));
        assert_eq!(cell.paragraphs().count(), 1);
        let tc_w = cell.properties.as_ref().unwrap().child("w:tcW").unwrap();
        assert_eq!(tc_w.attr("w:w"), Some("1200"));
        assert_eq!(tc_w.attr("w:type"), Some("dxa"));
    }

    #[test]
    fn test_cell_alignment_requires_paragraph() {
        let mut cell = Cell::default();
        assert!(matches!(
            cell.apply_alignment(CellAlignment::CENTERED),
            Err(SuratError::AlignmentApplication(_))
        ));

        let mut cell = Cell::empty(None);
        cell.apply_alignment(CellAlignment::CENTERED).unwrap();
        assert_eq!(cell.vertical_alignment(), Some("center"));
        assert_eq!(cell.paragraphs().next().unwrap().alignment(), Some("center"));
    }

    #[test]
    fn test_cell_set_text_creates_paragraph() {
        let mut cell = Cell::default();
        cell.set_text("1.");
        assert_eq!(cell.text(), "1.");
    }

    #[test]
    fn test_nested_table_is_opaque() {
        let xml = r#"<w:tc><w:p/><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl></w:tc>"#;
        let cell = Cell::from_element(parse_document(xml).unwrap());
        assert_eq!(cell.paragraphs().count(), 1);
        assert!(matches!(cell.content[1], Block::Other(_)));
    }
}

//! Paragraph style catalog from `word/styles.xml`.

use crate::xml::xml_error;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use surat_core::{Result, SuratError};

/// Extract an attribute value by key
#[inline]
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(std::result::Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Kind of a `w:style` (`w:type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleKind {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("character") => Self::Character,
            Some("table") => Self::Table,
            Some("numbering") => Self::Numbering,
            // w:type defaults to paragraph
            _ => Self::Paragraph,
        }
    }
}

/// One style definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub style_id: String,
    /// Display name (`w:name`), if any
    pub name: Option<String>,
    pub kind: StyleKind,
}

/// Styles defined by a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCatalog {
    styles: Vec<StyleEntry>,
}

impl StyleCatalog {
    /// Parse `word/styles.xml`
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut styles = Vec::new();
        let mut current: Option<StyleEntry> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                    current = Self::entry_from(&e);
                }
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:style" => {
                        if let Some(entry) = Self::entry_from(&e) {
                            styles.push(entry);
                        }
                    }
                    b"w:name" => {
                        if let Some(entry) = current.as_mut() {
                            entry.name = get_attr(&e, b"w:val");
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => {
                    if let Some(entry) = current.take() {
                        styles.push(entry);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(format!("styles.xml: {e}"))),
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Parsed {} styles", styles.len());
        Ok(Self { styles })
    }

    fn entry_from(e: &BytesStart) -> Option<StyleEntry> {
        let style_id = get_attr(e, b"w:styleId")?;
        Some(StyleEntry {
            style_id,
            name: None,
            kind: StyleKind::from_attr(get_attr(e, b"w:type").as_deref()),
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.styles.iter()
    }

    /// Style id of the paragraph style called `name`.
    ///
    /// Matches the display name exactly, then the style id, then the
    /// display name ignoring ASCII case (Word lowercases built-in names
    /// such as `heading 1`).
    pub fn paragraph_style_id(&self, name: &str) -> Result<&str> {
        let paragraph_styles = || self.styles.iter().filter(|s| s.kind == StyleKind::Paragraph);
        paragraph_styles()
            .find(|s| s.name.as_deref() == Some(name))
            .or_else(|| paragraph_styles().find(|s| s.style_id == name))
            .or_else(|| {
                paragraph_styles().find(|s| {
                    s.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
            })
            .map(|s| s.style_id.as_str())
            .ok_or_else(|| SuratError::StyleNotFound(name.to_string()))
    }
}

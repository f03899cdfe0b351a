//! Keep-together control for the closing part of the letter.

use crate::model::Body;

/// Keeps the body paragraphs from the first one containing a marker phrase
/// through the end of the body on one page where possible.
#[derive(Debug, Clone, Copy)]
pub struct PageFlowController<'a> {
    marker: &'a str,
}

impl<'a> PageFlowController<'a> {
    #[inline]
    #[must_use]
    pub const fn new(marker: &'a str) -> Self {
        Self { marker }
    }

    /// Set `w:keepNext` and `w:keepLines` on the marked paragraphs.
    ///
    /// Table paragraphs are not considered. Returns the number of
    /// paragraphs marked; 0 if the marker never occurs.
    pub fn apply(&self, body: &mut Body) -> usize {
        let mut found = false;
        let mut marked = 0;
        for paragraph in body.paragraphs_mut() {
            if !found && paragraph.text().contains(self.marker) {
                found = true;
            }
            if found {
                paragraph.set_keep_with_next();
                paragraph.set_keep_lines();
                marked += 1;
            }
        }
        if !found {
            log::debug!("Keep-together marker {:?} not found", self.marker);
        }
        marked
    }
}

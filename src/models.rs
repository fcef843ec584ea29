/// One page of the book as originally extracted (one scanned/OCR'd page,
/// one export unit, ...). Immutable once loaded; the reflow engine never
/// edits source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePage {
    pub source_index: usize,
    pub text: String,
    pub chapter_label: Option<String>,
}

/// Container geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Base font metrics used to estimate page capacity. The zoom multiplier
/// is applied on top of `font_size_px` by the reflow controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub font_size_px: f32,
    pub line_height: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_size_px: 18.0,
            line_height: 1.6,
        }
    }
}

/// Where to restore the reader when a book is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResumePosition {
    /// Absolute character offset into the logical document.
    Offset(usize),
    /// Fraction of the document length, `0.0..=1.0`. Preferred over a raw
    /// offset when both are stored; it survives re-extraction of the book
    /// even when absolute offsets shift slightly.
    Progress(f32),
}

impl ResumePosition {
    /// Resolve to an absolute character offset in `[0, total_characters]`.
    pub fn resolve(self, total_characters: usize) -> usize {
        match self {
            ResumePosition::Offset(offset) => offset.min(total_characters),
            ResumePosition::Progress(fraction) => {
                let fraction = if fraction.is_finite() {
                    fraction.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (fraction * total_characters as f32).round() as usize
            }
        }
    }
}

/// Snapshot of the reader shown to the UI, rebuilt after every operation.
/// `character_offset` is the single source of truth for where the reader
/// is; `current_page_index` is derived from it and the current layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflowState {
    pub current_text: String,
    pub current_page_index: usize,
    pub total_pages: usize,
    pub total_characters: usize,
    pub character_offset: usize,
    pub chapter_label: Option<String>,
    pub original_source_page: usize,
}

impl ReflowState {
    /// Fraction of the document read, `0.0..=1.0`. This is the value the
    /// persistence layer stores for cross-session resume.
    pub fn progress(&self) -> f32 {
        if self.total_characters == 0 {
            0.0
        } else {
            self.character_offset as f32 / self.total_characters as f32
        }
    }
}

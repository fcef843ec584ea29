//! Stateful orchestration of the reflow engine: owns the reading
//! position, repaginates when the viewport changes, and exposes page
//! navigation to the UI.
//!
//! The controller keeps two coupled pieces of state. `character_offset`
//! is the authoritative reading position; navigation rewrites it in O(1)
//! without touching the paginator. The `ReflowState` snapshot handed to
//! the UI is a projection rebuilt from the layout after every operation,
//! never a second source of truth.

use crate::capacity::estimate_capacity;
use crate::document::LogicalDocument;
use crate::models::{ReflowState, ResumePosition, Typography, Viewport};
use crate::paginator::{self, Layout};
use tracing::debug;

/// Multiplier applied per zoom step.
const ZOOM_STEP: f32 = 1.1;
const ZOOM_MIN: f32 = 0.5;
const ZOOM_MAX: f32 = 4.0;

/// A navigable, position-stable view over one open book. One controller
/// instance exclusively owns its document and layout; the host creates a
/// new controller when the reader switches books.
pub struct ReflowController {
    document: LogicalDocument,
    viewport: Viewport,
    typography: Typography,
    zoom: f32,
    /// Authoritative reading position, in characters. Survives every
    /// repagination unchanged; everything else is derived around it.
    character_offset: usize,
    page_index: usize,
    layout: Layout,
    state: ReflowState,
}

impl ReflowController {
    /// Open a book at its beginning.
    pub fn new(document: LogicalDocument, viewport: Viewport, typography: Typography) -> Self {
        Self::with_resume(document, viewport, typography, ResumePosition::Offset(0))
    }

    /// Open a book at a persisted position. The resume value is resolved
    /// to an absolute offset once, before the first layout is computed.
    pub fn with_resume(
        document: LogicalDocument,
        viewport: Viewport,
        typography: Typography,
        resume: ResumePosition,
    ) -> Self {
        let character_offset = resume.resolve(document.len_chars());
        let mut controller = Self {
            document,
            viewport,
            typography,
            zoom: 1.0,
            character_offset,
            page_index: 0,
            layout: Layout::default(),
            state: ReflowState::default(),
        };
        controller.reflow();
        controller
    }

    /// The observable snapshot, refreshed by every operation.
    pub fn state(&self) -> &ReflowState {
        &self.state
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Recompute the page layout for the current viewport, zoom, and
    /// typography, then re-locate the reading position inside the new
    /// layout. The character offset itself is never modified here, which
    /// is what keeps the reader's place stable across resizes.
    /// Idempotent: unchanged inputs produce an identical layout.
    pub fn reflow(&mut self) {
        let font_px = self.typography.font_size_px * self.zoom;
        let capacity = estimate_capacity(
            self.viewport.width,
            self.viewport.height,
            font_px,
            self.typography.line_height,
        );
        self.layout = paginator::layout(&self.document.text, capacity);
        debug!(
            capacity,
            pages = self.layout.total_pages(),
            "repaginated document"
        );
        self.relocate();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.reflow();
    }

    pub fn set_typography(&mut self, typography: Typography) {
        if typography == self.typography {
            return;
        }
        self.typography = typography;
        self.reflow();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.reflow();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Advance one page. Silent no-op on the last page. Never
    /// repaginates.
    pub fn next_page(&mut self) {
        if self.page_index + 1 >= self.layout.total_pages() {
            return;
        }
        self.page_index += 1;
        self.character_offset = self.layout.offsets[self.page_index];
        self.refresh_state();
    }

    /// Go back one page. Silent no-op on the first page. Never
    /// repaginates.
    pub fn prev_page(&mut self) {
        if self.page_index == 0 {
            return;
        }
        self.page_index -= 1;
        self.character_offset = self.layout.offsets[self.page_index];
        self.refresh_state();
    }

    /// Jump to a page index, clamped into the current layout. The layout
    /// always holds at least one page, so the empty check is defensive
    /// only.
    pub fn go_to_page(&mut self, index: usize) {
        let total = self.layout.total_pages();
        if total == 0 {
            return;
        }
        self.page_index = index.min(total - 1);
        self.character_offset = self.layout.offsets[self.page_index];
        self.refresh_state();
    }

    /// Jump to an arbitrary character offset, clamped to the document.
    /// Arbitrary offsets need not land on a page boundary, so the page
    /// index is re-derived by scanning the layout offsets; this is not a
    /// repagination.
    pub fn go_to_offset(&mut self, offset: usize) {
        self.character_offset = offset.min(self.document.len_chars());
        self.relocate();
    }

    /// Jump to the start of an original source page (the book's own page
    /// numbering). Unknown numbers are ignored; source-page validity is
    /// the book loader's concern, not an error here.
    pub fn go_to_source_page(&mut self, source_index: usize) {
        let target = self
            .document
            .page_map
            .iter()
            .find(|entry| entry.source_page.source_index == source_index)
            .map(|entry| entry.logical_offset);
        match target {
            Some(offset) => self.go_to_offset(offset),
            None => debug!(source_index, "ignoring jump to unknown source page"),
        }
    }

    /// Re-derive the page index from the authoritative offset, then
    /// rebuild the snapshot.
    fn relocate(&mut self) {
        self.page_index = self.layout.page_index_for_offset(self.character_offset);
        self.refresh_state();
    }

    /// Rebuild the observable snapshot from the layout and the reading
    /// position. Pure projection; nothing here feeds back into layout
    /// state.
    fn refresh_state(&mut self) {
        let source = self.document.find_source_page(self.character_offset);
        self.state = ReflowState {
            current_text: self
                .layout
                .pages
                .get(self.page_index)
                .cloned()
                .unwrap_or_default(),
            current_page_index: self.page_index,
            total_pages: self.layout.total_pages(),
            total_characters: self.document.len_chars(),
            character_offset: self.character_offset,
            chapter_label: source.chapter_label.clone(),
            original_source_page: source.source_index,
        };
    }
}

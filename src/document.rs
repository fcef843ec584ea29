use crate::models::SourcePage;
use tracing::debug;

/// Separator inserted between source pages when concatenating. Exactly two
/// characters; every logical offset accounts for it.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Maps a logical offset to the source page whose text begins there.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMapEntry {
    pub logical_offset: usize,
    pub source_page: SourcePage,
}

/// The whole book as one concatenated text, plus the offset index back to
/// the original pages. Built once per book load; read-only afterwards.
///
/// Invariant: `page_map` holds at least one entry and its offsets are
/// strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalDocument {
    pub text: String,
    pub page_map: Vec<PageMapEntry>,
    char_count: usize,
}

impl LogicalDocument {
    /// Total length of the logical text in characters, not bytes; all
    /// offsets in the reflow engine are character offsets.
    pub fn len_chars(&self) -> usize {
        self.char_count
    }

    /// The source page containing `offset`: the last entry starting at or
    /// before it. Offsets before the first entry resolve to the first
    /// page; offsets at or past the end resolve to the last.
    pub fn find_source_page(&self, offset: usize) -> &SourcePage {
        let index = self
            .page_map
            .iter()
            .rposition(|entry| entry.logical_offset <= offset)
            .unwrap_or(0);
        &self.page_map[index].source_page
    }
}

/// Concatenate source pages into a logical document and build its page
/// map. Pure and total; an empty book yields empty text with a single
/// page-map entry at offset 0 so downstream lookups never face an empty
/// map.
pub fn build_document(pages: Vec<SourcePage>) -> LogicalDocument {
    if pages.is_empty() {
        return LogicalDocument {
            text: String::new(),
            page_map: vec![PageMapEntry {
                logical_offset: 0,
                source_page: SourcePage::default(),
            }],
            char_count: 0,
        };
    }

    let mut text = String::new();
    let mut page_map = Vec::with_capacity(pages.len());
    let mut offset = 0;

    for (i, page) in pages.into_iter().enumerate() {
        if i > 0 {
            text.push_str(PAGE_SEPARATOR);
            offset += PAGE_SEPARATOR.chars().count();
        }
        let page_chars = page.text.chars().count();
        text.push_str(&page.text);
        page_map.push(PageMapEntry {
            logical_offset: offset,
            source_page: page,
        });
        offset += page_chars;
    }

    debug!(
        pages = page_map.len(),
        characters = offset,
        "built logical document"
    );

    LogicalDocument {
        text,
        page_map,
        char_count: offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_page_book() -> Vec<SourcePage> {
        vec![
            SourcePage {
                source_index: 1,
                text: "Hello world.".to_string(),
                chapter_label: Some("One".to_string()),
            },
            SourcePage {
                source_index: 2,
                text: "Goodbye now.".to_string(),
                chapter_label: Some("Two".to_string()),
            },
        ]
    }

    #[test]
    fn test_concatenation_with_separator() {
        let document = build_document(two_page_book());
        assert_eq!(document.text, "Hello world.\n\nGoodbye now.");
        assert_eq!(document.len_chars(), 26);
    }

    #[test]
    fn test_page_map_offsets() {
        let document = build_document(two_page_book());
        let offsets: Vec<usize> = document
            .page_map
            .iter()
            .map(|entry| entry.logical_offset)
            .collect();
        // 12 characters of page one plus the 2-character separator.
        assert_eq!(offsets, vec![0, 14]);
    }

    #[test]
    fn test_empty_book() {
        let document = build_document(Vec::new());
        assert_eq!(document.text, "");
        assert_eq!(document.len_chars(), 0);
        assert_eq!(document.page_map.len(), 1);
        assert_eq!(document.page_map[0].logical_offset, 0);
        assert_eq!(document.find_source_page(0).source_index, 0);
    }

    #[test]
    fn test_empty_source_pages_keep_offsets_increasing() {
        let pages = vec![
            SourcePage {
                source_index: 1,
                text: String::new(),
                chapter_label: None,
            },
            SourcePage {
                source_index: 2,
                text: String::new(),
                chapter_label: None,
            },
            SourcePage {
                source_index: 3,
                text: "x".to_string(),
                chapter_label: None,
            },
        ];
        let document = build_document(pages);
        let offsets: Vec<usize> = document
            .page_map
            .iter()
            .map(|entry| entry.logical_offset)
            .collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_find_source_page_boundaries() {
        let document = build_document(two_page_book());
        assert_eq!(document.find_source_page(0).source_index, 1);
        assert_eq!(document.find_source_page(11).source_index, 1);
        // Separator characters belong to the preceding page.
        assert_eq!(document.find_source_page(13).source_index, 1);
        assert_eq!(document.find_source_page(14).source_index, 2);
        assert_eq!(document.find_source_page(25).source_index, 2);
    }

    #[test]
    fn test_find_source_page_at_total_length() {
        let document = build_document(two_page_book());
        assert_eq!(
            document.find_source_page(document.len_chars()).source_index,
            2
        );
    }

    #[test]
    fn test_find_source_page_covers_every_offset() {
        let document = build_document(two_page_book());
        for offset in 0..=document.len_chars() {
            let page = document.find_source_page(offset);
            assert!(page.source_index == 1 || page.source_index == 2);
        }
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let pages = vec![
            SourcePage {
                source_index: 1,
                text: "héllo".to_string(),
                chapter_label: None,
            },
            SourcePage {
                source_index: 2,
                text: "wörld".to_string(),
                chapter_label: None,
            },
        ];
        let document = build_document(pages);
        assert_eq!(document.len_chars(), 12);
        assert_eq!(document.page_map[1].logical_offset, 7);
        assert_eq!(document.find_source_page(7).source_index, 2);
    }
}

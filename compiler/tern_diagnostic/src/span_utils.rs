//! Line and column lookup for rendering spans.

use tern_ir::Span;

/// Pre-computed line start offsets for O(log L) line lookup.
///
/// ```
/// use tern_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "let x = 1\nx + 2.0";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 10), (2, 1));
/// assert_eq!(table.line_text(source, 2), Some("x + 2.0"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets[(line - 1) as usize] as usize;
        let end = (offset as usize).min(source.len()).max(line_start);
        let col_chars = source.get(line_start..end).map_or(0, |s| s.chars().count());
        (line, u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Text of a 1-based line, without its newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        let start = *self.offsets.get(idx)? as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(source.len(), |&next| next as usize - 1);
        source.get(start..end).map(|s| s.trim_end_matches('\r'))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// One-off `(line, column)` of a span's start.
///
/// Use [`LineOffsetTable`] for repeated lookups.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

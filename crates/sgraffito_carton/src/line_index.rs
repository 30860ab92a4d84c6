//! Line/column <-> byte offset conversion.
//!
//! Lines are 1-based. Columns are byte based; [`LineIndex::offset`] takes a
//! 1-based column (tokenizer convention) and [`LineIndex::line_col`] returns
//! a 0-based column (reporting convention).

/// Precomputed line start offsets of a text.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            line_starts,
            len: text.len() as u32,
        }
    }

    /// Number of lines (a trailing newline opens one more, empty, line).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 1-based line starts.
    #[inline]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = line.checked_sub(1)? as usize;
        self.line_starts.get(idx).copied()
    }

    /// Byte offset where the given 1-based line ends, excluding the line break.
    pub fn line_end(&self, line: u32) -> Option<u32> {
        let idx = line.checked_sub(1)? as usize;
        self.line_starts.get(idx)?;
        Some(match self.line_starts.get(idx + 1) {
            Some(next) => next - 1,
            None => self.len,
        })
    }

    /// Byte offset of a 1-based (line, column) pair.
    ///
    /// Returns `None` when the line does not exist or the column points past
    /// the end of that line.
    pub fn offset(&self, line: u32, column: u32) -> Option<u32> {
        let start = self.line_start(line)?;
        let end = self.line_end(line)?;
        let offset = start + column.checked_sub(1)?;
        (offset <= end).then_some(offset)
    }

    /// 1-based line and 0-based column of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        (line as u32, offset - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let index = LineIndex::new("\ndiv\n  span(a)\n");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.offset(1, 1), Some(0));
        assert_eq!(index.offset(2, 1), Some(1));
        assert_eq!(index.offset(3, 3), Some(7));
        // End-of-line position is addressable, one past it is not.
        assert_eq!(index.offset(2, 4), Some(4));
        assert_eq!(index.offset(2, 5), None);
        assert_eq!(index.offset(9, 1), None);
        assert_eq!(index.offset(2, 0), None);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_col(0), (1, 0));
        assert_eq!(index.line_col(2), (1, 2));
        assert_eq!(index.line_col(3), (2, 0));
        assert_eq!(index.line_col(5), (2, 2));
        assert_eq!(index.line_col(99), (2, 2));
    }
}

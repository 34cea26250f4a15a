use crate::relay::LogEntry;

/// Rendered log lines plus the scroll position.
#[derive(Debug, Default)]
pub struct LogPane {
    lines: Vec<LogEntry>,
    /// Current scroll position (line offset from bottom)
    scroll_offset: usize,
}

impl LogPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and jump to the newest line. Embedded newlines split
    /// the entry into several lines sharing its tag.
    pub fn append(&mut self, entry: LogEntry) {
        if entry.text.contains('\n') {
            for part in entry.text.split('\n') {
                self.lines.push(LogEntry::new(part.trim_end_matches('\r'), entry.tag));
            }
        } else {
            self.lines.push(entry);
        }
        self.scroll_offset = 0;
    }

    /// Drop every rendered line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_offset = 0;
    }

    pub fn lines(&self) -> &[LogEntry] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, n: usize) {
        let max_scroll = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max_scroll);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = self.lines.len().saturating_sub(1);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Index range of the lines visible in a viewport `height` rows tall.
    pub fn visible_range(&self, height: usize) -> (usize, usize) {
        let total = self.lines.len();
        let start = if total <= height {
            0
        } else {
            total.saturating_sub(height).saturating_sub(self.scroll_offset)
        };
        let end = (start + height).min(total);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::Tag;

    fn filled(n: usize) -> LogPane {
        let mut pane = LogPane::new();
        for i in 0..n {
            pane.append(LogEntry::plain(format!("line {}", i)));
        }
        pane
    }

    #[test]
    fn test_visible_range_follows_newest() {
        let pane = filled(30);
        assert_eq!(pane.visible_range(10), (20, 30));
        assert_eq!(filled(3).visible_range(10), (0, 3));
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut pane = filled(30);
        pane.scroll_up(5);
        assert_eq!(pane.visible_range(10), (15, 25));
        pane.scroll_up(1000);
        assert_eq!(pane.scroll_offset(), 29);
        assert_eq!(pane.visible_range(10), (0, 10));
        pane.scroll_down(1000);
        assert_eq!(pane.scroll_offset(), 0);
    }

    #[test]
    fn test_append_jumps_to_bottom() {
        let mut pane = filled(30);
        pane.scroll_to_top();
        pane.append(LogEntry::plain("new"));
        assert_eq!(pane.scroll_offset(), 0);
        assert_eq!(pane.visible_range(5), (26, 31));
    }

    #[test]
    fn test_multiline_entry_splits_with_tag() {
        let mut pane = LogPane::new();
        pane.append(LogEntry::error("first\r\nsecond"));
        assert_eq!(pane.len(), 2);
        assert_eq!(pane.lines()[0], LogEntry::error("first"));
        assert_eq!(pane.lines()[1].tag, Tag::Error);
    }

    #[test]
    fn test_clear_empties() {
        let mut pane = filled(4);
        pane.scroll_up(2);
        pane.clear();
        assert!(pane.is_empty());
        assert_eq!(pane.scroll_offset(), 0);
    }
}

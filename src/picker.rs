use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// State of one interactive selection.
pub struct Picker {
    pub running: bool,
    pub title: String,
    pub items: Vec<String>,
    pub mode: PickMode,
    pub input_mode: InputMode,

    // Cursor is a position within `visible`
    pub cursor: usize,
    pub scroll_offset: usize,
    pub selected: BTreeSet<usize>,

    pub search_query: String,
    pub visible: Vec<usize>,

    /// `None` until confirmed; stays `None` on cancel.
    pub result: Option<Vec<usize>>,
}

impl Picker {
    pub fn new(title: impl Into<String>, items: Vec<String>, mode: PickMode) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            running: true,
            title: title.into(),
            items,
            mode,
            input_mode: InputMode::Normal,
            cursor: 0,
            scroll_offset: 0,
            selected: BTreeSet::new(),
            search_query: String::new(),
            visible,
            result: None,
        }
    }

    /// Index into `items` under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected.contains(&idx)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    pub fn move_last(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    pub fn toggle_current(&mut self) {
        if self.mode != PickMode::Multiple {
            return;
        }
        if let Some(idx) = self.current()
            && !self.selected.remove(&idx)
        {
            self.selected.insert(idx);
        }
    }

    /// Selects every visible item, or clears them when all already are.
    pub fn toggle_all(&mut self) {
        if self.mode != PickMode::Multiple {
            return;
        }
        let all_selected = self.visible.iter().all(|idx| self.selected.contains(idx));
        for idx in &self.visible {
            if all_selected {
                self.selected.remove(idx);
            } else {
                self.selected.insert(*idx);
            }
        }
    }

    pub fn confirm(&mut self) {
        let result = match self.mode {
            PickMode::Single => match self.current() {
                Some(idx) => vec![idx],
                // Nothing visible to pick
                None => return,
            },
            PickMode::Multiple => self.selected.iter().copied().collect(),
        };
        self.result = Some(result);
        self.running = false;
    }

    pub fn cancel(&mut self) {
        self.result = None;
        self.running = false;
    }

    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
        self.update_filter();
    }

    fn update_filter(&mut self) {
        let needle = self.search_query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || item.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
        self.scroll_offset = 0;
    }

    /// Keeps the cursor inside a window of `height` rows.
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(mode: PickMode) -> Picker {
        Picker::new(
            "Pick",
            vec!["Code".into(), "Vim".into(), "Typora".into()],
            mode,
        )
    }

    #[test]
    fn test_single_confirm_returns_cursor_item() {
        let mut p = picker(PickMode::Single);
        p.move_down();
        p.move_down();
        p.move_down();
        p.confirm();
        assert!(!p.running);
        assert_eq!(p.result, Some(vec![2]));
    }

    #[test]
    fn test_single_mode_ignores_toggle() {
        let mut p = picker(PickMode::Single);
        p.toggle_current();
        p.toggle_all();
        assert!(p.selected.is_empty());
    }

    #[test]
    fn test_multi_confirm_returns_toggled_in_list_order() {
        let mut p = picker(PickMode::Multiple);
        p.move_last();
        p.toggle_current();
        p.move_first();
        p.toggle_current();
        p.confirm();
        assert_eq!(p.result, Some(vec![0, 2]));
    }

    #[test]
    fn test_multi_confirm_with_nothing_toggled_is_empty() {
        let mut p = picker(PickMode::Multiple);
        p.confirm();
        assert_eq!(p.result, Some(Vec::new()));
    }

    #[test]
    fn test_toggle_all_twice_clears() {
        let mut p = picker(PickMode::Multiple);
        p.toggle_all();
        assert_eq!(p.selected.len(), 3);
        p.toggle_all();
        assert!(p.selected.is_empty());
    }

    #[test]
    fn test_cancel_has_no_result() {
        let mut p = picker(PickMode::Multiple);
        p.toggle_all();
        p.cancel();
        assert!(!p.running);
        assert_eq!(p.result, None);
    }

    #[test]
    fn test_search_filters_and_cursor_follows() {
        let mut p = picker(PickMode::Single);
        p.move_last();
        p.set_search("VI".into());
        assert_eq!(p.visible, vec![1]);
        assert_eq!(p.current(), Some(1));
        p.confirm();
        assert_eq!(p.result, Some(vec![1]));
    }

    #[test]
    fn test_confirm_with_nothing_visible_keeps_running() {
        let mut p = picker(PickMode::Single);
        p.set_search("zzz".into());
        p.confirm();
        assert!(p.running);
        assert_eq!(p.result, None);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut p = Picker::new("Pick", (0..10).map(|i| i.to_string()).collect(), PickMode::Single);
        p.move_last();
        p.scroll_into_view(4);
        assert_eq!(p.scroll_offset, 6);
        p.move_first();
        p.scroll_into_view(4);
        assert_eq!(p.scroll_offset, 0);
    }
}

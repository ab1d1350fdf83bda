//! Small stateful widgets shared by the TUI views.

use ratatui::widgets::{ListItem, ListState, ScrollbarState};
use std::collections::VecDeque;

/// Bounded list of rendered lines, newest first, with scroll state.
///
/// Meant to be drawn with `ListDirection::BottomToTop`.
pub struct ScrollableList {
    max_items: usize,
    pub list_items: VecDeque<ListItem<'static>>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
}

impl ScrollableList {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            list_items: VecDeque::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    pub fn push(&mut self, item: ListItem<'static>) {
        self.list_items.push_front(item);
        self.list_items.truncate(self.max_items);
        self.scroll_state = self.scroll_state.content_length(self.list_items.len());
        self.jump_to_last();
    }

    /// Oldest item (top of a bottom-to-top list)
    pub fn jump_to_first(&mut self) {
        let idx = self.list_items.len().saturating_sub(1);
        self.select(idx);
    }

    /// Newest item
    pub fn jump_to_last(&mut self) {
        self.select(0);
    }

    pub fn move_up(&mut self) {
        let idx = self.list_state.selected().unwrap_or(0) + 1;
        self.select(idx.min(self.list_items.len().saturating_sub(1)));
    }

    pub fn move_down(&mut self) {
        let idx = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.select(idx);
    }

    fn select(&mut self, idx: usize) {
        self.list_state.select(Some(idx));
        self.scroll_state = self
            .scroll_state
            .position(self.list_items.len().saturating_sub(idx + 1));
    }
}

/// Single-line text input with a character cursor
#[derive(Debug, Default)]
pub struct UserInput {
    pub value: String,
    /// Cursor position in characters
    pub char_idx: usize,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_idx(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.char_idx)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn input(&mut self, to_insert: char) {
        let idx = self.byte_idx();
        self.value.insert(idx, to_insert);
        self.char_idx += 1;
    }

    pub fn backspace(&mut self) {
        if self.char_idx == 0 {
            return;
        }
        self.char_idx -= 1;
        let idx = self.byte_idx();
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.char_idx < self.char_count() {
            let idx = self.byte_idx();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.char_idx = self.char_idx.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.char_idx = (self.char_idx + 1).min(self.char_count());
    }

    pub fn jump_to_first(&mut self) {
        self.char_idx = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.char_idx = self.char_count();
    }

    /// Take the value, leaving the input empty
    pub fn submit(&mut self) -> String {
        self.char_idx = 0;
        std::mem::take(&mut self.value)
    }
}

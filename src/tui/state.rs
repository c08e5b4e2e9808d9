use crate::config::Config;
use crate::model::{Draft, today};
use crate::store::EntryStore;
use crate::tui::action::FormField;
use chrono::{Duration, Months};
use ratatui::widgets::ListState;
use std::collections::BTreeSet;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Focus {
    Form(FormField),
    List,
}

pub struct AppState {
    // Data
    pub store: EntryStore,
    pub draft: Draft,

    // UI State
    pub list_state: ListState,
    pub marked: BTreeSet<usize>,
    pub active_focus: Focus,
    pub cursor_position: usize,
    pub message: String,

    // Labels
    pub screen_title: String,
    pub empty_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            store: EntryStore::new(),
            draft: Draft::default(),
            list_state: ListState::default(),
            marked: BTreeSet::new(),
            active_focus: Focus::Form(FormField::Title),
            cursor_position: 0,
            message: "Ready.".to_string(),
            screen_title: config.screen_title.clone(),
            empty_message: config.empty_message.clone(),
        }
    }

    /// Marked rows when there are any, otherwise the selected row.
    pub fn target_offsets(&self) -> BTreeSet<usize> {
        let len = self.store.len();
        let marked: BTreeSet<usize> = self.marked.iter().copied().filter(|&i| i < len).collect();
        if !marked.is_empty() {
            return marked;
        }
        self.list_state
            .selected()
            .filter(|&i| i < len)
            .into_iter()
            .collect()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
    }

    // --- FOCUS ---
    pub fn set_focus(&mut self, focus: Focus) {
        self.active_focus = focus;
        self.cursor_position = self.focused_len();
        if focus == Focus::List && self.list_state.selected().is_none() {
            self.clamp_selection();
        }
    }

    pub fn focus_next(&mut self) {
        let next = match self.active_focus {
            Focus::Form(FormField::Title) => Focus::Form(FormField::Description),
            Focus::Form(FormField::Description) => Focus::Form(FormField::Date),
            Focus::Form(FormField::Date) => Focus::Form(FormField::Save),
            Focus::Form(FormField::Save) => Focus::List,
            Focus::List => Focus::Form(FormField::Title),
        };
        self.set_focus(next);
    }

    pub fn focus_previous(&mut self) {
        let prev = match self.active_focus {
            Focus::Form(FormField::Title) => Focus::List,
            Focus::Form(FormField::Description) => Focus::Form(FormField::Title),
            Focus::Form(FormField::Date) => Focus::Form(FormField::Description),
            Focus::Form(FormField::Save) => Focus::Form(FormField::Date),
            Focus::List => Focus::Form(FormField::Save),
        };
        self.set_focus(prev);
    }

    // --- INPUT HELPERS ---
    pub fn focused_text(&self) -> Option<&str> {
        match self.active_focus {
            Focus::Form(FormField::Title) => Some(&self.draft.title),
            Focus::Form(FormField::Description) => Some(&self.draft.description),
            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.active_focus {
            Focus::Form(FormField::Title) => Some(&mut self.draft.title),
            Focus::Form(FormField::Description) => Some(&mut self.draft.description),
            _ => None,
        }
    }

    fn focused_len(&self) -> usize {
        self.focused_text().map_or(0, |t| t.chars().count())
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }
    pub fn cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }
    pub fn enter_char(&mut self, new_char: char) {
        let pos = self.cursor_position;
        if let Some(text) = self.focused_text_mut() {
            let idx = byte_index(text, pos);
            text.insert(idx, new_char);
            self.move_cursor_right();
        }
    }
    pub fn delete_char(&mut self) {
        let pos = self.cursor_position;
        if pos == 0 {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            let before = text.chars().take(pos - 1);
            let after = text.chars().skip(pos);
            *text = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.focused_len())
    }

    // --- DATE PICKER ---
    pub fn shift_date_days(&mut self, days: i64) {
        if let Some(d) = self.draft.date.checked_add_signed(Duration::days(days)) {
            self.draft.date = d;
        }
    }
    pub fn shift_date_months(&mut self, forward: bool) {
        let shifted = if forward {
            self.draft.date.checked_add_months(Months::new(1))
        } else {
            self.draft.date.checked_sub_months(Months::new(1))
        };
        if let Some(d) = shifted {
            self.draft.date = d;
        }
    }
    pub fn reset_date(&mut self) {
        self.draft.date = today();
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.store.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
    pub fn previous(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.store.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
    pub fn toggle_mark(&mut self) {
        if let Some(idx) = self.list_state.selected().filter(|&i| i < self.store.len())
            && !self.marked.remove(&idx)
        {
            self.marked.insert(idx);
        }
    }
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(i, _)| i)
}

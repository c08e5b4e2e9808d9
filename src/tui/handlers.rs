// File: src/tui/handlers.rs
use crate::tui::action::{Action, FormField};
use crate::tui::state::{AppState, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') if matches!(state.active_focus, Focus::Form(_)) => {
                Some(Action::Submit)
            }
            _ => None,
        };
    }

    match state.active_focus {
        Focus::Form(FormField::Title) | Focus::Form(FormField::Description) => match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.focus_previous(),
            KeyCode::Esc => state.set_focus(Focus::List),
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            KeyCode::Home => state.cursor_home(),
            KeyCode::End => state.cursor_end(),
            _ => {}
        },
        Focus::Form(FormField::Date) => match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.focus_previous(),
            KeyCode::Esc => state.set_focus(Focus::List),
            KeyCode::Left | KeyCode::Char('-') => state.shift_date_days(-1),
            KeyCode::Right | KeyCode::Char('+') => state.shift_date_days(1),
            KeyCode::PageUp => state.shift_date_months(false),
            KeyCode::PageDown => state.shift_date_months(true),
            KeyCode::Char('t') => state.reset_date(),
            _ => {}
        },
        Focus::Form(FormField::Save) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => return Some(Action::Submit),
            KeyCode::Tab | KeyCode::Down => state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.focus_previous(),
            KeyCode::Esc => state.set_focus(Focus::List),
            _ => {}
        },
        Focus::List => match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => state.next(),
            KeyCode::Up | KeyCode::Char('k') => state.previous(),
            KeyCode::Char(' ') => state.toggle_mark(),
            KeyCode::Char('d') | KeyCode::Delete => {
                let targets = state.target_offsets();
                if !targets.is_empty() {
                    return Some(Action::Delete(targets));
                }
            }
            KeyCode::Char('J') => {
                let targets = state.target_offsets();
                // Destination is measured before removal, so step past the row below
                if let Some(&last) = targets.last() {
                    return Some(Action::Move(targets, last + 2));
                }
            }
            KeyCode::Char('K') => {
                let targets = state.target_offsets();
                if let Some(&first) = targets.first() {
                    return Some(Action::Move(targets, first.saturating_sub(1)));
                }
            }
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char('a') => {
                state.set_focus(Focus::Form(FormField::Title))
            }
            KeyCode::BackTab => state.focus_previous(),
            _ => {}
        },
    }
    None
}

pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::Submit => {
            let draft = std::mem::take(&mut state.draft);
            state.draft = state.store.submit(draft);
            state.list_state.select(Some(state.store.len() - 1));
            state.set_focus(Focus::Form(FormField::Title));
            state.message = "Saved.".to_string();
        }
        Action::Delete(offsets) => {
            let removed = state.store.delete(&offsets);
            state.marked.clear();
            state.clamp_selection();
            state.message = match removed.len() {
                0 => "Nothing to delete.".to_string(),
                1 => format!("Deleted \"{}\".", removed[0].title),
                n => format!("Deleted {} entries.", n),
            };
        }
        Action::Move(from, to) => {
            let landed = state.store.move_entries(&from, to);
            if !state.marked.is_empty() {
                state.marked = landed.clone().collect();
            }
            if !landed.is_empty() {
                state.list_state.select(Some(landed.start));
            }
            state.message = "Moved.".to_string();
        }
        Action::Quit => info!("event=quit entries={}", state.store.len()),
    }
}

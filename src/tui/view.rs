use crate::model::format_medium_date;
use crate::tui::action::FormField;
use crate::tui::state::{AppState, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Screen title
            Constraint::Length(3), // News
            Constraint::Length(3), // Description
            Constraint::Length(3), // Date
            Constraint::Length(3), // Save
            Constraint::Min(0),    // Entries
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        state.screen_title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, v_chunks[0]);

    // --- Form ---
    draw_text_field(f, state, FormField::Title, " News ", v_chunks[1]);
    draw_text_field(f, state, FormField::Description, " Description ", v_chunks[2]);

    let date_focused = state.active_focus == Focus::Form(FormField::Date);
    let date_line = if date_focused {
        format!("< {} >", format_medium_date(state.draft.date))
    } else {
        format_medium_date(state.draft.date)
    };
    let date = Paragraph::new(date_line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Date: ")
            .border_style(focus_style(date_focused)),
    );
    f.render_widget(date, v_chunks[3]);

    let save_focused = state.active_focus == Focus::Form(FormField::Save);
    let mut save_style = Style::default().fg(Color::White).bg(Color::Blue);
    if save_focused {
        save_style = save_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let save = Paragraph::new(Line::from(Span::styled(" Save News ", save_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(save_focused)),
        );
    f.render_widget(save, v_chunks[4]);

    // --- Entry List ---
    let list_focused = state.active_focus == Focus::List;
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Entries ({}) ", state.store.len()))
        .border_style(focus_style(list_focused));

    if state.store.is_empty() {
        let placeholder = Paragraph::new(state.empty_message.clone())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(list_block);
        f.render_widget(placeholder, v_chunks[5]);
    } else {
        let items: Vec<ListItem> = state
            .store
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let mark = if state.marked.contains(&i) { "[x] " } else { "" };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(mark, Style::default().fg(Color::Yellow)),
                        Span::styled(
                            e.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        e.description.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(Span::styled(
                        format!("Date: {}", e.formatted_date()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let highlight = if list_focused {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue)
        } else {
            Style::default()
        };
        let list = List::new(items).block(list_block).highlight_style(highlight);
        f.render_stateful_widget(list, v_chunks[5], &mut state.list_state);
    }

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(v_chunks[6]);
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let help_str = match state.active_focus {
        Focus::Form(FormField::Date) => "←/→:Day | PgUp/PgDn:Month | t:Today | Tab:Next",
        Focus::Form(FormField::Save) => "Enter:Save | Tab:List | Esc:List",
        Focus::Form(_) => "Tab:Next | ^S:Save | Esc:List | ^C:Quit",
        Focus::List => "j/k:Select | Space:Mark | d:Del | J/K:Move | a:Add | q:Quit",
    };
    let help = Paragraph::new(help_str)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn draw_text_field(f: &mut Frame, state: &AppState, field: FormField, title: &str, area: Rect) {
    let focused = state.active_focus == Focus::Form(field);
    let value = match field {
        FormField::Title => state.draft.title.as_str(),
        _ => state.draft.description.as_str(),
    };
    let input = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(focused)),
    );
    f.render_widget(input, area);

    if focused {
        let cursor_x = area.x + 1 + state.cursor_position as u16;
        let cursor_y = area.y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Draft;
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_store_shows_placeholder() {
        let mut state = AppState::new();
        let screen = render(&mut state);
        assert!(screen.contains("No news available"));
        assert!(screen.contains("Daily News Scene"));
        assert!(screen.contains("Save News"));
    }

    #[test]
    fn test_entries_replace_placeholder() {
        let mut state = AppState::new();
        let mut draft = Draft::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        draft.title = "Launch".to_string();
        draft.description = "v1 ships".to_string();
        state.store.submit(draft);

        let screen = render(&mut state);
        assert!(!screen.contains("No news available"));
        assert!(screen.contains("Launch"));
        assert!(screen.contains("v1 ships"));
        assert!(screen.contains("Date: Jan 5, 2024"));
        assert!(screen.contains("Entries (1)"));
    }
}

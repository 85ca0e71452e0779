use std::{borrow::Cow, cell::RefCell, rc::Rc};

use arboard::Clipboard;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table, TableState,
    },
};

use gazetteer::{
    export,
    page::Pager,
    roster::{Entry, Roster},
};

use crate::{
    env::{Toast, UiCtx},
    help,
    util::{abbreviate_home, pad},
    widgets::{ConfirmPopup, EditCityPopup, TextInput, theme::Theme},
};

/// Main screen: the add form on top, one shared status line, and the paged
/// entry table below it.
pub struct RosterWidget {
    state: Rc<RefCell<RosterState>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldId {
    StateName,
    StateSelect,
    CityName,
    Table,
}

const FIELD_ORDER: [FieldId; 4] = [
    FieldId::StateName,
    FieldId::StateSelect,
    FieldId::CityName,
    FieldId::Table,
];

/// Dropdown stand-in. Cycles through the distinct states instead of opening
/// a list. The chosen value is kept verbatim even after the matching state
/// disappears from the roster, which mirrors how the add-city flow treats a
/// stale choice.
#[derive(Debug, Default)]
struct StateSelect {
    value: Option<String>,
    active: bool,
}

impl StateSelect {
    fn selected(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn cycle(&mut self, states: &[String], step: isize) {
        if states.is_empty() {
            return;
        }
        let len = states.len() as isize;
        let current = self
            .value
            .as_deref()
            .and_then(|value| states.iter().position(|state| state == value));
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len) as usize,
            None if step < 0 => (len - 1) as usize,
            None => 0,
        };
        self.value = Some(states[next].clone());
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.active {
            theme.accent()
        } else {
            theme.border()
        };
        let block = Block::bordered()
            .title("State")
            .style(Style::default().bg(theme.panel_bg_alt()).fg(theme.text()))
            .border_style(Style::default().fg(border));
        let value = match self.value.as_deref() {
            Some(value) => Span::styled(value.to_string(), Style::default().fg(theme.text())),
            None => Span::styled("Select State", Style::default().fg(theme.text_muted())),
        };
        let arrow = Span::styled(" ▾", Style::default().fg(theme.text_muted()));
        let select = Paragraph::new(Line::from(vec![value, arrow])).block(block);
        frame.render_widget(select, area);
    }
}

struct RosterState {
    roster: Roster,
    pager: Pager,
    state_input: TextInput,
    city_input: TextInput,
    select: StateSelect,
    focus: FieldId,
    error: Option<String>,
    table: TableState,
}

impl RosterState {
    fn next_field(&mut self) {
        let idx = FIELD_ORDER
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = FIELD_ORDER[(idx + 1) % FIELD_ORDER.len()];
        self.sync_active();
    }

    fn prev_field(&mut self) {
        let idx = FIELD_ORDER
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = FIELD_ORDER[(idx + FIELD_ORDER.len() - 1) % FIELD_ORDER.len()];
        self.sync_active();
    }

    fn sync_active(&mut self) {
        self.state_input
            .set_active(matches!(self.focus, FieldId::StateName));
        self.city_input
            .set_active(matches!(self.focus, FieldId::CityName));
        self.select
            .set_active(matches!(self.focus, FieldId::StateSelect));
    }

    fn reset_selection(&mut self) {
        let rows = self.pager.window_range(self.roster.len()).len();
        let selection = if rows == 0 { None } else { Some(0) };
        self.table.select(selection);
        *self.table.offset_mut() = 0;
    }

    fn clamp_selection(&mut self) {
        let rows = self.pager.window_range(self.roster.len()).len();
        match self.table.selected() {
            Some(_) if rows == 0 => self.table.select(None),
            Some(selected) if selected >= rows => self.table.select(Some(rows - 1)),
            _ => {}
        }
    }
}

impl RosterWidget {
    const HELP_FORM: &'static [help::Entry<'static>] = &[
        help::Entry {
            keys: Cow::Borrowed("tab/⇧tab"),
            short: Cow::Borrowed("fields"),
            long: Cow::Borrowed("Cycle form fields"),
        },
        help::Entry {
            keys: Cow::Borrowed("⏎"),
            short: Cow::Borrowed("save"),
            long: Cow::Borrowed("Save state or add city"),
        },
        help::Entry {
            keys: Cow::Borrowed("space/←/→"),
            short: Cow::Borrowed("choose"),
            long: Cow::Borrowed("Choose a state"),
        },
        help::Entry {
            keys: Cow::Borrowed("esc"),
            short: Cow::Borrowed("table"),
            long: Cow::Borrowed("Back to the table"),
        },
    ];
    const HELP_TABLE: &'static [help::Entry<'static>] = &[
        help::Entry {
            keys: Cow::Borrowed("j/k/↑/↓"),
            short: Cow::Borrowed("move"),
            long: Cow::Borrowed("Move selection"),
        },
        help::Entry {
            keys: Cow::Borrowed("h/l/←/→"),
            short: Cow::Borrowed("page"),
            long: Cow::Borrowed("Previous or next page"),
        },
        help::Entry {
            keys: Cow::Borrowed("e"),
            short: Cow::Borrowed("edit"),
            long: Cow::Borrowed("Edit city"),
        },
        help::Entry {
            keys: Cow::Borrowed("d"),
            short: Cow::Borrowed("delete"),
            long: Cow::Borrowed("Delete entry"),
        },
        help::Entry {
            keys: Cow::Borrowed("y"),
            short: Cow::Borrowed("yank"),
            long: Cow::Borrowed("Copy entry"),
        },
        help::Entry {
            keys: Cow::Borrowed("w"),
            short: Cow::Borrowed("export"),
            long: Cow::Borrowed("Export to JSON"),
        },
        help::Entry {
            keys: Cow::Borrowed("tab"),
            short: Cow::Borrowed("form"),
            long: Cow::Borrowed("Jump to the form"),
        },
    ];

    pub fn new() -> Self {
        let mut state_input = TextInput::new("State Name", "").placeholder("Enter State Name");
        state_input.set_active(true);
        let state = RosterState {
            roster: Roster::seeded(),
            pager: Pager::default(),
            state_input,
            city_input: TextInput::new("City Name", "").placeholder("Enter City Name"),
            select: StateSelect::default(),
            focus: FieldId::StateName,
            error: None,
            table: TableState::default(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    fn submit_state(&self) {
        let mut state = self.state.borrow_mut();
        let value = state.state_input.value().to_string();
        match state.roster.add_state(&value) {
            Ok(()) => {
                state.state_input.clear();
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        }
    }

    fn submit_city(&self) {
        let mut state = self.state.borrow_mut();
        let selected = state.select.selected().unwrap_or_default().to_string();
        let value = state.city_input.value().to_string();
        match state.roster.add_city(&selected, &value) {
            Ok(()) => {
                state.city_input.clear();
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        }
    }

    fn cycle_state(&self, step: isize) {
        let mut state = self.state.borrow_mut();
        let states: Vec<String> = state
            .roster
            .unique_states()
            .into_iter()
            .map(str::to_string)
            .collect();
        state.select.cycle(&states, step);
    }

    fn blur_to_table(&self) {
        let mut state = self.state.borrow_mut();
        state.focus = FieldId::Table;
        state.sync_active();
    }

    fn select_next(&self) {
        let mut state = self.state.borrow_mut();
        let rows = state.pager.window_range(state.roster.len()).len();
        if rows == 0 {
            return;
        }
        let next = match state.table.selected() {
            Some(index) => (index + 1).min(rows - 1),
            None => 0,
        };
        state.table.select(Some(next));
    }

    fn select_previous(&self) {
        let mut state = self.state.borrow_mut();
        let rows = state.pager.window_range(state.roster.len()).len();
        if rows == 0 {
            return;
        }
        let next = match state.table.selected() {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        state.table.select(Some(next));
    }

    fn page_next(&self) {
        let mut state = self.state.borrow_mut();
        let total = state.roster.len();
        if state.pager.next(total) {
            state.reset_selection();
        }
    }

    fn page_prev(&self) {
        let mut state = self.state.borrow_mut();
        if state.pager.prev() {
            state.reset_selection();
        }
    }

    /// Maps the table cursor to an index into the full roster. Returns None
    /// when the cursor sits past the current window, which happens on a
    /// stale page after deletions.
    fn selected_entry(&self) -> Option<(usize, Entry)> {
        let state = self.state.borrow();
        let window = state.pager.window_range(state.roster.len());
        let selected = state.table.selected()?;
        let index = window.start + selected;
        if index >= window.end {
            return None;
        }
        state.roster.get(index).map(|entry| (index, entry.clone()))
    }

    fn open_edit(&self, ctx: &UiCtx) {
        let Some((index, entry)) = self.selected_entry() else {
            ctx.show_toast(Toast::error("No entry selected"));
            return;
        };
        let handle = Rc::clone(&self.state);
        let popup = EditCityPopup::new(&entry.state, &entry.city, move |proposal| {
            let mut state = handle.borrow_mut();
            match state.roster.edit_city(index, Some(proposal)) {
                Ok(_) => Ok(()),
                Err(err) => Err(err.to_string()),
            }
        });
        ctx.set_popup(Box::new(popup));
    }

    fn confirm_delete(&self, ctx: &UiCtx) {
        let Some((index, entry)) = self.selected_entry() else {
            ctx.show_toast(Toast::error("No entry selected"));
            return;
        };
        let city_label = if entry.has_city() {
            entry.city.clone()
        } else {
            "N/A".to_string()
        };
        let message = format!(
            "State={}\nCity={city_label}\nAre you sure you want to delete this city?",
            entry.state
        );
        let handle = Rc::clone(&self.state);
        let ctx_for_action = ctx.clone();
        let popup = ConfirmPopup::new("Delete city", message, "Delete", "cancel", move || {
            let mut state = handle.borrow_mut();
            if index >= state.roster.len() {
                return;
            }
            let removed = state.roster.remove(index);
            state.clamp_selection();
            ctx_for_action.show_toast(Toast::info(format!("Deleted {}", yank_text(&removed))));
        });
        ctx.set_popup(Box::new(popup));
    }

    fn yank_selected(&self, ctx: &UiCtx) {
        let Some((_, entry)) = self.selected_entry() else {
            ctx.show_toast(Toast::error("No entry selected"));
            return;
        };
        let text = yank_text(&entry);
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone())) {
            Ok(()) => ctx.show_toast(Toast::info(format!("Yanked {text}"))),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard yank failed");
                ctx.show_toast(Toast::error(format!("Clipboard error: {err}")));
            }
        }
    }

    fn export_roster(&self, ctx: &UiCtx) {
        let entries = self.state.borrow().roster.entries().to_vec();
        match export::write_roster(&entries) {
            Ok(path) => {
                ctx.show_toast(Toast::info(format!("Exported to {}", abbreviate_home(&path))));
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                ctx.show_toast(Toast::error(err.to_string()));
            }
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let state = self.state.borrow();
        let layout = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(area);
        state.state_input.render(frame, layout[0], theme);
        state.select.render(frame, layout[1], theme);
        state.city_input.render(frame, layout[2], theme);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let state = self.state.borrow();
        if let Some(error) = state.error.as_deref() {
            let line = Line::from(Span::styled(
                pad(error, 1),
                Style::default().fg(theme.error()),
            ));
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut state = self.state.borrow_mut();
        let total = state.roster.len();
        let window = state.pager.window_range(total);

        let border = if state.focus == FieldId::Table {
            theme.accent()
        } else {
            theme.border()
        };
        let block = Block::bordered()
            .title_top(Line::styled("Entries", Style::default().fg(theme.text())))
            .title_bottom(Line::styled(
                pad(format_entry_count(total), 2),
                Style::default().fg(theme.text_muted()),
            ))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.panel_bg_alt()).fg(theme.text()));

        if window.is_empty() {
            let hint = if total == 0 {
                ""
            } else {
                "No entries on this page"
            };
            let empty = Paragraph::new(hint)
                .style(Style::default().fg(theme.text_muted()))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec![Cell::from("State"), Cell::from("City")]).style(
            Style::default()
                .fg(theme.text_muted())
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = state.roster.entries()[window].iter().map(|entry| {
            let city = if entry.has_city() {
                Cell::from(entry.city.clone())
            } else {
                Cell::from(Span::styled(
                    "N/A",
                    Style::default().fg(theme.text_muted()),
                ))
            };
            Row::new(vec![Cell::from(entry.state.clone()), city])
        })
        .collect();

        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Fill(1)])
            .block(block)
            .header(header)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol(">> ")
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.selection_fg()),
            );

        *state.table.offset_mut() = 0;
        StatefulWidget::render(table, area, frame.buffer_mut(), &mut state.table);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let state = self.state.borrow();
        let total = state.roster.len();
        let active = Style::default().fg(theme.text());
        let muted = Style::default().fg(theme.text_muted());
        let prev_style = if state.pager.has_prev() { active } else { muted };
        let next_style = if state.pager.has_next(total) {
            active
        } else {
            muted
        };
        let label = page_label(state.pager.page(), Pager::total_pages(total));
        let line = Line::from(vec![
            Span::styled("‹ Prev", prev_style),
            Span::styled(" · ", muted),
            Span::styled(label, Style::default().fg(theme.accent_alt())),
            Span::styled(" · ", muted),
            Span::styled("Next ›", next_style),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for RosterWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::widgets::Widget for RosterWidget {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);
        self.render_form(frame, layout[0], theme);
        self.render_status(frame, layout[1], theme);
        self.render_table(frame, layout[2], theme);
        self.render_footer(frame, layout[3], theme);
    }

    fn handle_event(&self, ctx: &UiCtx, event: &Event) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let handled = match state.focus {
                FieldId::StateName => state.state_input.handle_event(event),
                FieldId::CityName => state.city_input.handle_event(event),
                _ => false,
            };
            if handled {
                return true;
            }
        }

        let Some(key) = event.as_key_press_event() else {
            return false;
        };

        match key.code {
            KeyCode::Tab => {
                self.state.borrow_mut().next_field();
                return true;
            }
            KeyCode::BackTab => {
                self.state.borrow_mut().prev_field();
                return true;
            }
            _ => {}
        }

        let focus = self.state.borrow().focus;
        match focus {
            FieldId::StateName => match key.code {
                KeyCode::Enter => {
                    self.submit_state();
                    true
                }
                KeyCode::Esc => {
                    self.blur_to_table();
                    true
                }
                _ => false,
            },
            FieldId::StateSelect => match key.code {
                KeyCode::Enter => {
                    self.submit_city();
                    true
                }
                KeyCode::Char(' ') | KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => {
                    self.cycle_state(1);
                    true
                }
                KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => {
                    self.cycle_state(-1);
                    true
                }
                KeyCode::Esc => {
                    self.blur_to_table();
                    true
                }
                _ => false,
            },
            FieldId::CityName => match key.code {
                KeyCode::Enter => {
                    self.submit_city();
                    true
                }
                KeyCode::Esc => {
                    self.blur_to_table();
                    true
                }
                _ => false,
            },
            FieldId::Table => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.select_next();
                    true
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.select_previous();
                    true
                }
                KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                    self.page_next();
                    true
                }
                KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                    self.page_prev();
                    true
                }
                KeyCode::Char('e') => {
                    self.open_edit(ctx);
                    true
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    self.confirm_delete(ctx);
                    true
                }
                KeyCode::Char('y') => {
                    self.yank_selected(ctx);
                    true
                }
                KeyCode::Char('w') => {
                    self.export_roster(ctx);
                    true
                }
                _ => false,
            },
        }
    }

    fn help(&self) -> Option<&[help::Entry<'_>]> {
        if self.state.borrow().focus == FieldId::Table {
            Some(Self::HELP_TABLE)
        } else {
            Some(Self::HELP_FORM)
        }
    }
}

fn yank_text(entry: &Entry) -> String {
    if entry.has_city() {
        format!("{}, {}", entry.city, entry.state)
    } else {
        entry.state.clone()
    }
}

fn format_entry_count(count: usize) -> String {
    match count {
        0 => "no entries".to_string(),
        1 => "1 entry".to_string(),
        _ => format!("{count} entries"),
    }
}

fn page_label(page: usize, total: usize) -> String {
    format!("Page {page} of {total}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_counts_read_naturally() {
        assert_eq!(format_entry_count(0), "no entries");
        assert_eq!(format_entry_count(1), "1 entry");
        assert_eq!(format_entry_count(7), "7 entries");
    }

    #[test]
    fn page_label_shows_current_and_total() {
        assert_eq!(page_label(1, 1), "Page 1 of 1");
        assert_eq!(page_label(2, 3), "Page 2 of 3");
    }

    #[test]
    fn yank_text_joins_city_and_state() {
        let entry = Entry::new("California", "Los Angeles");
        assert_eq!(yank_text(&entry), "Los Angeles, California");
    }

    #[test]
    fn yank_text_falls_back_to_the_state() {
        let entry = Entry::new("Nevada", "");
        assert_eq!(yank_text(&entry), "Nevada");
    }

    #[test]
    fn field_order_wraps_in_both_directions() {
        let mut state = RosterState {
            roster: Roster::seeded(),
            pager: Pager::default(),
            state_input: TextInput::new("State Name", ""),
            city_input: TextInput::new("City Name", ""),
            select: StateSelect::default(),
            focus: FieldId::Table,
            error: None,
            table: TableState::default(),
        };
        state.next_field();
        assert_eq!(state.focus, FieldId::StateName);
        state.prev_field();
        assert_eq!(state.focus, FieldId::Table);
    }

    #[test]
    fn select_cycles_through_states_and_wraps() {
        let states: Vec<String> = ["California", "Texas", "New York"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut select = StateSelect::default();
        select.cycle(&states, 1);
        assert_eq!(select.selected(), Some("California"));
        select.cycle(&states, -1);
        assert_eq!(select.selected(), Some("New York"));
        select.cycle(&states, 1);
        assert_eq!(select.selected(), Some("California"));
    }

    #[test]
    fn select_keeps_a_stale_value_until_cycled() {
        let mut select = StateSelect {
            value: Some("Atlantis".to_string()),
            active: false,
        };
        select.cycle(&[], 1);
        assert_eq!(select.selected(), Some("Atlantis"));
        let states = vec!["California".to_string()];
        select.cycle(&states, 1);
        assert_eq!(select.selected(), Some("California"));
    }
}

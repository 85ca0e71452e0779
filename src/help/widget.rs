use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Row, Table},
};

use crate::{
    env::UiCtx,
    help::Entry,
    util::{fill_bg, pad},
    widgets::{Popup, theme::Theme},
};

/// Two-column listing of the active key bindings.
pub struct HelpPopup {
    entries: Vec<Entry<'static>>,
}

impl HelpPopup {
    pub fn new(entries: &[Entry<'_>]) -> Self {
        Self {
            entries: entries.iter().map(|e| e.to_owned_entry()).collect(),
        }
    }
}

impl crate::widgets::Widget for HelpPopup {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let buf = frame.buffer_mut();
        fill_bg(buf, area, theme.panel_bg());
        let title = Line::styled(
            pad("Help", 2),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )
        .centered();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(Style::default().fg(theme.border()))
            .style(Style::default().bg(theme.panel_bg()).fg(theme.text()))
            .padding(Padding::new(2, 2, 1, 1));

        let inner = area.inner(Margin::new(1, 1));

        let visible: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| !entry.keys.is_empty())
            .collect();

        let rows: Vec<_> = visible
            .chunks(2)
            .map(|chunk| {
                let left_key = chunk
                    .first()
                    .map(|e| make_key_span(e, theme))
                    .unwrap_or_default();
                let left_desc = chunk
                    .first()
                    .map(|e| Span::styled(e.long.as_ref(), Style::default().fg(theme.text())))
                    .unwrap_or_default();
                let right_key = chunk
                    .get(1)
                    .map(|e| make_key_span(e, theme))
                    .unwrap_or_default();
                let right_desc = chunk
                    .get(1)
                    .map(|e| Span::styled(e.long.as_ref(), Style::default().fg(theme.text())))
                    .unwrap_or_default();
                Row::new(vec![
                    Line::from(left_key),
                    Line::from(left_desc),
                    Line::from(right_key),
                    Line::from(right_desc),
                ])
            })
            .collect();

        let widths = &[
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .block(block)
            .style(Style::default().fg(theme.text()));

        ratatui::widgets::Widget::render(table, inner, buf);
    }

    fn handle_event(&self, ctx: &UiCtx, event: &Event) -> bool {
        if let Some(key) = event.as_key_press_event()
            && matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
            )
        {
            ctx.dismiss_popup();
            return true;
        }
        false
    }
}

impl Popup for HelpPopup {
    fn rect(&self, area: Rect) -> Rect {
        let width = area.width / 2;
        let height = area.height / 2;
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

fn make_key_span(entry: &Entry<'_>, theme: &Theme) -> Span<'static> {
    let keys = entry.keys.as_ref();
    Span::styled(
        format!("[{keys}]"),
        Style::default()
            .fg(theme.accent_alt())
            .add_modifier(Modifier::BOLD),
    )
}

use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

mod widget;

pub use widget::HelpPopup;

use crate::widgets::theme::Theme;

/// One key binding. `short` labels it in the bottom bar, `long` describes it
/// in the help popup.
#[derive(Clone)]
pub struct Entry<'a> {
    pub keys: Cow<'a, str>,
    pub short: Cow<'a, str>,
    pub long: Cow<'a, str>,
}

impl Entry<'_> {
    fn to_owned_entry(&self) -> Entry<'static> {
        Entry {
            keys: Cow::Owned(self.keys.as_ref().to_owned()),
            short: Cow::Owned(self.short.as_ref().to_owned()),
            long: Cow::Owned(self.long.as_ref().to_owned()),
        }
    }
}

fn make_spans<'a>(entries: &'a [Entry<'a>], theme: &Theme) -> Vec<Span<'a>> {
    let mut spans: Vec<_> = entries
        .iter()
        .filter_map(|entry| {
            if entry.keys.is_empty() {
                return None;
            }
            Some([
                Span::styled(
                    format!("[{}]", entry.keys),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(entry.short.as_ref()),
                Span::styled(" • ", Style::default().fg(theme.text_muted())),
            ])
        })
        .flatten()
        .collect();
    // Remove the last span
    if !spans.is_empty() {
        spans.pop();
    }
    spans
}

/// Rows needed to fit the bar into `area`. Computed from the raw entries so
/// it stays in sync with what `render` draws.
pub fn height(entries: &[Entry<'_>], area: Rect) -> u16 {
    let available_width = (area.width as usize).max(1);
    let mut total_width = 0usize;
    for entry in entries {
        if entry.keys.is_empty() {
            continue;
        }
        if total_width > 0 {
            total_width += " • ".width();
        }
        total_width += format!("[{}]", entry.keys).width() + 1 + entry.short.width();
    }

    // number of rows needed = ceil(total_width / available_width)
    total_width.div_ceil(available_width) as u16
}

pub fn render(entries: &[Entry<'_>], frame: &mut Frame, area: Rect, theme: &Theme) {
    let spans = make_spans(entries, theme);
    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, area);
}

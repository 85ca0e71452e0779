use std::{borrow::Cow, cell::RefCell};

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::{
    env::UiCtx,
    help,
    util::{fill_bg, pad},
    widgets::{Popup, TextInput, theme::Theme},
};

/// Modal prompt for renaming a city, prefilled with the current name.
/// Submitting a blank name cancels the edit instead of erroring, matching
/// how the roster treats blank proposals.
pub struct EditCityPopup {
    context: String,
    input: RefCell<TextInput>,
    error: RefCell<Option<String>>,
    on_submit: Box<dyn Fn(&str) -> Result<(), String>>,
    help_entries: Vec<help::Entry<'static>>,
}

impl EditCityPopup {
    pub fn new(
        state: &str,
        city: &str,
        on_submit: impl Fn(&str) -> Result<(), String> + 'static,
    ) -> Self {
        let mut input = TextInput::new("Enter the new city name:", city);
        input.set_active(true);
        let help_entries = vec![
            help::Entry {
                keys: Cow::Borrowed("⏎"),
                short: Cow::Borrowed("save"),
                long: Cow::Borrowed("Save the new name"),
            },
            help::Entry {
                keys: Cow::Borrowed("esc"),
                short: Cow::Borrowed("cancel"),
                long: Cow::Borrowed("Keep the current name"),
            },
        ];
        Self {
            context: format!("State={state}"),
            input: RefCell::new(input),
            error: RefCell::new(None),
            on_submit: Box::new(on_submit),
            help_entries,
        }
    }
}

impl crate::widgets::Widget for EditCityPopup {
    fn help(&self) -> Option<&[help::Entry<'_>]> {
        Some(self.help_entries.as_slice())
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        fill_bg(frame.buffer_mut(), area, theme.panel_bg());
        let title = Line::styled(
            pad("Edit city", 1),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )
        .centered();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(Style::default().fg(theme.accent()))
            .style(Style::default().bg(theme.panel_bg()).fg(theme.text()));
        frame.render_widget(block.clone(), area);

        let inner = block.inner(area).inner(Margin::new(1, 1));
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

        let context = match self.context.split_once('=') {
            Some((key, value)) => Line::from(vec![
                Span::styled(
                    format!("{key}="),
                    Style::default()
                        .fg(theme.text_muted())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.to_string(), Style::default().fg(theme.text())),
            ]),
            None => Line::from(self.context.as_str()),
        };
        frame.render_widget(Paragraph::new(context), layout[0]);

        self.input.borrow().render(frame, layout[1], theme);

        if let Some(error) = self.error.borrow().as_deref() {
            let line = Line::from(Span::styled(error, Style::default().fg(theme.error())));
            frame.render_widget(Paragraph::new(line), layout[2]);
        }
    }

    fn handle_event(&self, ctx: &UiCtx, event: &Event) -> bool {
        if let Some(key) = event.as_key_press_event() {
            match key.code {
                KeyCode::Enter => {
                    let proposal = self.input.borrow().value().to_string();
                    if proposal.trim().is_empty() {
                        ctx.dismiss_popup();
                        return true;
                    }
                    match (self.on_submit)(&proposal) {
                        Ok(()) => ctx.dismiss_popup(),
                        Err(message) => {
                            *self.error.borrow_mut() = Some(message);
                        }
                    }
                    return true;
                }
                KeyCode::Esc => {
                    ctx.dismiss_popup();
                    return true;
                }
                _ => {}
            }
        }
        self.input.borrow_mut().handle_event(event);
        true
    }
}

impl Popup for EditCityPopup {
    fn rect(&self, area: Rect) -> Rect {
        let width = ((area.width as f32 * 0.55) as u16)
            .clamp(44, 72)
            .min(area.width.saturating_sub(4));
        let height = 9u16.min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

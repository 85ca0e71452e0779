use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::widgets::theme::Theme;

/// Single-line text input with a bordered label. The cursor is tracked in
/// characters so editing stays correct for non-ASCII input, and long values
/// scroll horizontally to keep the cursor visible.
pub struct TextInput {
    label: String,
    placeholder: String,
    value: String,
    cursor: usize,
    active: bool,
}

impl TextInput {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self {
            label: label.into(),
            placeholder: String::new(),
            value,
            cursor,
            active: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        let len = self.value.chars().count();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.active {
            theme.accent()
        } else {
            theme.border()
        };
        let block = Block::bordered()
            .title(self.label.as_str())
            .style(Style::default().bg(theme.panel_bg_alt()).fg(theme.text()))
            .border_style(Style::default().fg(border));
        let inner_width = area.width.saturating_sub(2) as usize;

        let (visible, cursor_pos) = self.visible_text(inner_width);
        let value = if self.value.is_empty() {
            Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(theme.text_muted()),
            )
        } else {
            Span::styled(visible, Style::default().fg(theme.text()))
        };
        let input = Paragraph::new(Line::from(value)).block(block);
        frame.render_widget(input, area);
        if self.active {
            frame.set_cursor_position(Position::new(
                area.x + cursor_pos as u16 + 1,
                area.y + 1,
            ));
        }
    }

    fn visible_text(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let len = self.value.chars().count();
        let cursor = self.cursor.min(len);
        let mut start = 0usize;
        if cursor >= width {
            start = cursor + 1 - width;
        }
        let text: String = self.value.chars().skip(start).take(width).collect();
        let cursor_pos = cursor.saturating_sub(start).min(width.saturating_sub(1));
        (text, cursor_pos)
    }

    pub fn handle_event(&mut self, evt: &Event) -> bool {
        if !self.active {
            return false;
        }
        let Some(key) = evt.as_key_press_event() else {
            return false;
        };
        match key.code {
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.value.chars().count();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let idx = char_to_byte_idx(&self.value, self.cursor);
                self.value.insert(idx, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = char_to_byte_idx(&self.value, self.cursor - 1);
                    let end = char_to_byte_idx(&self.value, self.cursor);
                    self.value.replace_range(start..end, "");
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let start = char_to_byte_idx(&self.value, self.cursor);
                    let end = char_to_byte_idx(&self.value, self.cursor + 1);
                    self.value.replace_range(start..end, "");
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
            }
            _ => {
                return false;
            }
        }
        true
    }
}

fn char_to_byte_idx(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or_else(|| value.len())
}

use crossterm::event::Event;
use ratatui::{Frame, layout::Rect};
use theme::Theme;

mod confirm;
mod edit_city;
mod input;
mod roster;
pub mod theme;

pub use confirm::ConfirmPopup;
pub use edit_city::EditCityPopup;
pub use input::TextInput;
pub use roster::RosterWidget;

use crate::env::UiCtx;
use crate::help;

pub trait Widget {
    /// Render the widget's content.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Handle input events. Returns true if the event was handled.
    fn handle_event(&self, _ctx: &UiCtx, _event: &Event) -> bool {
        false
    }

    /// Optional help to display at the bottom while this widget is active.
    fn help(&self) -> Option<&[help::Entry<'_>]> {
        None
    }
}

pub trait Popup: Widget {
    fn rect(&self, area: Rect) -> Rect;
}

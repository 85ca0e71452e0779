use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use tokio_stream::StreamExt;
use unicode_width::UnicodeWidthStr;

mod env;
mod help;
mod subcommands;
mod trace;
mod util;
mod widgets;

use env::{Env, Message, Toast, ToastKind, UiCtx};
use help::HelpPopup;
use util::fill_bg;
use widgets::theme::Theme;
use widgets::{Popup, Widget};

#[derive(clap::Parser)]
#[command(
    name = "gazetteer",
    version = "0.1.0",
    about = "Terminal UI for managing a roster of states and cities",
    long_about = None
)]
struct Cli {
    /// Increase output verbosity (-v, -vv, etc.)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Color theme (light or dark), overrides autodetection
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the seeded roster and exit
    List {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = <Cli as clap::Parser>::parse();
    trace::init(cli.verbose)?;
    match cli.command {
        Some(Commands::List { json }) => {
            let options = subcommands::list::Options { json };
            subcommands::list::command(options)
        }
        None => {
            let theme = resolve_theme(cli.theme.as_deref());
            App::new(theme).run_tui().await
        }
    }
}

fn resolve_theme(name: Option<&str>) -> Theme {
    match name {
        Some(name) => Theme::named(name).unwrap_or_else(|| {
            tracing::warn!(theme = %name, "unknown theme, using autodetection");
            Theme::default()
        }),
        None => Theme::default(),
    }
}

struct ActiveToast {
    toast: Toast,
    expires_at: Instant,
}

struct App {
    should_quit: bool,
    theme: Theme,
    widgets: Vec<Box<dyn Widget>>,
    popup: Option<Box<dyn Popup>>,
    toasts: Vec<ActiveToast>,
}

impl App {
    const FRAMES_PER_SECOND: f32 = 60.0;
    const MAX_TOASTS: usize = 3;

    fn new(theme: Theme) -> Self {
        Self {
            should_quit: false,
            theme,
            widgets: Vec::new(),
            popup: None,
            toasts: Vec::new(),
        }
    }

    pub async fn run_tui(self) -> Result<()> {
        let terminal = ratatui::init();
        let app_result = self.run(terminal).await;
        ratatui::restore();
        app_result
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut env = Env::new();
        let ctx = env.tx();
        self.widgets.push(Box::new(widgets::RosterWidget::new()));

        let period = Duration::from_secs_f32(1.0 / Self::FRAMES_PER_SECOND);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    self.expire_toasts();
                    terminal.draw(|frame| self.render(frame))?;
                },
                Some(Ok(event)) = events.next() => self.handle_event(&ctx, &event),
                Some(message) = env.rx().recv() => self.handle_message(message),
            }
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let frame_area = frame.area();
        fill_bg(frame.buffer_mut(), frame_area, theme.bg());

        let entries = self
            .popup
            .as_ref()
            .and_then(|popup| popup.help())
            .or_else(|| self.widgets.last().and_then(|widget| widget.help()))
            .unwrap_or_default();
        let help_height = help::height(entries, frame.area());

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(help_height),
        ]);
        let [title_area, body_area, help_area] = frame.area().layout(&layout);

        let title = Line::styled(
            "State & City Manager",
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )
        .centered();
        frame.render_widget(title, title_area);

        if let Some(widget) = self.widgets.last() {
            widget.render(frame, body_area, theme);
        }

        if let Some(popup) = self.popup.as_ref() {
            let rect = popup.rect(body_area);
            frame.render_widget(Clear, rect);
            popup.render(frame, rect, theme);
        }

        self.render_toasts(frame, body_area, theme);
        help::render(entries, frame, help_area, theme);
    }

    fn render_toasts(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut bottom = area.bottom().saturating_sub(1);
        for active in self.toasts.iter().rev() {
            let height = 3u16;
            if bottom < area.y + height {
                break;
            }
            let message = active.toast.message.as_str();
            let width =
                (message.width() as u16 + 4).clamp(20, area.width.saturating_sub(4).max(20));
            let x = area.right().saturating_sub(width + 2);
            let y = bottom - height;
            let rect = Rect {
                x,
                y,
                width,
                height,
            };
            let color = match active.toast.kind {
                ToastKind::Info => theme.success(),
                ToastKind::Error => theme.error(),
            };
            frame.render_widget(Clear, rect);
            fill_bg(frame.buffer_mut(), rect, theme.panel_bg());
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.panel_bg()).fg(theme.text()));
            frame.render_widget(Paragraph::new(message).block(block), rect);
            bottom = y;
        }
    }

    fn expire_toasts(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|active| active.expires_at > now);
    }

    fn handle_event(&mut self, ctx: &UiCtx, event: &Event) {
        if let Some(popup) = self.popup.as_ref()
            && popup.handle_event(ctx, event)
        {
            return;
        }
        if let Some(widget) = self.widgets.last()
            && widget.handle_event(ctx, event)
        {
            return;
        }
        if let Some(key) = event.as_key_press_event() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('?') => {
                    let popup = HelpPopup::new(
                        self.widgets
                            .last()
                            .and_then(|widget| widget.help())
                            .unwrap_or_default(),
                    );
                    self.popup = Some(Box::new(popup));
                }
                _ => {}
            }
        }
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::SetPopup(popup) => self.popup = Some(popup),
            Message::DismissPopup => self.popup = None,
            Message::Toast(toast) => {
                let expires_at = Instant::now() + toast.duration;
                self.toasts.push(ActiveToast { toast, expires_at });
                if self.toasts.len() > Self::MAX_TOASTS {
                    self.toasts.remove(0);
                }
            }
        }
    }
}

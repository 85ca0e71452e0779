use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::widgets::Popup;

pub enum Message {
    SetPopup(Box<dyn Popup>),
    DismissPopup,
    Toast(Toast),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            duration: Duration::from_secs(3),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            duration: Duration::from_secs(4),
        }
    }
}

/// Cloneable handle widgets use to reach the app loop. Sends are fire and
/// forget; a closed channel only happens during shutdown.
#[derive(Clone)]
pub struct UiCtx {
    tx: UnboundedSender<Message>,
}

impl UiCtx {
    fn send(&self, msg: Message) {
        let _ = self.tx.send(msg);
    }

    pub fn set_popup(&self, popup: Box<dyn Popup>) {
        self.send(Message::SetPopup(popup));
    }

    pub fn dismiss_popup(&self) {
        self.send(Message::DismissPopup);
    }

    pub fn show_toast(&self, toast: Toast) {
        self.send(Message::Toast(toast));
    }
}

pub struct Env {
    tx: UiCtx,
    rx: UnboundedReceiver<Message>,
}

impl Env {
    pub fn new() -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Message>();
        Env {
            tx: UiCtx { tx },
            rx,
        }
    }

    pub fn tx(&self) -> UiCtx {
        self.tx.clone()
    }

    pub fn rx(&mut self) -> &mut UnboundedReceiver<Message> {
        &mut self.rx
    }
}

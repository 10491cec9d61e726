//! Toast notifications

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn bg_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-emerald-500",
            ToastKind::Error => "bg-red-500",
            ToastKind::Info => "bg-blue-500",
        }
    }
}

/// One visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    /// The host removes the toast after this long
    pub duration_ms: u32,
}

/// Currently visible notifications, oldest first
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    duration_ms: u32,
}

impl ToastQueue {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            duration_ms,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Toast {
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            duration_ms: self.duration_ms,
        };
        self.next_id += 1;
        self.toasts.push(toast.clone());
        toast
    }

    /// Remove a toast; returns false if it was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }
}

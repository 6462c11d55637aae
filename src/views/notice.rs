use std::time::{Duration, Instant};

/// How long a notice stays in the status row
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// User-visible feedback channel. Showing a notice never fails.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Records every notice in order. The CLI prints these; tests inspect them.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.level == NoticeLevel::Error)
    }
}

impl Notifier for NoticeLog {
    fn success(&mut self, message: &str) {
        tracing::info!(notice = message);
        self.notices.push(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        });
    }

    fn error(&mut self, message: &str) {
        tracing::warn!(notice = message);
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
        });
    }
}

/// The single transient notice shown by the TUI status row.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    current: Option<(Notice, Instant)>,
}

impl Toast {
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(n, _)| n)
    }

    /// Drop the notice once its time is up. Returns true if one was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|(_, shown)| now.duration_since(*shown) >= NOTICE_TTL)
        {
            self.current = None;
            return true;
        }
        false
    }

    fn show(&mut self, level: NoticeLevel, message: &str) {
        self.current = Some((
            Notice {
                level,
                message: message.to_string(),
            },
            Instant::now(),
        ));
    }
}

impl Notifier for Toast {
    fn success(&mut self, message: &str) {
        tracing::info!(notice = message);
        self.show(NoticeLevel::Success, message);
    }

    fn error(&mut self, message: &str) {
        tracing::warn!(notice = message);
        self.show(NoticeLevel::Error, message);
    }
}

//! Phase progress notifications

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a phase message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageLevel {
    /// Progress report
    Info,
    /// Recoverable problem
    Warning,
    /// The file could not be fully processed
    Error,
}

/// Notification emitted while a phase runs on one file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMessage {
    /// Severity
    pub level: MessageLevel,
    /// File the message is about
    pub path: PathBuf,
    /// Text of the message
    pub message: String,
}

impl fmt::Display for PhaseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Receiver of phase notifications
pub trait PhaseListener {
    /// Handle one notification
    fn notify(&mut self, message: PhaseMessage);

    /// Report progress
    fn info(&mut self, path: &Path, message: String) {
        self.notify(PhaseMessage {
            level: MessageLevel::Info,
            path: path.to_path_buf(),
            message,
        });
    }

    /// Report a recoverable problem
    fn warning(&mut self, path: &Path, message: String) {
        self.notify(PhaseMessage {
            level: MessageLevel::Warning,
            path: path.to_path_buf(),
            message,
        });
    }

    /// Report a failure
    fn error(&mut self, path: &Path, message: String) {
        self.notify(PhaseMessage {
            level: MessageLevel::Error,
            path: path.to_path_buf(),
            message,
        });
    }
}

/// Listener that keeps every message, split by level
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    infos: Vec<PhaseMessage>,
    warnings: Vec<PhaseMessage>,
    errors: Vec<PhaseMessage>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Info messages in arrival order
    pub fn infos(&self) -> &[PhaseMessage] {
        &self.infos
    }

    /// Warning messages in arrival order
    pub fn warnings(&self) -> &[PhaseMessage] {
        &self.warnings
    }

    /// Error messages in arrival order
    pub fn errors(&self) -> &[PhaseMessage] {
        &self.errors
    }

    /// Check if any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl PhaseListener for MessageLog {
    fn notify(&mut self, message: PhaseMessage) {
        match message.level {
            MessageLevel::Info => self.infos.push(message),
            MessageLevel::Warning => self.warnings.push(message),
            MessageLevel::Error => self.errors.push(message),
        }
    }
}

/// Listener that forwards every message to `tracing` and keeps a [`MessageLog`]
#[derive(Clone, Debug, Default)]
pub struct LoggingListener {
    log: MessageLog,
}

impl LoggingListener {
    /// Create a listener with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far
    pub fn log(&self) -> &MessageLog {
        &self.log
    }
}

impl PhaseListener for LoggingListener {
    fn notify(&mut self, message: PhaseMessage) {
        let path = message.path.display();
        match message.level {
            MessageLevel::Info => tracing::info!(path = %path, "{}", message.message),
            MessageLevel::Warning => tracing::warn!(path = %path, "{}", message.message),
            MessageLevel::Error => tracing::error!(path = %path, "{}", message.message),
        }
        self.log.notify(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_log_splits_levels() {
        let mut log = MessageLog::new();
        let path = Path::new("g.dot");

        log.info(path, "parsed".to_string());
        log.warning(path, "odd".to_string());
        log.error(path, "broken".to_string());
        log.info(path, "done".to_string());

        assert_eq!(log.infos().len(), 2);
        assert_eq!(log.warnings().len(), 1);
        assert_eq!(log.errors()[0].message, "broken");
        assert!(log.has_errors());
    }

    #[test]
    fn test_logging_listener_records() {
        let mut listener = LoggingListener::new();
        listener.info(Path::new("a.dot"), "ok".to_string());

        assert_eq!(listener.log().infos().len(), 1);
        assert!(!listener.log().has_errors());
        assert_eq!(listener.log().infos()[0].to_string(), "a.dot: ok");
    }
}

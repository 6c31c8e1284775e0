//! Event log shown beside each dashboard: canned script lines merged with
//! whatever the operator types during the current loop.

use crate::error::LogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogKind {
    Info,
    Warning,
    Error,
    Action,
    Success,
    User,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Warning => "warning",
            LogKind::Error => "error",
            LogKind::Action => "action",
            LogKind::Success => "success",
            LogKind::User => "user",
        }
    }
}

/// Narrative line revealed once the clock reaches `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedEntry {
    pub at: u32,
    pub message: &'static str,
    pub kind: LogKind,
}

impl ScriptedEntry {
    pub const fn new(at: u32, message: &'static str, kind: LogKind) -> Self {
        Self { at, message, kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEntry {
    pub id: u64,
    pub message: String,
    pub at: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSource {
    System,
    User(u64),
}

/// One merged, display-ready log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub at: u32,
    pub message: &'a str,
    pub kind: LogKind,
    pub source: LogSource,
}

/// Operator messages for the current loop.
#[derive(Clone, Debug, Default)]
pub struct LogBook {
    entries: Vec<UserEntry>,
    next_id: u64,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operator message stamped with the current story second.
    /// Surrounding whitespace is trimmed; blank input is refused.
    pub fn submit(&mut self, text: &str, seconds: u32) -> Result<u64, LogError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(LogError::EmptyMessage);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(UserEntry {
            id,
            message: message.to_owned(),
            at: seconds,
        });
        Ok(id)
    }

    /// Drop every operator message. Ids keep counting so they stay unique
    /// across loops.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn entries(&self) -> &[UserEntry] {
        &self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script lines already triggered at `seconds`, plus all operator lines,
    /// sorted by timestamp. The sort is stable: on equal timestamps script
    /// lines come first, then operator lines in submission order.
    pub fn merged<'a>(&'a self, script: &'a [ScriptedEntry], seconds: u32) -> Vec<LogLine<'a>> {
        let mut lines: Vec<LogLine<'a>> = script
            .iter()
            .filter(|entry| seconds >= entry.at)
            .map(|entry| LogLine {
                at: entry.at,
                message: entry.message,
                kind: entry.kind,
                source: LogSource::System,
            })
            .chain(self.entries.iter().map(|entry| LogLine {
                at: entry.at,
                message: entry.message.as_str(),
                kind: LogKind::User,
                source: LogSource::User(entry.id),
            }))
            .collect();
        lines.sort_by_key(|line| line.at);
        lines
    }
}

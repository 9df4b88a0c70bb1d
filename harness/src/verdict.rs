use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one asserted behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Warn,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
        };
        f.write_str(label)
    }
}

/// A recorded test outcome. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    name: String,
    status: Status,
    message: Option<String>,
}

impl Verdict {
    pub fn new(name: impl Into<String>, status: Status, message: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.name)?;
        if let Some(message) = &self.message {
            write!(f, "\n   {message}")?;
        }
        Ok(())
    }
}

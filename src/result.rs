use serde::Serialize;
use std::fmt;

/// Why an operation reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A copy or other filesystem call failed
    Transfer,
    /// A safety guard refused to act (newer local data, downloads disabled)
    PolicyAbort,
    /// Something that was searched for could not be found
    NotFound,
}

/// Outcome of a push, pull or backup.
///
/// Messages are kept in the order they were added. The success flag starts out
/// `true` and is cleared by the first failure message; it never flips back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    success: bool,
    messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<FailureKind>,
}

impl Default for OperationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationResult {
    pub fn new() -> Self {
        OperationResult {
            success: true,
            messages: Vec::new(),
            failure: None,
        }
    }

    /// Append an informational message. Empty messages are dropped.
    pub fn add_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.messages.push(message);
    }

    /// Append a message and mark the operation as failed.
    pub fn add_failure_message(&mut self, kind: FailureKind, message: impl Into<String>) {
        self.add_message(message);
        self.success = false;
        // the first failure decides the kind
        self.failure.get_or_insert(kind);
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn is_policy_abort(&self) -> bool {
        self.failure == Some(FailureKind::PolicyAbort)
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

use std::fmt::{Display, Formatter};

/// Failure categories for the analysis pipeline, ordered by process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl MirrorErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "INPUT-VALIDATION",
            Self::IoSystemError => "IO-SYSTEM",
            Self::ComputationError => "COMPUTATION",
            Self::InternalError => "INTERNAL",
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }
}

impl Display for MirrorErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Pipeline error carrying a stable diagnostic code and a human message.
///
/// Codes are dotted identifiers scoped by category prefix (`INPUT.*`, `IO.*`,
/// `RUN.*`, `SYS.*`) and stay stable across releases so scripted callers can
/// match on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MirrorError {
    category: MirrorErrorCategory,
    code: String,
    message: String,
}

impl MirrorError {
    pub fn input_validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: MirrorErrorCategory::InputValidationError,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn io_system(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: MirrorErrorCategory::IoSystemError,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn computation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: MirrorErrorCategory::ComputationError,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: MirrorErrorCategory::InternalError,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> MirrorErrorCategory {
        self.category
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// Single stderr line reported to the operator before the process exits.
    pub fn diagnostic_line(&self) -> String {
        format!(
            "ERROR [{}] {}: {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

pub type ComputeResult<T> = Result<T, MirrorError>;

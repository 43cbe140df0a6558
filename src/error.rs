use crate::domain::ModelFamily;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Engine-level fitting errors.
///
/// `UnfittableModel` is recovered locally by the selector (the family is simply
/// excluded from the candidate pool); `NoViableModel` means every family failed
/// and is surfaced to the caller as a terminal failure for that invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    UnfittableModel {
        family: ModelFamily,
        reason: String,
    },
    NoViableModel,
}

impl FitError {
    pub fn unfittable(family: ModelFamily, reason: impl Into<String>) -> Self {
        FitError::UnfittableModel {
            family,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::UnfittableModel { family, reason } => {
                write!(f, "{} model is unfittable: {reason}", family.display_name())
            }
            FitError::NoViableModel => {
                write!(f, "No model family could be fitted to the sample points.")
            }
        }
    }
}

impl std::error::Error for FitError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::UnfittableModel { .. } => 4,
            FitError::NoViableModel => 3,
        };
        AppError::new(code, err.to_string())
    }
}

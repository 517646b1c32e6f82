use crate::data::FetchError;

/// Exit code for invalid arguments or configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for an unrecoverable feed download failure.
pub const EXIT_FETCH: u8 = 3;

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

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        Self::new(EXIT_FETCH, format!("Feed download failed: {err}"))
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

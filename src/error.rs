use std::path::PathBuf;
use thiserror::Error;

use crate::actions::Action;
use crate::i18n::{Language, Localized};
use crate::location::LocationError;
use crate::types::Status;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file at {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode config for {path}: {source}")]
    ConfigEncode {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("Unsupported language: {0} (expected en or ar)")]
    UnsupportedLanguage(String),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("{}", .0.en)]
    Validation(Localized),

    #[error("You do not have permission to {}", .0.label().en)]
    Forbidden(Action),

    #[error("{}", LOGIN_REQUIRED.en)]
    LoginRequired,

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("{}", .0.message().en)]
    Location(LocationError),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub const LOGIN_REQUIRED: Localized = Localized::new(
    "Login required. Please sign in first.",
    "تسجيل الدخول مطلوب. يرجى تسجيل الدخول أولاً.",
);

impl ReporterError {
    /// Error text in the given display language. Variants without an Arabic
    /// rendering fall back to the English `Display` text.
    pub fn localized(&self, language: Language) -> String {
        match (self, language) {
            (_, Language::En) => self.to_string(),
            (Self::Validation(message), Language::Ar) => message.ar.to_string(),
            (Self::Forbidden(action), Language::Ar) => {
                format!("ليس لديك صلاحية {}", action.label().ar)
            }
            (Self::LoginRequired, Language::Ar) => LOGIN_REQUIRED.ar.to_string(),
            (Self::IssueNotFound(id), Language::Ar) => format!("المشكلة غير موجودة: {id}"),
            (Self::DraftNotFound(id), Language::Ar) => format!("المسودة غير موجودة: {id}"),
            (Self::InvalidTransition { from, to }, Language::Ar) => format!(
                "لا يمكن تغيير الحالة من {} إلى {}",
                from.label(Language::Ar),
                to.label(Language::Ar)
            ),
            (Self::Location(reason), Language::Ar) => reason.message().ar.to_string(),
            (_, Language::Ar) => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReporterError>;

//! Display language selection and bilingual text.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{Storage, LANGUAGE_KEY};

/// Languages the interface can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

impl Language {
    /// Two-letter code stored under the `language` key.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// Text direction for the language.
    pub fn direction(self) -> &'static str {
        match self {
            Language::En => "ltr",
            Language::Ar => "rtl",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "العربية",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// A fixed message available in both interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub en: &'static str,
    pub ar: &'static str,
}

impl Localized {
    pub const fn new(en: &'static str, ar: &'static str) -> Self {
        Self { en, ar }
    }

    pub fn get(self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Ar => self.ar,
        }
    }
}

/// Read the persisted language, falling back when the key is missing or holds
/// an unknown code.
pub fn load<S: Storage>(storage: &S, fallback: Language) -> Language {
    storage
        .get_item(LANGUAGE_KEY)
        .and_then(|code| Language::from_code(&code))
        .unwrap_or(fallback)
}

/// Persist a language switch.
pub fn save<S: Storage>(storage: &mut S, language: Language) -> Result<()> {
    tracing::debug!(language = language.code(), "switching language");
    storage.set_item(LANGUAGE_KEY, language.code())
}

/// Field labels shared by the detail views.
pub mod labels {
    use super::Localized;

    pub const STATUS: Localized = Localized::new("Status:", "الحالة:");
    pub const REASON: Localized = Localized::new("Reason:", "السبب:");
    pub const CATEGORY: Localized = Localized::new("Category:", "الفئة:");
    pub const DEPARTMENT: Localized = Localized::new("Department:", "القسم:");
    pub const LOCATION: Localized = Localized::new("Location:", "الموقع:");
    pub const MAP: Localized = Localized::new("Map:", "الخريطة:");
    pub const REPORTED: Localized = Localized::new("Reported:", "تاريخ البلاغ:");
    pub const VOTES: Localized = Localized::new("Votes:", "الأصوات:");
    pub const COMMENTS: Localized = Localized::new("Comments:", "التعليقات:");
    pub const ATTACHMENTS: Localized = Localized::new("Attachments:", "المرفقات:");
    pub const ISSUE: Localized = Localized::new("Issue:", "المشكلة:");
    pub const SAVED: Localized = Localized::new("Saved:", "تاريخ الحفظ:");
    pub const EMAIL: Localized = Localized::new("Email:", "البريد الإلكتروني:");
    pub const ROLE: Localized = Localized::new("Role:", "نوع الحساب:");
    pub const EMPLOYEE_ID: Localized = Localized::new("Employee ID:", "رقم الوظيفة:");
    pub const NATIONAL_ID: Localized = Localized::new("National ID:", "الرقم الوطني:");
    pub const PHONE: Localized = Localized::new("Phone:", "الهاتف:");
}

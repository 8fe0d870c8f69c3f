//! Input checks applied by the sign-in, sign-up, password-reset and report
//! forms before anything reaches the session manager or the store.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReporterError, Result};
use crate::i18n::Localized;
use crate::types::{Attachment, BilingualText, Category, Department, IssuePatch};

/// Largest accepted attachment, in bytes.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

pub const INVALID_EMAIL: Localized = Localized::new(
    "Please enter a valid email address",
    "يرجى إدخال بريد إلكتروني صالح",
);
pub const INVALID_EMPLOYEE_ID: Localized = Localized::new(
    "Employee ID must be 4-12 letters, digits or hyphens",
    "يجب أن يتكون رقم الوظيفة من 4 إلى 12 حرفًا أو رقمًا أو شرطة",
);
pub const WEAK_PASSWORD: Localized = Localized::new(
    "Password must be at least 8 characters and include an uppercase letter, a lowercase letter and a number",
    "يجب أن تتكون كلمة المرور من 8 أحرف على الأقل وتحتوي على حرف كبير وحرف صغير ورقم",
);
pub const INVALID_USERNAME: Localized = Localized::new(
    "Username must be 3-16 letters or digits",
    "يجب أن يتكون اسم المستخدم من 3 إلى 16 حرفًا أو رقمًا",
);
pub const INVALID_NATIONAL_ID: Localized = Localized::new(
    "National ID must be exactly 10 digits",
    "يجب أن يتكون الرقم الوطني من 10 أرقام",
);
pub const INVALID_PHONE: Localized = Localized::new(
    "Please enter a valid phone number",
    "يرجى إدخال رقم هاتف صالح",
);
pub const UNKNOWN_DEPARTMENT: Localized = Localized::new(
    "Please choose a department from the list",
    "يرجى اختيار قسم من القائمة",
);
pub const UNKNOWN_CATEGORY: Localized = Localized::new(
    "Please choose a category from the list",
    "يرجى اختيار فئة من القائمة",
);
pub const MISSING_REPORT_FIELDS: Localized = Localized::new(
    "Please fill in all required fields.",
    "يرجى ملء جميع الحقول المطلوبة.",
);
pub const FILE_TOO_LARGE: Localized = Localized::new(
    "File exceeds the 10MB size limit and was not added.",
    "الملف يتجاوز حد الحجم 10 ميجابايت ولم تتم إضافته.",
);
pub const UNSUPPORTED_FILE: Localized = Localized::new(
    "Only JPEG, PNG and PDF files can be attached.",
    "يمكن إرفاق ملفات JPEG و PNG و PDF فقط.",
);

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});
static EMPLOYEE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{4,12}$").expect("employee id pattern"));
static PASSWORD_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("password pattern"));
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,16}$").expect("username pattern"));
static NATIONAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("national id pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{8,14}$").expect("phone pattern"));

fn check(ok: bool, message: Localized) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(ReporterError::Validation(message))
    }
}

pub fn email(value: &str) -> Result<()> {
    check(EMAIL.is_match(value) && value.len() <= 254, INVALID_EMAIL)
}

pub fn employee_id(value: &str) -> Result<()> {
    check(EMPLOYEE_ID.is_match(value), INVALID_EMPLOYEE_ID)
}

/// At least 8 characters from the allowed set with one lowercase letter,
/// one uppercase letter and one digit.
pub fn password(value: &str) -> Result<()> {
    let ok = PASSWORD_CHARS.is_match(value)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit());
    check(ok, WEAK_PASSWORD)
}

pub fn username(value: &str) -> Result<()> {
    check(USERNAME.is_match(value), INVALID_USERNAME)
}

pub fn national_id(value: &str) -> Result<()> {
    check(NATIONAL_ID.is_match(value), INVALID_NATIONAL_ID)
}

pub fn phone_number(value: &str) -> Result<()> {
    check(PHONE.is_match(value), INVALID_PHONE)
}

pub fn department(value: &Department) -> Result<()> {
    check(value.is_recognized(), UNKNOWN_DEPARTMENT)
}

pub fn category(value: &Category) -> Result<()> {
    check(value.is_recognized(), UNKNOWN_CATEGORY)
}

/// Category and department in an edit must come from the fixed lists.
pub fn patch(value: &IssuePatch) -> Result<()> {
    if let Some(value) = &value.category {
        category(value)?;
    }
    if let Some(value) = &value.department {
        department(value)?;
    }
    Ok(())
}

/// Fields of the "report an issue" form.
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: Option<Category>,
    pub department: Option<Department>,
}

impl ReportForm {
    /// Title, description, category, department and location are all
    /// required. Category and department must come from the fixed lists.
    pub fn validate(&self) -> Result<()> {
        let complete = !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.location.trim().is_empty()
            && self.category.is_some()
            && self.department.is_some();
        check(complete, MISSING_REPORT_FIELDS)?;

        if let Some(value) = &self.category {
            category(value)?;
        }
        if let Some(value) = &self.department {
            department(value)?;
        }
        Ok(())
    }

    pub fn title_text(&self) -> BilingualText {
        BilingualText::same(self.title.trim())
    }

    pub fn description_text(&self) -> BilingualText {
        BilingualText::same(self.description.trim())
    }

    pub fn location_text(&self) -> BilingualText {
        BilingualText::same(self.location.trim())
    }
}

fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "pdf" => "application/pdf",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Check a single file and describe it as an attachment.
pub fn attachment(path: &Path) -> Result<Attachment> {
    let metadata = std::fs::metadata(path).map_err(|e| ReporterError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let content_type = guess_content_type(&file_name);
    check(ALLOWED_CONTENT_TYPES.contains(&content_type), UNSUPPORTED_FILE)?;
    check(metadata.len() <= MAX_ATTACHMENT_BYTES, FILE_TOO_LARGE)?;

    Ok(Attachment {
        file_name,
        path: path.display().to_string(),
        content_type: content_type.to_string(),
        size: metadata.len(),
    })
}

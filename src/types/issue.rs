use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_key, Attachment, Department};
use crate::i18n::{Language, Localized};
use crate::location::Coordinates;

/// Text carried in both interface languages.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BilingualText {
    pub en: String,
    pub ar: String,
}

impl BilingualText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Same text in both slots, for input entered in a single language.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            ar: text,
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Roads,
    Utilities,
    Sanitation,
    Safety,
    #[serde(rename = "Public Spaces")]
    PublicSpaces,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Roads,
        Category::Utilities,
        Category::Sanitation,
        Category::Safety,
        Category::PublicSpaces,
        Category::Other,
    ];

    pub fn label(&self, language: Language) -> &str {
        let label = match self {
            Category::Roads => Localized::new("Roads", "الطرق"),
            Category::Utilities => Localized::new("Utilities", "المرافق"),
            Category::Sanitation => Localized::new("Sanitation", "النظافة"),
            Category::Safety => Localized::new("Safety", "السلامة"),
            Category::PublicSpaces => Localized::new("Public Spaces", "الأماكن العامة"),
            Category::Other => Localized::new("Other", "أخرى"),
            Category::Unrecognized(raw) => return raw,
        };
        label.get(language)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Language::En))
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_key(s);
        let found = Category::ALL
            .into_iter()
            .find(|category| normalize_key(category.label(Language::En)) == wanted);
        Ok(found.unwrap_or_else(|| Category::Unrecognized(s.to_string())))
    }
}

/// Review state of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Resolved,
    Rejected,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Resolved,
        Status::Rejected,
    ];

    pub fn key(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
            Status::Rejected => "rejected",
            Status::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self, language: Language) -> &str {
        let label = match self {
            Status::Pending => Localized::new("Pending", "معلق"),
            Status::InProgress => Localized::new("In Progress", "قيد التنفيذ"),
            Status::Resolved => Localized::new("Resolved", "تم الحل"),
            Status::Rejected => Localized::new("Rejected", "مرفوض"),
            Status::Unrecognized(raw) => return raw,
        };
        label.get(language)
    }

    /// Allowed review decisions: approve, reject, revert and resolve.
    pub fn can_transition_to(&self, target: &Status) -> bool {
        matches!(
            (self, target),
            (Status::Pending, Status::InProgress)
                | (Status::Pending, Status::Rejected)
                | (Status::InProgress, Status::Pending)
                | (Status::Rejected, Status::Pending)
                | (Status::InProgress, Status::Resolved)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_key(s);
        let found = Status::ALL
            .into_iter()
            .find(|status| normalize_key(status.key()) == wanted);
        Ok(found.unwrap_or_else(|| Status::Unrecognized(s.to_string())))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: BilingualText,
    pub description: BilingualText,
    pub location: BilingualText,
    pub category: Category,
    #[serde(default)]
    pub department: Department,
    pub status: Status,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub comments: u32,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Partial update of an issue's editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuePatch {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub location_en: Option<String>,
    pub location_ar: Option<String>,
    pub category: Option<Category>,
    pub department: Option<Department>,
}

impl IssuePatch {
    pub fn is_empty(&self) -> bool {
        *self == IssuePatch::default()
    }

    pub fn apply(&self, issue: &mut Issue) {
        fn set(slot: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }

        set(&mut issue.title.en, &self.title_en);
        set(&mut issue.title.ar, &self.title_ar);
        set(&mut issue.description.en, &self.description_en);
        set(&mut issue.description.ar, &self.description_ar);
        set(&mut issue.location.en, &self.location_en);
        set(&mut issue.location.ar, &self.location_ar);
        if let Some(category) = &self.category {
            issue.category = category.clone();
        }
        if let Some(department) = &self.department {
            issue.department = department.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_keys() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            r#""in-progress""#
        );
        let status: Status = serde_json::from_str(r#""inProgress""#).unwrap();
        assert_eq!(status, Status::Unrecognized("inProgress".to_string()));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("roads".parse::<Category>().unwrap(), Category::Roads);
        assert_eq!(
            "public-spaces".parse::<Category>().unwrap(),
            Category::PublicSpaces
        );
        assert_eq!(
            "Infrastructure".parse::<Category>().unwrap(),
            Category::Unrecognized("Infrastructure".to_string())
        );
    }

    #[test]
    fn test_category_serde_uses_display_name() {
        assert_eq!(
            serde_json::to_string(&Category::PublicSpaces).unwrap(),
            r#""Public Spaces""#
        );
    }

    #[test]
    fn test_transitions() {
        assert!(Status::Pending.can_transition_to(&Status::InProgress));
        assert!(Status::Pending.can_transition_to(&Status::Rejected));
        assert!(Status::Rejected.can_transition_to(&Status::Pending));
        assert!(Status::InProgress.can_transition_to(&Status::Resolved));
        assert!(!Status::Pending.can_transition_to(&Status::Resolved));
        assert!(!Status::Resolved.can_transition_to(&Status::Pending));
        assert!(!Status::Rejected.can_transition_to(&Status::InProgress));
    }

    #[test]
    fn test_patch_apply_only_touches_given_fields() {
        let mut issue: Issue = serde_json::from_value(serde_json::json!({
            "id": "1",
            "title": { "en": "Pothole", "ar": "حفرة" },
            "description": { "en": "Deep", "ar": "عميقة" },
            "location": { "en": "Main St", "ar": "الشارع الرئيسي" },
            "category": "Roads",
            "status": "pending",
            "date": "2025-03-20T10:00:00Z",
            "userId": "u1"
        }))
        .unwrap();
        assert_eq!(issue.department, Department::PublicWorks);

        let patch = IssuePatch {
            title_en: Some("Big pothole".to_string()),
            department: Some(Department::Transportation),
            ..IssuePatch::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut issue);

        assert_eq!(issue.title.en, "Big pothole");
        assert_eq!(issue.title.ar, "حفرة");
        assert_eq!(issue.department, Department::Transportation);
        assert_eq!(issue.category, Category::Roads);
    }
}

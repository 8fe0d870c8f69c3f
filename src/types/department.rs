use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize_key;
use crate::i18n::{Language, Localized};

/// Government departments that issues are routed to.
///
/// Stored values are read with the same rules as [`FromStr`], so records
/// may hold either the key or the English name. A blank value means
/// Public Works.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum Department {
    Transportation,
    Environment,
    #[default]
    PublicWorks,
    WaterAuthority,
    Electricity,
    Communication,
    Health,
    Other,
    /// A value outside the known set, kept verbatim. Never matches a filter.
    #[serde(untagged)]
    Unrecognized(String),
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Transportation,
        Department::Environment,
        Department::PublicWorks,
        Department::WaterAuthority,
        Department::Electricity,
        Department::Communication,
        Department::Health,
        Department::Other,
    ];

    /// Stable key used in stored records and on the command line.
    pub fn key(&self) -> &str {
        match self {
            Department::Transportation => "transportation",
            Department::Environment => "environment",
            Department::PublicWorks => "publicWorks",
            Department::WaterAuthority => "waterAuthority",
            Department::Electricity => "electricity",
            Department::Communication => "communication",
            Department::Health => "health",
            Department::Other => "other",
            Department::Unrecognized(raw) => raw,
        }
    }

    fn names(&self) -> Option<Localized> {
        let names = match self {
            Department::Transportation => Localized::new("Transportation", "النقل"),
            Department::Environment => Localized::new("Environment", "البيئة"),
            Department::PublicWorks => Localized::new("Public Works", "الأشغال العامة"),
            Department::WaterAuthority => Localized::new("Water Authority", "سلطة المياه"),
            Department::Electricity => Localized::new("Electricity Department", "قسم الكهرباء"),
            Department::Communication => Localized::new("Communication", "الاتصالات"),
            Department::Health => Localized::new("Health Department", "قسم الصحة"),
            Department::Other => Localized::new("Other", "أخرى"),
            Department::Unrecognized(_) => return None,
        };
        Some(names)
    }

    pub fn label(&self, language: Language) -> &str {
        match self.names() {
            Some(names) => names.get(language),
            None => self.key(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Department::Unrecognized(_))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Language::En))
    }
}

impl From<&str> for Department {
    /// Accepts the key (`publicWorks`) or the English name (`Public Works`),
    /// ignoring case, spaces and dashes.
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            return Department::PublicWorks;
        }
        let wanted = normalize_key(s);
        let found = Department::ALL.into_iter().find(|dept| {
            normalize_key(dept.key()) == wanted || normalize_key(dept.label(Language::En)) == wanted
        });
        found.unwrap_or_else(|| Department::Unrecognized(s.to_string()))
    }
}

impl From<String> for Department {
    fn from(s: String) -> Self {
        Department::from(s.as_str())
    }
}

impl FromStr for Department {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Department::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_and_name() {
        assert_eq!("publicWorks".parse::<Department>().unwrap(), Department::PublicWorks);
        assert_eq!("Public Works".parse::<Department>().unwrap(), Department::PublicWorks);
        assert_eq!("public-works".parse::<Department>().unwrap(), Department::PublicWorks);
        assert_eq!(
            "Electricity Department".parse::<Department>().unwrap(),
            Department::Electricity
        );
    }

    #[test]
    fn test_parse_unknown_is_kept() {
        let dept: Department = "Municipality".parse().unwrap();
        assert_eq!(dept, Department::Unrecognized("Municipality".to_string()));
        assert!(!dept.is_recognized());
        assert_eq!(dept.label(Language::Ar), "Municipality");
    }

    #[test]
    fn test_serde_uses_keys_and_accepts_names() {
        assert_eq!(
            serde_json::to_string(&Department::WaterAuthority).unwrap(),
            r#""waterAuthority""#
        );
        let parsed: Department = serde_json::from_str(r#""Health Department""#).unwrap();
        assert_eq!(parsed, Department::Health);
        let unknown: Department = serde_json::from_str(r#""Parks""#).unwrap();
        assert_eq!(unknown, Department::Unrecognized("Parks".to_string()));
    }

    #[test]
    fn test_blank_stored_department_is_public_works() {
        let empty: Department = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(empty, Department::PublicWorks);
        let blank: Department = serde_json::from_str(r#""  ""#).unwrap();
        assert_eq!(blank, Department::PublicWorks);
        assert_eq!("".parse::<Department>().unwrap(), Department::PublicWorks);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Department::PublicWorks.label(Language::Ar), "الأشغال العامة");
        assert_eq!(Department::default(), Department::PublicWorks);
    }
}

//! The signed-in user, persisted under the `user` storage key.
//!
//! Credentials are not verified anywhere: any non-empty identifier and
//! password produce a session. The async operations stand in for a network
//! round trip and resolve in-process.

use crate::error::{ReporterError, Result};
use crate::i18n::Localized;
use crate::routes::Route;
use crate::storage::{Storage, USER_KEY};
use crate::types::{new_user_id, Department, Role, User};

pub const MISSING_CREDENTIALS: Localized = Localized::new(
    "Email and password are required",
    "البريد الإلكتروني وكلمة المرور مطلوبان",
);
pub const DEPARTMENT_REQUIRED: Localized = Localized::new(
    "Government users must specify a department",
    "يجب تحديد القسم للمستخدمين الحكوميين",
);
pub const REGULAR_PROFILE_INCOMPLETE: Localized = Localized::new(
    "National ID, username, and phone number are required for regular users",
    "الرقم الوطني، اسم المستخدم، ورقم الهاتف مطلوبة للمستخدمين العاديين",
);
pub const SIGNUP_DEPARTMENT_REQUIRED: Localized = Localized::new(
    "Department is required for government users",
    "القسم مطلوب للمستخدمين الحكوميين",
);
pub const EMPLOYEE_ID_REQUIRED: Localized = Localized::new(
    "Employee ID is required for government users",
    "رقم الوظيفة مطلوب للمستخدمين الحكوميين",
);
pub const RESET_FAILED_REGULAR: Localized = Localized::new(
    "Failed to send password reset link. Please check your email.",
    "فشل إرسال رابط استعادة كلمة المرور. تحقق من بريدك الإلكتروني.",
);
pub const RESET_FAILED_GOVERNMENT: Localized = Localized::new(
    "Failed to send password reset request. Please check your employee ID.",
    "فشل إرسال طلب استعادة كلمة المرور. تحقق من رقم الوظيفة.",
);

/// Identifiers with this suffix sign in as government users unless a role
/// is forced.
const GOVERNMENT_SUFFIX: &str = ".gov";

/// Everything the sign-up form collects.
#[derive(Debug, Clone)]
pub struct SignUpProfile {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub username: Option<String>,
    pub national_id: Option<String>,
    pub phone_number: Option<String>,
    pub department: Option<Department>,
    pub employee_id: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

pub struct SessionManager<S: Storage> {
    storage: S,
    user: Option<User>,
    loading: bool,
}

impl<S: Storage> SessionManager<S> {
    /// A manager that has not looked at storage yet. It reports loading
    /// until [`SessionManager::restore`] runs.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            loading: true,
        }
    }

    /// Create a manager and restore any persisted user.
    pub fn open(storage: S) -> Self {
        let mut session = Self::new(storage);
        session.restore();
        session
    }

    /// Load the persisted user. A missing or unreadable record leaves the
    /// session anonymous.
    pub fn restore(&mut self) {
        self.loading = true;
        self.user = match self.storage.get_item(USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, role = %user.role(), "restored session");
                    Some(user)
                }
                Err(err) => {
                    tracing::warn!(%err, "ignoring unreadable stored user");
                    None
                }
            },
            None => None,
        };
        self.loading = false;
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Sign in and return the landing route for the resulting role.
    pub async fn sign_in(
        &mut self,
        identifier: &str,
        password: &str,
        department: Option<Department>,
        forced_role: Option<Role>,
    ) -> Result<Route> {
        self.loading = true;
        tokio::task::yield_now().await;
        let result = self.try_sign_in(identifier, password, department, forced_role);
        self.loading = false;

        if let Err(err) = &result {
            tracing::warn!(%err, "sign in rejected");
        }
        result
    }

    fn try_sign_in(
        &mut self,
        identifier: &str,
        password: &str,
        department: Option<Department>,
        forced_role: Option<Role>,
    ) -> Result<Route> {
        if identifier.is_empty() || password.is_empty() {
            return Err(ReporterError::Validation(MISSING_CREDENTIALS));
        }

        let role = forced_role.unwrap_or(if identifier.ends_with(GOVERNMENT_SUFFIX) {
            Role::Government
        } else {
            Role::Regular
        });

        let user = match role {
            Role::Government => {
                let department =
                    department.ok_or(ReporterError::Validation(DEPARTMENT_REQUIRED))?;
                User::government(new_user_id(), identifier, department)
            }
            Role::Regular => User::regular(new_user_id(), identifier),
        };

        self.establish(user)
    }

    pub async fn sign_up(&mut self, profile: SignUpProfile) -> Result<Route> {
        self.loading = true;
        tokio::task::yield_now().await;
        let result = self.try_sign_up(profile);
        self.loading = false;

        if let Err(err) = &result {
            tracing::warn!(%err, "sign up rejected");
        }
        result
    }

    fn try_sign_up(&mut self, profile: SignUpProfile) -> Result<Route> {
        if profile.email.is_empty() || profile.password.is_empty() {
            return Err(ReporterError::Validation(MISSING_CREDENTIALS));
        }

        let mut user = match profile.role {
            Role::Regular => {
                if !present(&profile.national_id)
                    || !present(&profile.username)
                    || !present(&profile.phone_number)
                {
                    return Err(ReporterError::Validation(REGULAR_PROFILE_INCOMPLETE));
                }
                User::regular(new_user_id(), profile.email)
            }
            Role::Government => {
                let department = profile
                    .department
                    .ok_or(ReporterError::Validation(SIGNUP_DEPARTMENT_REQUIRED))?;
                if !present(&profile.employee_id) {
                    return Err(ReporterError::Validation(EMPLOYEE_ID_REQUIRED));
                }
                User::government(new_user_id(), profile.email, department)
            }
        };

        user.username = profile.username;
        user.national_id = profile.national_id;
        user.phone_number = profile.phone_number;
        user.employee_id = profile.employee_id;

        self.establish(user)
    }

    /// Write the user through to storage and make it current.
    fn establish(&mut self, user: User) -> Result<Route> {
        let serialized = serde_json::to_string(&user)?;
        self.storage.set_item(USER_KEY, &serialized)?;

        tracing::info!(user_id = %user.id, role = %user.role(), "signed in");
        let landing = Route::landing_for(user.role());
        self.user = Some(user);
        Ok(landing)
    }

    /// Clear the session. Calling it while anonymous is harmless.
    pub fn sign_out(&mut self) -> Result<Route> {
        self.storage.remove_item(USER_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        Ok(Route::SignIn)
    }

    /// Simulated password reset. Nothing is delivered.
    pub async fn request_password_reset(&self, identifier: &str, role: Role) -> Result<()> {
        tokio::task::yield_now().await;

        if identifier.trim().is_empty() {
            let message = match role {
                Role::Regular => RESET_FAILED_REGULAR,
                Role::Government => RESET_FAILED_GOVERNMENT,
            };
            tracing::warn!(%role, "password reset requested without identifier");
            return Err(ReporterError::Validation(message));
        }

        tracing::info!(%role, "password reset requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn anonymous() -> SessionManager<MemoryStorage> {
        SessionManager::open(MemoryStorage::default())
    }

    fn assert_validation<T: std::fmt::Debug>(result: Result<T>, expected: Localized) {
        match result {
            Err(ReporterError::Validation(message)) => assert_eq!(message, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_session_is_loading_until_restored() {
        let mut session = SessionManager::new(MemoryStorage::default());
        assert!(session.is_loading());
        session.restore();
        assert!(!session.is_loading());
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_requires_credentials() {
        let mut session = anonymous();
        assert_validation(
            session.sign_in("", "x", None, Some(Role::Regular)).await,
            MISSING_CREDENTIALS,
        );
        assert_validation(session.sign_in("a@b.com", "", None, None).await, MISSING_CREDENTIALS);
        assert!(session.current().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_forced_government_needs_department() {
        let mut session = anonymous();
        assert_validation(
            session
                .sign_in("a@b.com", "pw", None, Some(Role::Government))
                .await,
            DEPARTMENT_REQUIRED,
        );
        assert!(session.storage().get_item(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_role_inferred_from_domain() {
        let mut session = anonymous();
        let landing = session
            .sign_in("officer@city.gov", "pw", Some(Department::Health), None)
            .await
            .unwrap();
        assert_eq!(landing, Route::Issues);
        let user = session.current().unwrap();
        assert_eq!(user.role(), Role::Government);
        assert_eq!(user.department(), Some(&Department::Health));

        let landing = session.sign_in("citizen@mail.com", "pw", None, None).await.unwrap();
        assert_eq!(landing, Route::Home);
        assert_eq!(session.current().unwrap().role(), Role::Regular);
    }

    #[tokio::test]
    async fn test_regular_sign_in_drops_department() {
        let mut session = anonymous();
        session
            .sign_in("citizen@mail.com", "pw", Some(Department::Health), None)
            .await
            .unwrap();
        assert!(session.current().unwrap().department().is_none());
    }

    #[tokio::test]
    async fn test_session_round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut session = SessionManager::open(FileStorage::open(&path).unwrap());
        session
            .sign_in("EMP-1234", "pw", Some(Department::PublicWorks), Some(Role::Government))
            .await
            .unwrap();
        let signed_in = session.current().cloned().unwrap();

        let restored = SessionManager::open(FileStorage::open(&path).unwrap());
        assert_eq!(restored.current(), Some(&signed_in));
    }

    #[tokio::test]
    async fn test_sign_up_regular_requires_profile() {
        let mut session = anonymous();
        let mut profile = SignUpProfile {
            email: "sara@mail.com".to_string(),
            password: "Passw0rd".to_string(),
            role: Role::Regular,
            username: Some("sara".to_string()),
            national_id: None,
            phone_number: Some("+962791234567".to_string()),
            department: Some(Department::Health),
            employee_id: None,
        };
        assert_validation(session.sign_up(profile.clone()).await, REGULAR_PROFILE_INCOMPLETE);

        profile.national_id = Some("9876543210".to_string());
        assert_eq!(session.sign_up(profile).await.unwrap(), Route::Home);
        let user = session.current().unwrap();
        assert_eq!(user.username.as_deref(), Some("sara"));
        assert!(user.department().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_government_requirements() {
        let mut session = anonymous();
        let mut profile = SignUpProfile {
            email: "officer@city.gov".to_string(),
            password: "Passw0rd".to_string(),
            role: Role::Government,
            username: None,
            national_id: None,
            phone_number: None,
            department: None,
            employee_id: Some("EMP-77".to_string()),
        };
        assert_validation(session.sign_up(profile.clone()).await, SIGNUP_DEPARTMENT_REQUIRED);

        profile.department = Some(Department::WaterAuthority);
        profile.employee_id = None;
        assert_validation(session.sign_up(profile.clone()).await, EMPLOYEE_ID_REQUIRED);

        profile.employee_id = Some("EMP-77".to_string());
        assert_eq!(session.sign_up(profile).await.unwrap(), Route::Issues);
        assert_eq!(
            session.current().unwrap().employee_id.as_deref(),
            Some("EMP-77")
        );
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let mut session = anonymous();
        session.sign_in("a@b.com", "pw", None, None).await.unwrap();
        assert!(session.storage().get_item(USER_KEY).is_some());

        assert_eq!(session.sign_out().unwrap(), Route::SignIn);
        assert!(session.current().is_none());
        assert!(session.storage().get_item(USER_KEY).is_none());

        assert_eq!(session.sign_out().unwrap(), Route::SignIn);
    }

    #[tokio::test]
    async fn test_password_reset_messages_are_role_specific() {
        let session = anonymous();
        assert_validation(
            session.request_password_reset("", Role::Regular).await,
            RESET_FAILED_REGULAR,
        );
        assert_validation(
            session.request_password_reset("  ", Role::Government).await,
            RESET_FAILED_GOVERNMENT,
        );
        assert!(session
            .request_password_reset("EMP-1234", Role::Government)
            .await
            .is_ok());
    }

    #[test]
    fn test_unreadable_stored_user_starts_anonymous() {
        let mut storage = MemoryStorage::default();
        storage.set_item(USER_KEY, "{broken").unwrap();
        let session = SessionManager::open(storage);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_stored_user_breaking_role_rule_starts_anonymous() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(USER_KEY, r#"{"id":"u1","email":"EMP-001","role":"government"}"#)
            .unwrap();
        let session = SessionManager::open(storage);
        assert!(session.current().is_none());
        assert!(!session.is_loading());

        let mut storage = MemoryStorage::default();
        storage
            .set_item(
                USER_KEY,
                r#"{"id":"u2","email":"a@b.com","role":"regular","department":"health"}"#,
            )
            .unwrap();
        assert!(SessionManager::open(storage).current().is_none());
    }
}

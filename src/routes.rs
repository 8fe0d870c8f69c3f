//! Navigation targets and the role guard in front of protected views.

use std::fmt;

use url::Url;

use crate::error::{ReporterError, Result};
use crate::types::{Role, User};

const BASE_URL: &str = "http://reporter.local/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    ForgotPassword,
    Profile,
    About,
    Faq,
    Contact,
    Privacy,
    Terms,
    Stats,
    Issues,
    Report,
    Issue(String),
    ReportProblem(String),
    MyReports,
    NotFound(String),
}

/// Outcome of the guard for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

impl Route {
    /// Resolve an in-app path such as `/issue/12` or `/issues?status=pending`.
    pub fn parse(path: &str) -> Result<Route> {
        let base = Url::parse(BASE_URL).map_err(|_| ReporterError::InvalidPath(path.to_string()))?;
        let url = base
            .join(path.trim())
            .map_err(|_| ReporterError::InvalidPath(path.to_string()))?;

        if url.host_str() != base.host_str() {
            return Err(ReporterError::InvalidPath(path.to_string()));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segs| segs.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["signin"] => Route::SignIn,
            ["signup"] => Route::SignUp,
            ["forgot-password"] => Route::ForgotPassword,
            ["profile"] => Route::Profile,
            ["about"] => Route::About,
            ["faq"] => Route::Faq,
            ["contact"] => Route::Contact,
            ["privacy"] => Route::Privacy,
            ["terms"] => Route::Terms,
            ["stats"] => Route::Stats,
            ["issues"] => Route::Issues,
            ["report"] => Route::Report,
            ["issue", id] => Route::Issue(id.to_string()),
            ["issues", id, "report-problem"] => Route::ReportProblem(id.to_string()),
            ["my-reports"] => Route::MyReports,
            _ => Route::NotFound(url.path().to_string()),
        };

        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SignIn => "/signin".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::About => "/about".to_string(),
            Route::Faq => "/faq".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Privacy => "/privacy".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::Stats => "/stats".to_string(),
            Route::Issues => "/issues".to_string(),
            Route::Report => "/report".to_string(),
            Route::Issue(id) => format!("/issue/{id}"),
            Route::ReportProblem(id) => format!("/issues/{id}/report-problem"),
            Route::MyReports => "/my-reports".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Roles allowed to open the route; `None` means public.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Issues | Route::MyReports => Some(&[Role::Government, Role::Regular]),
            Route::Report => Some(&[Role::Regular]),
            _ => None,
        }
    }

    /// Where a user lands right after signing in or up.
    pub fn landing_for(role: Role) -> Route {
        match role {
            Role::Government => Route::Issues,
            Role::Regular => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Decide whether `user` may open `route`.
///
/// Anonymous visitors go to sign-in. A signed-in user whose role is not
/// allowed is sent to their own landing view: government users to the
/// issues list, regular users home.
pub fn authorize(route: &Route, user: Option<&User>) -> Access {
    let Some(roles) = route.allowed_roles() else {
        return Access::Granted;
    };

    let Some(user) = user else {
        tracing::debug!(route = %route, "anonymous visitor redirected to sign in");
        return Access::Redirect(Route::SignIn);
    };

    if roles.contains(&user.role()) {
        Access::Granted
    } else {
        tracing::debug!(route = %route, role = %user.role(), "role not allowed");
        Access::Redirect(Route::landing_for(user.role()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Department;

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("/signin").unwrap(), Route::SignIn);
        assert_eq!(Route::parse("/forgot-password").unwrap(), Route::ForgotPassword);
        assert_eq!(Route::parse("/issues/").unwrap(), Route::Issues);
        assert_eq!(Route::parse("/issues?status=pending").unwrap(), Route::Issues);
        assert_eq!(Route::parse("/issue/42").unwrap(), Route::Issue("42".to_string()));
        assert_eq!(
            Route::parse("/issues/42/report-problem").unwrap(),
            Route::ReportProblem("42".to_string())
        );
        assert_eq!(Route::parse("my-reports").unwrap(), Route::MyReports);
        assert_eq!(
            Route::parse("/nowhere/else").unwrap(),
            Route::NotFound("/nowhere/else".to_string())
        );
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Home,
            Route::Stats,
            Route::Issue("7".to_string()),
            Route::ReportProblem("7".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()).unwrap(), route);
        }
    }

    #[test]
    fn test_rejects_foreign_host() {
        assert!(Route::parse("https://example.com/issues").is_err());
    }

    #[test]
    fn test_guard() {
        let citizen = User::regular("u1", "a@b.com");
        let official = User::government("u2", "EMP-1", Department::PublicWorks);

        assert_eq!(authorize(&Route::About, None), Access::Granted);
        assert_eq!(authorize(&Route::Issues, None), Access::Redirect(Route::SignIn));
        assert_eq!(authorize(&Route::Report, None), Access::Redirect(Route::SignIn));

        assert_eq!(authorize(&Route::Issues, Some(&citizen)), Access::Granted);
        assert_eq!(authorize(&Route::Report, Some(&citizen)), Access::Granted);
        assert_eq!(authorize(&Route::MyReports, Some(&official)), Access::Granted);
        assert_eq!(
            authorize(&Route::Report, Some(&official)),
            Access::Redirect(Route::Issues)
        );
    }
}

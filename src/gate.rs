//! Protected routing gate.
//!
//! A pure predicate over session state: the dashboard requires an
//! authenticated session, everything else is public. The frontend asks
//! before navigating and follows whatever redirect comes back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Login,
    ForgotPassword,
    Dashboard,
    Root,
}

impl std::str::FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('/') {
            "login" => Ok(Route::Login),
            "forgot-password" => Ok(Route::ForgotPassword),
            "dashboard" => Ok(Route::Dashboard),
            "" | "root" => Ok(Route::Root),
            other => Err(format!("Unknown route: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "route", rename_all = "lowercase")]
pub enum RouteDecision {
    Allow(Route),
    Redirect(Route),
}

/// Decide whether `requested` may render for the current session state.
pub fn resolve(requested: Route, authenticated: bool) -> RouteDecision {
    match requested {
        // The bare entry point always lands on the dashboard route, which
        // then gets gated on its own.
        Route::Root => RouteDecision::Redirect(Route::Dashboard),
        Route::Dashboard => {
            if authenticated {
                RouteDecision::Allow(Route::Dashboard)
            } else {
                RouteDecision::Redirect(Route::Login)
            }
        }
        Route::Login => RouteDecision::Allow(Route::Login),
        Route::ForgotPassword => RouteDecision::Allow(Route::ForgotPassword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_requires_authentication() {
        assert_eq!(
            resolve(Route::Dashboard, false),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(Route::Dashboard, true),
            RouteDecision::Allow(Route::Dashboard)
        );
    }

    #[test]
    fn test_root_redirects_to_dashboard() {
        assert_eq!(
            resolve(Route::Root, false),
            RouteDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            resolve(Route::Root, true),
            RouteDecision::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_public_routes_always_allowed() {
        for authed in [false, true] {
            assert_eq!(
                resolve(Route::Login, authed),
                RouteDecision::Allow(Route::Login)
            );
            assert_eq!(
                resolve(Route::ForgotPassword, authed),
                RouteDecision::Allow(Route::ForgotPassword)
            );
        }
    }

    #[test]
    fn test_route_parsing() {
        use std::str::FromStr;
        assert_eq!(Route::from_str("/login").unwrap(), Route::Login);
        assert_eq!(Route::from_str("dashboard").unwrap(), Route::Dashboard);
        assert_eq!(Route::from_str("/").unwrap(), Route::Root);
        assert!(Route::from_str("admin").is_err());
    }
}

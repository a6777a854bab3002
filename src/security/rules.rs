//! Declarative access-control matrix
//!
//! One ordered rule table maps method + path pattern to the requirement for
//! that endpoint. Evaluation is first-match-wins and falls back to
//! "authenticated" when nothing matches, so a forgotten route is locked
//! down rather than exposed. The whole matrix is a pure function and is
//! exercised in unit tests without any HTTP layer.

use axum::http::Method;

use crate::models::user::Role;

use super::token::Principal;

/// What a matched rule demands from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, token or not
    Public,
    /// Any verified principal
    Authenticated,
    /// A verified principal whose role is in the set
    Roles(&'static [Role]),
}

/// A single row of the matrix. `method: None` matches any method.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub method: Option<Method>,
    pub pattern: &'static str,
    pub requirement: Requirement,
}

/// Authorization decision for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No principal where one was required (401)
    Unauthenticated,
    /// Principal present but its role is not in the required set (403)
    Forbidden,
}

const USER_OR_STAFF: &[Role] = &[Role::User, Role::Staff];
const STAFF: &[Role] = &[Role::Staff];

macro_rules! rule {
    ($method:ident, $pattern:literal, $req:expr) => {
        AccessRule {
            method: Some(Method::$method),
            pattern: $pattern,
            requirement: $req,
        }
    };
}

/// The route → required-role table, in evaluation order.
pub fn access_rules() -> Vec<AccessRule> {
    use Requirement::*;
    vec![
        // Open endpoints: registration, login, docs, health
        rule!(POST, "/login", Public),
        rule!(POST, "/register", Public),
        rule!(GET, "/isLoggedIn", Public),
        rule!(GET, "/swagger-ui/**", Public),
        rule!(GET, "/v3/api-docs/**", Public),
        rule!(GET, "/health", Public),
        // Reader endpoints (USER and STAFF)
        rule!(POST, "/loan/add", Roles(USER_OR_STAFF)),
        rule!(DELETE, "/loan/delete/*", Roles(USER_OR_STAFF)),
        rule!(POST, "/review/add", Roles(USER_OR_STAFF)),
        rule!(GET, "/loan/getAll", Roles(USER_OR_STAFF)),
        rule!(GET, "/loan/user/*", Authenticated),
        rule!(GET, "/loan/*", Roles(USER_OR_STAFF)),
        rule!(GET, "/user/current", Authenticated),
        // Librarian endpoints (STAFF only)
        rule!(PUT, "/loan/return/*", Roles(STAFF)),
        rule!(POST, "/bookDetail/add", Roles(STAFF)),
        rule!(PUT, "/bookDetail/update/*", Roles(STAFF)),
        rule!(DELETE, "/bookDetail/delete/*", Roles(STAFF)),
        rule!(GET, "/user/getAll", Roles(STAFF)),
        rule!(GET, "/user/*", Roles(STAFF)),
        rule!(POST, "/user/add", Roles(STAFF)),
        rule!(PUT, "/user/update/*", Roles(STAFF)),
        rule!(DELETE, "/user/delete/*", Roles(STAFF)),
        // Everything else needs a valid session
    ]
}

/// Match a path against a pattern where `*` consumes exactly one segment and
/// a trailing `**` consumes any remainder (including none).
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/').filter(|s| !s.is_empty()).peekable();
    let mut segs = path.split('/').filter(|s| !s.is_empty());

    loop {
        match pat.next() {
            Some("**") => return true,
            Some(p) => match segs.next() {
                Some(s) if p == "*" || p == s => continue,
                _ => return false,
            },
            None => return segs.next().is_none(),
        }
    }
}

/// Decide whether `principal` may perform `method path`.
///
/// Pure function of its inputs; rules are evaluated in declared order and
/// the first matching rule governs.
pub fn authorize(
    principal: Option<&Principal>,
    method: &Method,
    path: &str,
    rules: &[AccessRule],
) -> Decision {
    let requirement = rules
        .iter()
        .find(|rule| {
            rule.method.as_ref().map_or(true, |m| m == method)
                && pattern_matches(rule.pattern, path)
        })
        .map(|rule| rule.requirement)
        // Default-deny for unknown routes
        .unwrap_or(Requirement::Authenticated);

    match requirement {
        Requirement::Public => Decision::Allow,
        Requirement::Authenticated => match principal {
            Some(_) => Decision::Allow,
            None => Decision::Deny(DenyReason::Unauthenticated),
        },
        Requirement::Roles(allowed) => match principal {
            Some(p) if allowed.contains(&p.role) => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::Forbidden),
            None => Decision::Deny(DenyReason::Unauthenticated),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Principal {
        Principal {
            subject: "alice".to_string(),
            role: Role::User,
        }
    }

    fn staff() -> Principal {
        Principal {
            subject: "bob".to_string(),
            role: Role::Staff,
        }
    }

    fn decide(principal: Option<&Principal>, method: Method, path: &str) -> Decision {
        authorize(principal, &method, path, &access_rules())
    }

    #[test]
    fn pattern_wildcard_consumes_one_segment() {
        assert!(pattern_matches("/loan/delete/*", "/loan/delete/7"));
        assert!(!pattern_matches("/loan/delete/*", "/loan/delete"));
        assert!(!pattern_matches("/loan/delete/*", "/loan/delete/7/extra"));
        assert!(!pattern_matches("/loan/*", "/loan/user/7"));
    }

    #[test]
    fn pattern_double_wildcard_consumes_remainder() {
        assert!(pattern_matches("/swagger-ui/**", "/swagger-ui/index.html"));
        assert!(pattern_matches("/swagger-ui/**", "/swagger-ui/a/b/c"));
        assert!(pattern_matches("/swagger-ui/**", "/swagger-ui"));
        assert!(!pattern_matches("/swagger-ui/**", "/other"));
    }

    #[test]
    fn docs_are_public_for_anonymous() {
        assert_eq!(
            decide(None, Method::GET, "/swagger-ui/index.html"),
            Decision::Allow
        );
        assert_eq!(
            decide(None, Method::GET, "/v3/api-docs/openapi.json"),
            Decision::Allow
        );
        assert_eq!(decide(None, Method::POST, "/login"), Decision::Allow);
        assert_eq!(decide(None, Method::POST, "/register"), Decision::Allow);
        assert_eq!(decide(None, Method::GET, "/isLoggedIn"), Decision::Allow);
    }

    #[test]
    fn anonymous_mutation_is_denied() {
        assert_eq!(
            decide(None, Method::POST, "/user/add"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            decide(None, Method::POST, "/loan/add"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn user_management_requires_staff() {
        assert_eq!(
            decide(Some(&user()), Method::DELETE, "/user/delete/5"),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            decide(Some(&staff()), Method::DELETE, "/user/delete/5"),
            Decision::Allow
        );
        assert_eq!(
            decide(Some(&user()), Method::GET, "/user/getAll"),
            Decision::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn readers_may_borrow_and_review() {
        assert_eq!(decide(Some(&user()), Method::POST, "/loan/add"), Decision::Allow);
        assert_eq!(decide(Some(&staff()), Method::POST, "/loan/add"), Decision::Allow);
        assert_eq!(decide(Some(&user()), Method::POST, "/review/add"), Decision::Allow);
        assert_eq!(
            decide(Some(&user()), Method::DELETE, "/loan/delete/3"),
            Decision::Allow
        );
    }

    #[test]
    fn loan_return_is_staff_only() {
        assert_eq!(
            decide(Some(&user()), Method::PUT, "/loan/return/9"),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            decide(Some(&staff()), Method::PUT, "/loan/return/9"),
            Decision::Allow
        );
    }

    #[test]
    fn own_id_lookup_needs_any_session_not_staff() {
        // Declared before the staff-only `/user/*` rule, so readers can
        // resolve their own id.
        assert_eq!(
            decide(Some(&user()), Method::GET, "/user/current"),
            Decision::Allow
        );
        assert_eq!(
            decide(None, Method::GET, "/user/current"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        // Numeric user lookups stay staff-only.
        assert_eq!(
            decide(Some(&user()), Method::GET, "/user/4"),
            Decision::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn loan_count_needs_any_session_not_staff() {
        // Three segments, so the staff-only `/user/*` rule cannot match;
        // the default makes it an authenticated read.
        assert_eq!(
            decide(None, Method::GET, "/user/4/loanCount"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            decide(Some(&user()), Method::GET, "/user/4/loanCount"),
            Decision::Allow
        );
    }

    #[test]
    fn loan_history_per_user_needs_any_session() {
        assert_eq!(
            decide(None, Method::GET, "/loan/user/4"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(decide(Some(&user()), Method::GET, "/loan/user/4"), Decision::Allow);
    }

    #[test]
    fn unknown_routes_default_to_authenticated() {
        assert_eq!(
            decide(None, Method::GET, "/book/getAll"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(decide(Some(&user()), Method::GET, "/book/getAll"), Decision::Allow);
        assert_eq!(
            decide(None, Method::PATCH, "/no/such/route"),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn first_matching_rule_governs() {
        // `/loan/getAll` must hit the role rule before the single-segment
        // `/loan/*` catch could ever matter.
        assert_eq!(
            decide(Some(&staff()), Method::GET, "/loan/getAll"),
            Decision::Allow
        );
        // `/loan/user/4` is three segments, so `/loan/*` does not shadow it.
        assert_eq!(decide(Some(&user()), Method::GET, "/loan/7"), Decision::Allow);
    }
}

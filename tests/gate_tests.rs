use telemedix_gate::{
    RouteTable,
    auth::Claims,
    gate::{AuthDecision, authorize, default_home_for, is_valid_redirect_for_role},
    models::Role,
    route_table::RouteCategory,
};

// --- Helper Functions ---

fn claims(role: Role) -> Claims {
    Claims {
        role,
        exp: 4_102_444_800,
        iat: Some(1_700_000_000),
        sub: Some("user-1".to_string()),
        email: None,
    }
}

fn redirect(path: &str) -> AuthDecision {
    AuthDecision::RedirectTo {
        path: path.to_string(),
        query: Vec::new(),
    }
}

fn login_redirect(requested: &str) -> AuthDecision {
    AuthDecision::RedirectTo {
        path: "/login".to_string(),
        query: vec![("redirect".to_string(), requested.to_string())],
    }
}

// --- authorize ---

#[test]
fn test_authenticated_user_is_sent_home_from_auth_pages() {
    for role in Role::ALL {
        for path in ["/login", "/register", "/forget-password", "/reset-password"] {
            let decision = authorize(RouteCategory::AuthOnly, path, Some(&claims(role)));
            assert_eq!(decision, redirect(default_home_for(role)));
        }
    }
}

#[test]
fn test_anonymous_user_may_open_auth_pages() {
    assert_eq!(
        authorize(RouteCategory::AuthOnly, "/login", None),
        AuthDecision::Allow
    );
}

#[test]
fn test_protected_without_token_redirects_to_login_with_exact_path() {
    let cases = [
        (RouteCategory::CommonProtected, "/my-profile"),
        (RouteCategory::RoleProtected(Role::Admin), "/admin/reports/2024"),
        (RouteCategory::RoleProtected(Role::Doctor), "/doctor/dashboard"),
        (RouteCategory::RoleProtected(Role::Patient), "/dashboard"),
    ];

    for (category, path) in cases {
        assert_eq!(authorize(category, path, None), login_redirect(path));
    }
}

#[test]
fn test_public_is_always_allowed() {
    assert_eq!(
        authorize(RouteCategory::Public, "/about", None),
        AuthDecision::Allow
    );
    for role in Role::ALL {
        assert_eq!(
            authorize(RouteCategory::Public, "/about", Some(&claims(role))),
            AuthDecision::Allow
        );
    }
}

#[test]
fn test_common_protected_accepts_any_role() {
    for role in Role::ALL {
        assert_eq!(
            authorize(RouteCategory::CommonProtected, "/setting", Some(&claims(role))),
            AuthDecision::Allow
        );
    }
}

#[test]
fn test_role_protected_allows_owner_and_redirects_others_home() {
    for required in Role::ALL {
        for actual in Role::ALL {
            let decision = authorize(
                RouteCategory::RoleProtected(required),
                "/somewhere",
                Some(&claims(actual)),
            );
            if actual == required {
                assert_eq!(decision, AuthDecision::Allow);
            } else {
                assert_eq!(decision, redirect(default_home_for(actual)));
            }
        }
    }
}

#[test]
fn test_patient_on_admin_dashboard_lands_on_patient_dashboard() {
    let routes = RouteTable::default();
    let path = "/admin/dashboard";

    let decision = authorize(routes.classify(path), path, Some(&claims(Role::Patient)));

    assert_eq!(decision.location().as_deref(), Some("/dashboard"));
}

#[test]
fn test_doctor_on_login_lands_on_doctor_dashboard() {
    let routes = RouteTable::default();

    let decision = authorize(routes.classify("/login"), "/login", Some(&claims(Role::Doctor)));

    assert_eq!(decision.location().as_deref(), Some("/doctor/dashboard"));
}

#[test]
fn test_anonymous_profile_visit_location_is_percent_encoded() {
    let routes = RouteTable::default();

    let decision = authorize(routes.classify("/my-profile"), "/my-profile", None);

    assert_eq!(
        decision.location().as_deref(),
        Some("/login?redirect=%2Fmy-profile")
    );
}

#[test]
fn test_anonymous_about_visit_is_allowed() {
    let routes = RouteTable::default();

    let decision = authorize(routes.classify("/about"), "/about", None);

    assert_eq!(decision, AuthDecision::Allow);
    assert_eq!(decision.location(), None);
}

// --- default_home_for ---

#[test]
fn test_default_home_for_each_role() {
    assert_eq!(default_home_for(Role::Admin), "/admin/dashboard");
    assert_eq!(default_home_for(Role::Doctor), "/doctor/dashboard");
    assert_eq!(default_home_for(Role::Patient), "/dashboard");
}

#[test]
fn test_every_role_home_is_owned_by_that_role() {
    let routes = RouteTable::default();
    for role in Role::ALL {
        assert_eq!(
            routes.classify(default_home_for(role)),
            RouteCategory::RoleProtected(role)
        );
    }
}

// --- is_valid_redirect_for_role ---

#[test]
fn test_redirect_validity_matches_classification() {
    let routes = RouteTable::default();
    let paths = [
        "/",
        "/about",
        "/login",
        "/register",
        "/my-profile",
        "/setting",
        "/admin/dashboard",
        "/doctor/patients",
        "/dashboard",
    ];

    for role in Role::ALL {
        for path in paths {
            let expected = match routes.classify(path) {
                RouteCategory::Public
                | RouteCategory::AuthOnly
                | RouteCategory::CommonProtected => true,
                RouteCategory::RoleProtected(owner) => owner == role,
            };
            assert_eq!(
                is_valid_redirect_for_role(&routes, path, role),
                expected,
                "role {role} path {path}"
            );
        }
    }
}

#[test]
fn test_patient_cannot_be_redirected_into_admin_area() {
    let routes = RouteTable::default();

    assert!(!is_valid_redirect_for_role(&routes, "/admin/dashboard", Role::Patient));
    assert!(is_valid_redirect_for_role(&routes, "/admin/dashboard", Role::Admin));
    assert!(is_valid_redirect_for_role(&routes, "/dashboard", Role::Patient));
}

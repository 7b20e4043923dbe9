use crate::models::Role;

/// RouteCategory
///
/// What a path demands from the caller before it may be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteCategory {
    /// Anyone may visit.
    Public,
    /// Login/register style entry points; must not be visited while authenticated.
    AuthOnly,
    /// Any authenticated identity may visit.
    CommonProtected,
    /// Only the given role may visit.
    RoleProtected(Role),
}

impl RouteCategory {
    pub fn requires_identity(&self) -> bool {
        matches!(
            self,
            RouteCategory::CommonProtected | RouteCategory::RoleProtected(_)
        )
    }

    // Lower runs first. Role-specific rules must win over the generic protected set.
    fn priority(&self) -> u8 {
        match self {
            RouteCategory::RoleProtected(_) => 0,
            RouteCategory::CommonProtected => 1,
            RouteCategory::AuthOnly => 2,
            RouteCategory::Public => 3,
        }
    }
}

/// RouteRule
///
/// One classification rule: a path matches when it equals one of `exact` or starts with
/// one of `prefixes`.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
    pub category: RouteCategory,
}

impl RouteRule {
    pub fn exact(paths: &[&str], category: RouteCategory) -> Self {
        Self {
            exact: paths.iter().map(|p| p.to_string()).collect(),
            prefixes: Vec::new(),
            category,
        }
    }

    pub fn prefix(prefixes: &[&str], category: RouteCategory) -> Self {
        Self {
            exact: Vec::new(),
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            category,
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.exact.iter().any(|exact| exact == path)
            || self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// RouteTable
///
/// Immutable classification rules plus the list of framework paths the gate never looks at.
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    ungated: Vec<String>,
}

impl RouteTable {
    /// Builds a table from arbitrary rules. Rules are stably reordered by category priority,
    /// so a role rule is always consulted before a common-protected rule whatever the input order.
    pub fn new(mut rules: Vec<RouteRule>, ungated: Vec<String>) -> Self {
        rules.sort_by_key(|rule| rule.category.priority());
        Self { rules, ungated }
    }

    /// classify
    ///
    /// Maps any path to exactly one category. Total and side-effect free.
    pub fn classify(&self, path: &str) -> RouteCategory {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.category)
            .unwrap_or(RouteCategory::Public)
    }

    /// is_gated
    ///
    /// False for static assets and API calls, which pass straight through the gate.
    /// Matching mirrors a negative lookahead on the text after the leading slash.
    pub fn is_gated(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        !self
            .ungated
            .iter()
            .any(|prefix| rest.starts_with(prefix.as_str()))
    }
}

impl Default for RouteTable {
    /// The portal's route map.
    fn default() -> Self {
        Self::new(
            vec![
                RouteRule::prefix(&["/admin"], RouteCategory::RoleProtected(Role::Admin)),
                RouteRule::prefix(&["/doctor"], RouteCategory::RoleProtected(Role::Doctor)),
                RouteRule::prefix(&["/dashboard"], RouteCategory::RoleProtected(Role::Patient)),
                RouteRule::exact(&["/my-profile", "/setting"], RouteCategory::CommonProtected),
                RouteRule::exact(
                    &["/login", "/register", "/forget-password", "/reset-password"],
                    RouteCategory::AuthOnly,
                ),
            ],
            [
                "api",
                "_next/static",
                "_next/image",
                "favicon.ico",
                "sitemap.xml",
                "robots.txt",
                ".well-known",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        )
    }
}

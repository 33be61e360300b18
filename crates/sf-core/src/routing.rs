//! Route access table.
//!
//! Paths are matched by longest segment prefix: `/admin` covers
//! `/admin/users` but not `/administrator`.

use crate::authorization::AccessRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    Public,
    Authenticated,
    Admin,
}

impl AccessRequirement {
    /// Role the gate must verify, `None` for public routes.
    pub fn role(&self) -> Option<AccessRole> {
        match self {
            AccessRequirement::Public => None,
            AccessRequirement::Authenticated => Some(AccessRole::User),
            AccessRequirement::Admin => Some(AccessRole::Admin),
        }
    }

    pub fn is_gated(&self) -> bool {
        self.role().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<(String, AccessRequirement)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, prefix: &str, requirement: AccessRequirement) -> Self {
        self.rules.push((normalize(prefix).to_string(), requirement));
        self
    }

    /// The storefront's route map.
    pub fn storefront() -> Self {
        use AccessRequirement::*;

        Self::new()
            .with_rule("/", Public)
            .with_rule("/products", Public)
            .with_rule("/category", Public)
            .with_rule("/brands", Public)
            .with_rule("/cart", Public)
            .with_rule("/about", Public)
            .with_rule("/contact", Public)
            .with_rule("/articles", Public)
            .with_rule("/login", Public)
            .with_rule("/register", Public)
            .with_rule("/orders", Authenticated)
            .with_rule("/checkout", Authenticated)
            .with_rule("/profile", Authenticated)
            .with_rule("/admin", Admin)
    }

    /// Unknown paths are public; the page layer renders its own not-found view.
    pub fn requirement_for(&self, path: &str) -> AccessRequirement {
        let path = normalize(path);
        self.rules
            .iter()
            .filter(|(prefix, _)| covers(prefix, path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, requirement)| *requirement)
            .unwrap_or(AccessRequirement::Public)
    }
}

/// Strip query string, fragment and trailing slash.
pub fn normalize(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// An in-app absolute path: a single leading `/` and no whitespace.
///
/// `//host` is protocol-relative and leaves the storefront, so it is not
/// local.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.chars().any(char::is_whitespace)
}

fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

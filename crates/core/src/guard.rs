//! Ownership guard: decides whether an actor may list, view, edit, or delete
//! an owned resource.
//!
//! The guard never touches storage. Handlers fetch the resource by primary
//! key (or slug) first and then ask the guard, so "row missing" and "row owned
//! by someone else" both end up as NOT_FOUND while staying separately testable.
//!
//! Anonymous actors are always sent to the login page with a `next` parameter
//! pointing back at the requested path; authenticated non-owners get
//! [`Decision::DenyNotFound`] so the resource's existence is not disclosed.

use crate::error::CoreError;
use crate::identity::{Identity, OwnedResource};

/// Default login endpoint used for authentication redirects.
pub const DEFAULT_LOGIN_URL: &str = "/login";

/// Query parameter carrying the originally requested path.
pub const NEXT_PARAM: &str = "next";

/// What the actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadList,
    View,
    Edit,
    Delete,
}

/// Outcome of a guard or validator check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Authenticated but not the owner; surfaced as 404.
    DenyNotFound,
    /// Anonymous; redirect target is the full login URL including `next`.
    DenyRedirect(String),
    /// Payload rejected with a human-readable reason.
    Rejected(String),
}

impl Decision {
    /// Convert into a `Result` so handlers can use `?`.
    ///
    /// `Rejected` reasons are attached to `field`.
    pub fn into_result(self, field: &'static str) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::DenyNotFound => Err(CoreError::NotOwner),
            Decision::DenyRedirect(login_redirect) => {
                Err(CoreError::AuthenticationRequired { login_redirect })
            }
            Decision::Rejected(message) => Err(CoreError::Validation { field, message }),
        }
    }
}

/// The ownership guard, configured with the login endpoint it redirects to.
#[derive(Debug, Clone)]
pub struct Guard {
    login_url: String,
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_URL)
    }
}

impl Guard {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }

    /// Build the redirect target for an anonymous request to `requested_path`.
    pub fn login_redirect(&self, requested_path: &str) -> String {
        login_redirect(&self.login_url, requested_path)
    }

    /// Endpoints that need an identity but no particular resource
    /// (posting a comment, the note form, the success page).
    pub fn require_identity(&self, actor: &Identity, requested_path: &str) -> Decision {
        if actor.is_authenticated() {
            Decision::Allow
        } else {
            Decision::DenyRedirect(self.login_redirect(requested_path))
        }
    }

    /// `ReadList` on an identity-gated collection.
    ///
    /// Anonymous actors are redirected rather than shown an empty list; the
    /// visible subset for authenticated actors is computed by
    /// [`crate::listing::list_owned`].
    pub fn authorize_listing(&self, actor: &Identity, requested_path: &str) -> Decision {
        self.require_identity(actor, requested_path)
    }

    /// Decide `action` on a single owned resource.
    pub fn authorize<R: OwnedResource + ?Sized>(
        &self,
        actor: &Identity,
        resource: &R,
        action: Action,
        requested_path: &str,
    ) -> Decision {
        if !actor.is_authenticated() {
            return Decision::DenyRedirect(self.login_redirect(requested_path));
        }
        match action {
            // Listing has no single owner; the caller filters with list_owned.
            Action::ReadList => Decision::Allow,
            Action::View | Action::Edit | Action::Delete => {
                if actor.owns(resource) {
                    Decision::Allow
                } else {
                    Decision::DenyNotFound
                }
            }
        }
    }
}

/// `{login_url}?next={requested_path}` with `next` form-encoded, keeping `/`
/// literal so `/notes/add/` round-trips unchanged.
pub fn login_redirect(login_url: &str, requested_path: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!(
        "{login_url}{separator}{NEXT_PARAM}={}",
        encode_next(requested_path)
    )
}

fn encode_next(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::DbId;

    struct Note {
        author: DbId,
    }

    impl OwnedResource for Note {
        fn owner_id(&self) -> DbId {
            self.author
        }
    }

    fn author() -> Identity {
        Identity::user(1, "author")
    }

    fn reader() -> Identity {
        Identity::user(2, "reader")
    }

    #[test]
    fn owner_is_allowed_every_action() {
        let guard = Guard::default();
        let note = Note { author: 1 };
        for action in [Action::View, Action::Edit, Action::Delete] {
            assert_eq!(
                guard.authorize(&author(), &note, action, "/notes/edit/x/"),
                Decision::Allow
            );
        }
    }

    #[test]
    fn non_owner_gets_not_found() {
        let guard = Guard::default();
        let note = Note { author: 1 };
        for action in [Action::View, Action::Edit, Action::Delete] {
            assert_eq!(
                guard.authorize(&reader(), &note, action, "/notes/edit/x/"),
                Decision::DenyNotFound
            );
        }
    }

    #[test]
    fn anonymous_is_redirected_not_hidden() {
        let guard = Guard::default();
        let note = Note { author: 1 };
        let decision = guard.authorize(
            &Identity::Anonymous,
            &note,
            Action::Edit,
            "/notes/edit/slug/",
        );
        assert_eq!(
            decision,
            Decision::DenyRedirect("/login?next=/notes/edit/slug/".to_string())
        );
    }

    #[test]
    fn listing_requires_identity() {
        let guard = Guard::default();
        assert_eq!(
            guard.authorize_listing(&Identity::Anonymous, "/notes/list/"),
            Decision::DenyRedirect("/login?next=/notes/list/".to_string())
        );
        assert_eq!(
            guard.authorize_listing(&reader(), "/notes/list/"),
            Decision::Allow
        );
    }

    #[test]
    fn redirect_uses_configured_login_url() {
        let guard = Guard::new("/auth/login/");
        assert_eq!(
            guard.require_identity(&Identity::Anonymous, "/notes/add/"),
            Decision::DenyRedirect("/auth/login/?next=/notes/add/".to_string())
        );
    }

    #[test]
    fn next_is_encoded_except_slashes() {
        assert_eq!(login_redirect("/login", "/notes/add/"), "/login?next=/notes/add/");
        assert_eq!(
            login_redirect("/login", "/news/?page=2&x=y"),
            "/login?next=/news/%3Fpage%3D2%26x%3Dy"
        );
        assert_eq!(
            login_redirect("/login?lang=en", "/a b"),
            "/login?lang=en&next=/a+b"
        );
    }

    #[test]
    fn decision_into_result_maps_variants() {
        assert!(Decision::Allow.into_result("text").is_ok());
        assert_matches!(
            Decision::DenyNotFound.into_result("text"),
            Err(CoreError::NotOwner)
        );
        assert_matches!(
            Decision::DenyRedirect("/login?next=/".into()).into_result("text"),
            Err(CoreError::AuthenticationRequired { login_redirect }) if login_redirect == "/login?next=/"
        );
        assert_matches!(
            Decision::Rejected("nope".into()).into_result("text"),
            Err(CoreError::Validation { field: "text", message }) if message == "nope"
        );
    }
}

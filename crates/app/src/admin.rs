//! Admin panel gate.
//!
//! A fixed credential pair checked before showing the admin panel. This is
//! a UI gate, not a security boundary — hardening it is explicitly out of
//! scope.

/// Admin panel email.
pub const ADMIN_EMAIL: &str = "admin@reelcart.app";

/// Admin panel password.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Check the fixed admin credential pair.
#[must_use]
pub fn verify_admin(email: &str, password: &str) -> bool {
    email == ADMIN_EMAIL && password == ADMIN_PASSWORD
}

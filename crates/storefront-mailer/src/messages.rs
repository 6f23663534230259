//! Message templates for the account flows.

/// A rendered subject and plain-text body.
#[derive(Debug, Clone)]
pub struct MailContent {
    pub subject: String,
    pub body: String,
}

/// The email-verification message sent after registration.
///
/// The link carries the single-use token; `base_url` points at the
/// storefront frontend, which forwards the token to the API.
pub fn verification_email(name: &str, token: &str, base_url: &str) -> MailContent {
    let link = format!("{base_url}/verify-email?token={token}");
    let body = format!(
        "Hello {name},\n\n\
         Welcome to Storefront! Please confirm your email address by\n\
         opening the link below:\n\n\
         {link}\n\n\
         The link expires in 24 hours. If you did not create this\n\
         account, you can ignore this message.\n\n\
         The Storefront Team\n"
    );

    MailContent {
        subject: "Confirm your Storefront email address".to_string(),
        body,
    }
}

/// The password-reset message sent on request.
pub fn password_reset_email(name: &str, token: &str, base_url: &str) -> MailContent {
    let link = format!("{base_url}/reset-password?token={token}");
    let body = format!(
        "Hello {name},\n\n\
         We received a request to reset your Storefront password. To\n\
         choose a new one, open the link below:\n\n\
         {link}\n\n\
         The link expires in 1 hour and works exactly once. If you did\n\
         not ask for a reset, ignore this message and your password\n\
         stays unchanged.\n\n\
         The Storefront Team\n"
    );

    MailContent {
        subject: "Reset your Storefront password".to_string(),
        body,
    }
}

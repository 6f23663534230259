//! # storefront-mailer
//!
//! Outbound email for account flows: verification links and password
//! reset links. The [`sender::MailSender`] trait hides the transport;
//! [`sender::build_mailer`] picks SMTP or an in-memory outbox based on
//! configuration.

pub mod memory;
pub mod messages;
pub mod sender;
pub mod smtp;

pub use memory::{MemoryMailer, SentMail};
pub use sender::{build_mailer, MailSender};
pub use smtp::SmtpMailer;

pub mod mailer;
pub mod newsletter;

pub use mailer::Notifier;
pub use newsletter::NewsletterClient;

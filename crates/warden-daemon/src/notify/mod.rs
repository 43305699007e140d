mod alert;
mod notifier;
mod sinks;

pub use alert::{Alert, AlertContext};
pub use notifier::Notifier;
pub use sinks::{CommandSink, LogSink, NotificationSink, WebhookSink};

#[cfg(test)]
mod tests;

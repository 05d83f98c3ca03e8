//! Notification dispatch: an in-process toast hub plus outbound email on
//! moderation transitions. Both channels are best-effort — a failed or
//! unconfigured dispatch is logged and never changes the outcome of the
//! transition that triggered it.

use domains::{Mailer, OutboundEmail, Project};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

const TOAST_CAPACITY: usize = 64;
const MODERATION_TOAST_MS: u64 = 8_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient in-process notification, distinct from anything persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
}

/// Fans moderation side effects out to toasts and email.
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    toasts: broadcast::Sender<Toast>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        let (toasts, _) = broadcast::channel(TOAST_CAPACITY);
        Self { mailer, toasts }
    }

    /// Subscribe to the toast feed. Late subscribers only see toasts raised
    /// after they subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.toasts.subscribe()
    }

    pub fn toast(&self, kind: ToastKind, title: &str, message: String, duration_ms: u64) {
        let toast = Toast {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message,
            kind,
            duration_ms,
        };
        // No subscribers is fine; the hub is fire-and-forget.
        let _ = self.toasts.send(toast);
    }

    pub fn project_approved(&self, project: &Project) {
        self.toast(
            ToastKind::Success,
            "🎉 Project Approved!",
            format!(
                "Great news! Your project \"{}\" has been approved and is now live on our showcase.",
                project.title
            ),
            MODERATION_TOAST_MS,
        );
        self.dispatch(approval_email(project));
    }

    pub fn project_rejected(&self, project: &Project, feedback: Option<&str>) {
        self.toast(
            ToastKind::Info,
            "📝 Project Needs Updates",
            format!(
                "Your project \"{}\" needs some updates before it can be approved. \
                 Please review the feedback and resubmit.",
                project.title
            ),
            MODERATION_TOAST_MS,
        );
        self.dispatch(rejection_email(project, feedback));
    }

    /// Hands the email to a background task; the task logs the outcome.
    fn dispatch(&self, message: OutboundEmail) {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            let to = message.to.clone();
            let subject = message.subject.clone();
            match mailer.send(message).await {
                Ok(()) => debug!(%to, %subject, "notification email dispatched"),
                Err(err) => warn!(%to, %subject, %err, "notification email failed"),
            }
        });
    }
}

fn approval_email(project: &Project) -> OutboundEmail {
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h1>🎉 Congratulations!</h1>\
           <h2>Your project has been approved!</h2>\
           <p>Great news! Your project <strong>\"{title}\"</strong> has been reviewed and \
              approved by our team. It's now live on our project showcase for everyone to see.</p>\
           <p><strong>What's next?</strong><br>Your project is now visible to all visitors on \
              our platform. Share it with your network and showcase your amazing work!</p>\
           <p>Thank you for contributing to our community!<br>The NaedeX Team</p>\
         </div>",
        title = project.title
    );
    let text = format!(
        "Congratulations! Your project \"{title}\" has been approved!\n\n\
         Your project has been reviewed and approved by our team. It's now live on our \
         project showcase.\n\n\
         Thank you for contributing to our community!\nThe NaedeX Team",
        title = project.title
    );
    OutboundEmail {
        to: project.author_email.clone(),
        subject: format!("🎉 Your project \"{}\" has been approved!", project.title),
        html,
        text,
    }
}

fn rejection_email(project: &Project, feedback: Option<&str>) -> OutboundEmail {
    let feedback_html = feedback
        .map(|text| format!("<p><strong>Feedback:</strong><br>{text}</p>"))
        .unwrap_or_default();
    let feedback_text = feedback
        .map(|text| format!("Feedback: {text}\n\n"))
        .unwrap_or_default();

    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h1>📝 Project Review Update</h1>\
           <h2>Your project needs some updates</h2>\
           <p>Thank you for submitting your project <strong>\"{title}\"</strong>. After review, \
              we've identified some areas that need attention before it can be approved.</p>\
           {feedback_html}\
           <p><strong>Next Steps:</strong><br>Please review the feedback and make the necessary \
              updates to your project. You can resubmit it once the changes are complete.</p>\
           <p>We appreciate your contribution and look forward to seeing your updated project!<br>\
              The NaedeX Team</p>\
         </div>",
        title = project.title
    );
    let text = format!(
        "Your project \"{title}\" needs updates\n\n\
         Thank you for submitting your project. After review, we've identified some areas \
         that need attention before it can be approved.\n\n\
         {feedback_text}\
         Please review the feedback and make the necessary updates. You can resubmit once \
         the changes are complete.\n\nWe appreciate your contribution!\nThe NaedeX Team",
        title = project.title
    );
    OutboundEmail {
        to: project.author_email.clone(),
        subject: format!("📝 Your project \"{}\" needs updates", project.title),
        html,
        text,
    }
}

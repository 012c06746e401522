use crate::domain::model::{GuestbookRecord, Notification, RsvpRecord, WaitlistRecord};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

const SUBMITTED_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// 以 tracing 記錄通知；未啟用或缺收件人時略過
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
    enabled: bool,
    recipient: Option<String>,
}

impl TracingNotifier {
    pub fn new(enabled: bool, recipient: Option<String>) -> Self {
        Self { enabled, recipient }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, notification: &Notification) -> Result<bool> {
        let recipient = match (self.enabled, &self.recipient) {
            (true, Some(recipient)) => recipient,
            _ => {
                tracing::info!(
                    "Notifications not configured. Skipping: {}",
                    notification.subject
                );
                return Ok(false);
            }
        };

        tracing::info!(
            to = %recipient,
            subject = %notification.subject,
            "Notification sent"
        );
        tracing::debug!("Notification body: {}", notification.html_body);
        Ok(true)
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn song_or_none(song: &str) -> String {
    if song.is_empty() {
        "None".to_string()
    } else {
        escape_html(song)
    }
}

pub fn rsvp_notification(record: &RsvpRecord, submitted: DateTime<Local>) -> Notification {
    let body = format!(
        "<h2>New RSVP Submission</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Attendance:</strong> {}</p>\n\
         <p><strong>Song Request:</strong> {}</p>\n\
         <p><strong>Submitted:</strong> {}</p>\n",
        escape_html(&record.name),
        escape_html(&record.attendance),
        song_or_none(&record.song),
        submitted.format(SUBMITTED_FORMAT)
    );
    Notification::new("New RSVP Submission", body)
}

pub fn guestbook_notification(record: &GuestbookRecord, submitted: DateTime<Local>) -> Notification {
    let body = format!(
        "<h2>New Guest Book Message</h2>\n\
         <p><strong>From:</strong> {}</p>\n\
         <p><strong>Relationship:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <blockquote style=\"border-left: 3px solid #ccc; padding-left: 15px; margin: 10px 0;\">\n\
         {}\n\
         </blockquote>\n\
         <p><strong>Submitted:</strong> {}</p>\n",
        escape_html(&record.name),
        escape_html(&record.relationship),
        escape_html(&record.message),
        submitted.format(SUBMITTED_FORMAT)
    );
    Notification::new("New Guest Book Message", body)
}

pub fn waitlist_notification(record: &WaitlistRecord, submitted: DateTime<Local>) -> Notification {
    let body = format!(
        "<h2>New Waitlist Submission</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Status:</strong> Waitlist</p>\n\
         <p><strong>Song Request:</strong> {}</p>\n\
         <p><strong>Submitted:</strong> {}</p>\n",
        escape_html(&record.name),
        song_or_none(&record.song),
        submitted.format(SUBMITTED_FORMAT)
    );
    Notification::new("New Waitlist Submission", body)
}

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wedding_content::domain::model::{GuestbookRequest, Notification, RsvpRequest, SiteConfigUpdate};
use wedding_content::domain::ports::Notifier;
use wedding_content::services::submissions::{GUESTBOOK_FILE, RSVP_FILE, SITE_CONFIG_FILE};
use wedding_content::{ContentError, LocalStorage, SubmissionService, TracingNotifier};

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> wedding_content::Result<bool> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(true)
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _notification: &Notification) -> wedding_content::Result<bool> {
        Err(ContentError::ConfigError {
            message: "smtp unavailable".to_string(),
        })
    }
}

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 6, 1, 10, 30, 15).unwrap()
}

fn rsvp(name: &str, attendance: Option<&str>) -> RsvpRequest {
    RsvpRequest {
        name: Some(name.to_string()),
        attendance: attendance.map(str::to_string),
        song: None,
    }
}

async fn setup() -> (TempDir, SubmissionService<LocalStorage, RecordingNotifier>, RecordingNotifier) {
    let dir = TempDir::new().unwrap();
    let notifier = RecordingNotifier::default();
    let service = SubmissionService::new(LocalStorage::new(dir.path()), notifier.clone())
        .with_clock(fixed_clock);
    service.ensure_data_files().await.unwrap();
    (dir, service, notifier)
}

#[tokio::test]
async fn test_ensure_data_files_creates_everything() {
    let (dir, service, _) = setup().await;

    let health = service.health().await;
    assert_eq!(health.status, "healthy");
    assert!(health.data_files.rsvp);
    assert!(health.data_files.waitlist);
    assert!(health.data_files.guestbook);
    assert!(health.data_files.site_config);

    let rsvp_json = std::fs::read_to_string(dir.path().join(RSVP_FILE)).unwrap();
    assert_eq!(rsvp_json, "[]");
    let site: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(SITE_CONFIG_FILE)).unwrap())
            .unwrap();
    assert_eq!(site["showHotelInfo"], true);
}

#[tokio::test]
async fn test_ensure_data_files_keeps_existing_data() {
    let (_dir, service, _) = setup().await;
    service.submit_rsvp(rsvp("Ada", Some("attending")), None).await.unwrap();

    service.ensure_data_files().await.unwrap();
    assert_eq!(service.list_rsvps().await.len(), 1);
}

#[tokio::test]
async fn test_rsvp_messages_by_attendance() {
    let (_dir, service, notifier) = setup().await;

    let attending = service.submit_rsvp(rsvp("Ada", Some("attending")), None).await.unwrap();
    assert_eq!(attending.message, "Thank you, Ada! We can't wait to celebrate with you!");
    assert_eq!(attending.id, "20250601_103015");

    let declining = service.submit_rsvp(rsvp("Bob", Some("declining")), None).await.unwrap();
    assert_eq!(
        declining.message,
        "Thank you for letting us know, Bob. We'll miss you but understand!"
    );

    let unknown = service.submit_rsvp(rsvp("Cy", None), None).await.unwrap();
    assert_eq!(unknown.message, "Thank you for your RSVP, Cy! We'll be in touch soon.");

    let rsvps = service.list_rsvps().await;
    assert_eq!(rsvps.len(), 3);
    assert_eq!(rsvps[2].attendance, "not_specified");
    assert_eq!(rsvps[2].song, "");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].subject, "Wedding Website: New RSVP Submission");
}

#[tokio::test]
async fn test_rsvp_requires_name() {
    let (_dir, service, notifier) = setup().await;

    let err = service
        .submit_rsvp(RsvpRequest::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err.user_friendly_message(), "Missing required field: name");

    assert!(service.submit_rsvp(rsvp("  ", None), None).await.is_err());
    assert!(service.list_rsvps().await.is_empty());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rsvp_stats() {
    let (_dir, service, _) = setup().await;
    for (name, attendance) in [
        ("A", Some("attending")),
        ("B", Some("attending")),
        ("C", Some("declining")),
        ("D", None),
    ] {
        service.submit_rsvp(rsvp(name, attendance), None).await.unwrap();
    }

    let stats = service.rsvp_stats().await;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.attending, 2);
    assert_eq!(stats.declining, 1);
    assert_eq!(stats.pending, 1);
}

#[tokio::test]
async fn test_guestbook_returns_latest_twenty() {
    let (_dir, service, _) = setup().await;

    for i in 0..25 {
        service
            .submit_guestbook(
                GuestbookRequest {
                    name: Some(format!("Guest {}", i)),
                    relationship: Some("Friend".to_string()),
                    message: Some("Congratulations!".to_string()),
                },
                Some("127.0.0.1".to_string()),
            )
            .await
            .unwrap();
    }

    let recent = service.recent_guestbook().await;
    assert_eq!(recent.len(), 20);
    assert_eq!(recent[0].name, "Guest 5");
    assert_eq!(recent[19].name, "Guest 24");
    assert_eq!(recent[0].date, "June 01, 2025");
    assert_eq!(recent[0].ip_address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_guestbook_requires_all_fields() {
    let (_dir, service, _) = setup().await;

    let err = service
        .submit_guestbook(
            GuestbookRequest {
                name: Some("Ada".to_string()),
                relationship: Some("Friend".to_string()),
                message: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.user_friendly_message(), "Missing required field: message");
}

#[tokio::test]
async fn test_waitlist_defaults_to_waitlist_status() {
    let (_dir, service, notifier) = setup().await;

    let receipt = service.submit_waitlist(rsvp("Dee", None), None).await.unwrap();
    assert!(receipt.message.starts_with("Thank you, Dee! We've added you to our waitlist"));

    let waitlist = service.list_waitlist().await;
    assert_eq!(waitlist.len(), 1);
    assert_eq!(waitlist[0].attendance, "waitlist");
    assert!(service.list_rsvps().await.is_empty());

    let sent = notifier.sent.lock().unwrap();
    assert!(sent[0].html_body.contains("<strong>Status:</strong> Waitlist"));
}

#[tokio::test]
async fn test_corrupted_file_treated_as_empty() {
    let (dir, service, _) = setup().await;
    std::fs::write(dir.path().join(GUESTBOOK_FILE), "{not json").unwrap();

    assert!(service.recent_guestbook().await.is_empty());

    service
        .submit_guestbook(
            GuestbookRequest {
                name: Some("Ada".to_string()),
                relationship: Some("Cousin".to_string()),
                message: Some("Cheers".to_string()),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(service.recent_guestbook().await.len(), 1);
}

#[tokio::test]
async fn test_site_config_partial_update_persists() {
    let (_dir, service, _) = setup().await;

    let updated = service
        .update_site_config(SiteConfigUpdate {
            show_hotel_info: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!updated.show_hotel_info);
    assert_eq!(updated.hotel_name, "Hampton Inn & Suites Ft. Worth-Burleson");

    let reloaded = service.site_config().await;
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_submission() {
    let dir = TempDir::new().unwrap();
    let service = SubmissionService::new(LocalStorage::new(dir.path()), FailingNotifier);

    let receipt = service.submit_rsvp(rsvp("Ada", Some("attending")), None).await;
    assert!(receipt.is_ok());
    assert_eq!(service.list_rsvps().await.len(), 1);
}

#[tokio::test]
async fn test_disabled_notifier_service() {
    let dir = TempDir::new().unwrap();
    let service = SubmissionService::new(LocalStorage::new(dir.path()), TracingNotifier::disabled());
    service.ensure_data_files().await.unwrap();

    service.submit_waitlist(rsvp("Eve", None), None).await.unwrap();
    assert_eq!(service.list_waitlist().await.len(), 1);
}

#[tokio::test]
async fn test_nonconforming_record_survives_submit() {
    let (dir, service, _) = setup().await;
    std::fs::write(
        dir.path().join(RSVP_FILE),
        r#"[{"id": "20240101_000000", "name": "Old Guest", "attendance": null, "extra": 7},
            {"name": "No Id", "attendance": "attending"}]"#,
    )
    .unwrap();

    let before = service.rsvp_stats().await;
    assert_eq!(before.total, 2);
    assert_eq!(before.attending, 1);

    service.submit_rsvp(rsvp("New", Some("declining")), None).await.unwrap();

    let stored: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(RSVP_FILE)).unwrap()).unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0]["name"], "Old Guest");
    assert_eq!(stored[0]["extra"], 7);
    assert!(stored[0]["attendance"].is_null());
    assert_eq!(stored[1]["name"], "No Id");
    assert_eq!(stored[2]["name"], "New");

    let after = service.rsvp_stats().await;
    assert_eq!(after.total, 3);
    assert_eq!(after.declining, 1);
    assert_eq!(after.pending, 1);

    // 缺 id 的紀錄無法轉成型別，列表略過但檔案保留
    let names: Vec<String> = service.list_rsvps().await.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Old Guest", "New"]);
}

#[tokio::test]
async fn test_site_config_update_keeps_other_disk_values() {
    let (dir, service, _) = setup().await;
    std::fs::write(
        dir.path().join(SITE_CONFIG_FILE),
        r#"{"hotelName": "Lakeside Lodge", "ceremonyTime": "4 PM"}"#,
    )
    .unwrap();

    let current = service.site_config().await;
    assert_eq!(current.hotel_name, "Lakeside Lodge");
    assert!(current.show_hotel_info);

    service
        .update_site_config(SiteConfigUpdate {
            show_hotel_info: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let on_disk: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(SITE_CONFIG_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk["hotelName"], "Lakeside Lodge");
    assert_eq!(on_disk["ceremonyTime"], "4 PM");
    assert_eq!(on_disk["showHotelInfo"], false);
    assert!(on_disk.get("hotelAddress").is_none());
}

#[tokio::test]
async fn test_timestamp_is_naive_local_with_micros() {
    let (_dir, service, _) = setup().await;
    service.submit_rsvp(rsvp("Ada", None), None).await.unwrap();

    let rsvps = service.list_rsvps().await;
    assert_eq!(rsvps[0].timestamp, "2025-06-01T10:30:15.000000");
    assert_eq!(service.health().await.timestamp, "2025-06-01T10:30:15.000000");
}

#[tokio::test]
async fn test_explicit_empty_attendance_kept() {
    let (_dir, service, _) = setup().await;
    service.submit_rsvp(rsvp("Ada", Some("")), None).await.unwrap();
    service.submit_waitlist(rsvp("Bea", Some("")), None).await.unwrap();

    assert_eq!(service.list_rsvps().await[0].attendance, "");
    assert_eq!(service.list_waitlist().await[0].attendance, "");
    assert_eq!(service.rsvp_stats().await.pending, 1);
}

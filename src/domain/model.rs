use serde::{Deserialize, Deserializer, Serialize};

/// null 與缺少欄位都當作預設值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 時間軸上的單張圖片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    pub src: &'static str,
    pub alt: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDescriptor {
    pub src: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// "m:ss"
    pub duration: &'static str,
    pub featured: bool,
}

/// 時間軸上的一個里程碑
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub id: u32,
    pub year: i32,
    pub month: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub images: &'static [ImageDescriptor],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoDescriptor>,
    pub icon: &'static str,
    pub color: &'static str,
}

/// 攤平後的圖片，附帶所屬的時間軸項目
#[derive(Debug, Clone, Serialize)]
pub struct TimelineImage<'a> {
    #[serde(flatten)]
    pub image: &'a ImageDescriptor,
    #[serde(rename = "timelineItem")]
    pub timeline_item: &'a TimelineEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub song: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookRecord {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// 候補名單與 RSVP 共用相同欄位
pub type WaitlistRecord = RsvpRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsvpRequest {
    pub name: Option<String>,
    pub attendance: Option<String>,
    pub song: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestbookRequest {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RsvpStats {
    pub total: usize,
    pub attending: usize,
    pub declining: usize,
    pub pending: usize,
}

/// 網站設定檔，磁碟上使用 camelCase；缺少的鍵以預設值補上
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub show_hotel_info: bool,
    pub hotel_name: String,
    pub hotel_address: String,
    pub booking_link: String,
}

const HOTEL_BOOKING_LINK: &str = "https://www.google.com/travel/search?ts=CAESCAoCCAMKAggDGhwSGhIUCgcI6Q8QARgeEgcI6Q8QARgfGAEyAhAAKgcKBToDVVNE&qs=CAEyFENnc0l0ZGlRamViNWhLTHRBUkFCOApCCREL08P7HO_8ikIJEQKS7AAeOhwDQgkRy6OAidTYq_NaUQgBMk2qAUoQASoKIgZob3RlbHMoADIfEAEiG4_fMcyX83ZMB4u11pHZG8IJuZmkvlGPnVOVDTIZEAIiFWhvdGVscyBpbiBidXJsZXNvbiB0eA&utm_campaign=sharing&utm_medium=link_btn&utm_source=htls";

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            show_hotel_info: true,
            hotel_name: "Hampton Inn & Suites Ft. Worth-Burleson".to_string(),
            hotel_address: "13251 Jake Ct, Burleson, TX 76028".to_string(),
            booking_link: HOTEL_BOOKING_LINK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigUpdate {
    pub show_hotel_info: Option<bool>,
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub booking_link: Option<String>,
}

/// 寄給新人的通知信
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html_body: String,
}

impl Notification {
    pub fn new(subject: &str, html_body: String) -> Self {
        Self {
            subject: format!("Wedding Website: {}", subject),
            html_body,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataFilesStatus {
    pub rsvp: bool,
    pub waitlist: bool,
    pub guestbook: bool,
    pub site_config: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub data_files: DataFilesStatus,
}

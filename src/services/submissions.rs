use crate::domain::model::{
    DataFilesStatus, GuestbookRecord, GuestbookRequest, HealthReport, Notification, RsvpRecord,
    RsvpRequest, RsvpStats, SiteConfig, SiteConfigUpdate, SubmissionReceipt, WaitlistRecord,
};
use crate::domain::ports::{Notifier, Storage};
use crate::services::notify;
use crate::utils::error::Result;
use crate::utils::validation::require_field;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub const RSVP_FILE: &str = "rsvp_data.json";
pub const WAITLIST_FILE: &str = "waitlist_data.json";
pub const GUESTBOOK_FILE: &str = "guestbook_data.json";
pub const SITE_CONFIG_FILE: &str = "site_config.json";

/// 留言板列表只回傳最新的幾筆
pub const GUESTBOOK_PAGE_SIZE: usize = 20;

const ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 不含時區、精確到微秒的本地時間
fn iso_timestamp(now: DateTime<Local>) -> String {
    now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct SubmissionService<S: Storage, N: Notifier> {
    storage: S,
    notifier: N,
    clock: fn() -> DateTime<Local>,
}

impl<S: Storage, N: Notifier> SubmissionService<S, N> {
    pub fn new(storage: S, notifier: N) -> Self {
        Self {
            storage,
            notifier,
            clock: Local::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// 建立缺少的資料檔
    pub async fn ensure_data_files(&self) -> Result<()> {
        for file in [RSVP_FILE, GUESTBOOK_FILE, WAITLIST_FILE] {
            if !self.storage.exists(file).await {
                tracing::info!("Creating data file {}", file);
                self.storage.write_file(file, b"[]").await?;
            }
        }

        if !self.storage.exists(SITE_CONFIG_FILE).await {
            tracing::info!("Creating data file {}", SITE_CONFIG_FILE);
            self.save(SITE_CONFIG_FILE, &SiteConfig::default()).await?;
        }

        Ok(())
    }

    /// 原樣讀出磁碟上的 JSON 陣列；檔案不存在或 JSON 壞掉才當作空列表
    async fn load_raw(&self, file: &str) -> Vec<Value> {
        let bytes = match self.storage.read_file(file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("{} not readable ({}), treating as empty", file, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::warn!("{} is not a JSON list ({}), treating as empty", file, type_name(&other));
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("{} contains invalid JSON ({}), treating as empty", file, e);
                Vec::new()
            }
        }
    }

    /// 逐筆解析；不符合結構的舊資料只在讀取時略過，檔案內容不動
    async fn load_list<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        self.load_raw(file)
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("{} entry {} skipped: {}", file, index, e);
                    None
                }
            })
            .collect()
    }

    async fn save<T: Serialize + ?Sized>(&self, file: &str, data: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(data)?;
        self.storage.write_file(file, &json).await
    }

    async fn append<T: Serialize>(&self, file: &str, record: &T) -> Result<()> {
        let mut records = self.load_raw(file).await;
        records.push(serde_json::to_value(record)?);
        self.save(file, &records).await
    }

    /// 通知失敗不影響送出結果
    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.send(&notification).await {
            tracing::warn!("Failed to send notification '{}': {}", notification.subject, e);
        }
    }

    pub async fn submit_rsvp(
        &self,
        request: RsvpRequest,
        ip_address: Option<String>,
    ) -> Result<SubmissionReceipt> {
        let name = require_field("name", request.name.as_deref())?.to_string();
        let now = (self.clock)();

        let record = RsvpRecord {
            id: now.format(ID_FORMAT).to_string(),
            name,
            attendance: request
                .attendance
                .unwrap_or_else(|| "not_specified".to_string()),
            song: request.song.unwrap_or_default(),
            timestamp: iso_timestamp(now),
            ip_address,
        };

        self.append(RSVP_FILE, &record).await?;
        tracing::info!(id = %record.id, attendance = %record.attendance, "RSVP recorded");

        self.notify(notify::rsvp_notification(&record, now)).await;

        let message = match record.attendance.as_str() {
            "attending" => format!(
                "Thank you, {}! We can't wait to celebrate with you!",
                record.name
            ),
            "declining" => format!(
                "Thank you for letting us know, {}. We'll miss you but understand!",
                record.name
            ),
            _ => format!(
                "Thank you for your RSVP, {}! We'll be in touch soon.",
                record.name
            ),
        };

        Ok(SubmissionReceipt {
            id: record.id,
            message,
        })
    }

    pub async fn list_rsvps(&self) -> Vec<RsvpRecord> {
        self.load_list(RSVP_FILE).await
    }

    /// 以原始 JSON 統計，欄位缺漏的舊紀錄也算進總數
    pub async fn rsvp_stats(&self) -> RsvpStats {
        let rsvps = self.load_raw(RSVP_FILE).await;
        let count = |status: &str| {
            rsvps
                .iter()
                .filter(|r| r.get("attendance").and_then(Value::as_str) == Some(status))
                .count()
        };
        let attending = count("attending");
        let declining = count("declining");
        let total = rsvps.len();

        RsvpStats {
            total,
            attending,
            declining,
            pending: total - attending - declining,
        }
    }

    pub async fn submit_guestbook(
        &self,
        request: GuestbookRequest,
        ip_address: Option<String>,
    ) -> Result<SubmissionReceipt> {
        let name = require_field("name", request.name.as_deref())?.to_string();
        let relationship = require_field("relationship", request.relationship.as_deref())?.to_string();
        let message = require_field("message", request.message.as_deref())?.to_string();
        let now = (self.clock)();

        let record = GuestbookRecord {
            id: now.format(ID_FORMAT).to_string(),
            name,
            relationship,
            message,
            timestamp: iso_timestamp(now),
            date: now.format("%B %d, %Y").to_string(),
            ip_address,
        };

        self.append(GUESTBOOK_FILE, &record).await?;
        tracing::info!(id = %record.id, "Guest book message recorded");

        self.notify(notify::guestbook_notification(&record, now)).await;

        Ok(SubmissionReceipt {
            message: format!(
                "Thank you for your message, {}! We love reading your well wishes.",
                record.name
            ),
            id: record.id,
        })
    }

    /// 最新的 GUESTBOOK_PAGE_SIZE 筆留言，維持寫入順序
    pub async fn recent_guestbook(&self) -> Vec<GuestbookRecord> {
        let mut messages: Vec<GuestbookRecord> = self.load_list(GUESTBOOK_FILE).await;
        let skip = messages.len().saturating_sub(GUESTBOOK_PAGE_SIZE);
        messages.drain(..skip);
        messages
    }

    pub async fn submit_waitlist(
        &self,
        request: RsvpRequest,
        ip_address: Option<String>,
    ) -> Result<SubmissionReceipt> {
        let name = require_field("name", request.name.as_deref())?.to_string();
        let now = (self.clock)();

        let record = WaitlistRecord {
            id: now.format(ID_FORMAT).to_string(),
            name,
            attendance: request
                .attendance
                .unwrap_or_else(|| "waitlist".to_string()),
            song: request.song.unwrap_or_default(),
            timestamp: iso_timestamp(now),
            ip_address,
        };

        self.append(WAITLIST_FILE, &record).await?;
        tracing::info!(id = %record.id, "Waitlist entry recorded");

        self.notify(notify::waitlist_notification(&record, now)).await;

        Ok(SubmissionReceipt {
            message: format!(
                "Thank you, {}! We've added you to our waitlist and will contact you if space becomes available.",
                record.name
            ),
            id: record.id,
        })
    }

    pub async fn list_waitlist(&self) -> Vec<WaitlistRecord> {
        self.load_list(WAITLIST_FILE).await
    }

    async fn load_site_config_map(&self) -> Map<String, Value> {
        match self.storage.read_file(SITE_CONFIG_FILE).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::warn!("{} is not a JSON object, starting from defaults", SITE_CONFIG_FILE);
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        }
    }

    /// 缺少的欄位以預設值補上，只影響讀取結果
    pub async fn site_config(&self) -> SiteConfig {
        let map = self.load_site_config_map().await;
        serde_json::from_value(Value::Object(map)).unwrap_or_else(|e| {
            tracing::warn!("{} invalid ({}), using defaults", SITE_CONFIG_FILE, e);
            SiteConfig::default()
        })
    }

    /// 只覆寫有提供的欄位，其餘磁碟上的鍵值原封不動
    pub async fn update_site_config(&self, update: SiteConfigUpdate) -> Result<SiteConfig> {
        let mut map = self.load_site_config_map().await;
        if let Value::Object(changes) = serde_json::to_value(&update)? {
            for (key, value) in changes {
                if !value.is_null() {
                    map.insert(key, value);
                }
            }
        }
        self.save(SITE_CONFIG_FILE, &map).await?;
        tracing::info!("Site configuration updated");
        Ok(self.site_config().await)
    }

    pub async fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            timestamp: iso_timestamp((self.clock)()),
            data_files: DataFilesStatus {
                rsvp: self.storage.exists(RSVP_FILE).await,
                waitlist: self.storage.exists(WAITLIST_FILE).await,
                guestbook: self.storage.exists(GUESTBOOK_FILE).await,
                site_config: self.storage.exists(SITE_CONFIG_FILE).await,
            },
        }
    }
}

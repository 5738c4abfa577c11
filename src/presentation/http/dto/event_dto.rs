use serde::{Deserialize, Serialize};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use url::Url;

use crate::domain::value_objects::UploadEvent;

pub const SUBSCRIPTION_VALIDATION_EVENT: &str = "Microsoft.EventGrid.SubscriptionValidationEvent";
pub const BLOB_CREATED_EVENT: &str = "Microsoft.Storage.BlobCreated";

/// S3 `ObjectCreated` notification, as delivered by S3 event notifications
/// or an SNS/SQS relay.
#[derive(Debug, Deserialize)]
pub struct S3EventNotificationDto {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecordDto {
    #[serde(default)]
    pub event_name: Option<String>,
    pub s3: S3EntityDto,
}

#[derive(Debug, Deserialize)]
pub struct S3EntityDto {
    pub bucket: S3BucketDto,
    pub object: S3ObjectDto,
}

#[derive(Debug, Deserialize)]
pub struct S3BucketDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct S3ObjectDto {
    pub key: String,
}

impl S3EventNotificationDto {
    /// Records without an event name are taken as creations; named records
    /// other than `ObjectCreated:*` are dropped.
    pub fn into_upload_events(self) -> Vec<UploadEvent> {
        self.records
            .into_iter()
            .filter(|record| {
                record
                    .event_name
                    .as_deref()
                    .is_none_or(|name| name.starts_with("ObjectCreated"))
            })
            .map(|record| {
                UploadEvent::new(
                    record.s3.bucket.name,
                    decode_s3_key(&record.s3.object.key),
                )
            })
            .collect()
    }
}

/// S3 keys arrive form-encoded: `+` is a space and `%XX` an escaped byte.
pub fn decode_s3_key(raw: &str) -> String {
    percent_decode(&raw.replace('+', " "))
}

/// Blob URL path segments are percent-encoded; a literal `+` stays a plus.
fn decode_path_segment(raw: &str) -> String {
    percent_decode(raw)
}

/// Sequences that do not decode to UTF-8 are kept as written.
fn percent_decode(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGridEventDto {
    #[serde(default)]
    pub id: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionValidationResponseDto {
    pub validation_response: String,
}

impl EventGridEventDto {
    pub fn validation_code(&self) -> Option<&str> {
        if self.event_type != SUBSCRIPTION_VALIDATION_EVENT {
            return None;
        }
        self.data.get("validationCode").and_then(Value::as_str)
    }

    /// `None` for every event that is not a blob creation, and for blob
    /// URLs without both a container and a blob name.
    pub fn upload_event(&self) -> Option<UploadEvent> {
        if self.event_type != BLOB_CREATED_EVENT {
            return None;
        }

        let url = self.data.get("url").and_then(Value::as_str)?;
        let url = Url::parse(url).ok()?;
        let mut segments = url.path_segments()?;

        let container = segments.next().filter(|s| !s.is_empty())?;
        let key = segments.map(decode_path_segment).collect::<Vec<_>>().join("/");
        if key.is_empty() {
            return None;
        }

        Some(UploadEvent::new(decode_path_segment(container), key))
    }
}

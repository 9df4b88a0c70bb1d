use std::fmt;

use chrono::{DateTime, Utc};
use fees_client::{ApiRequest, Transport};
use serde_json::{json, Value};

use crate::probe::fetch_json;
use crate::recorder::Recorder;
use crate::shape::{required, Shape};
use crate::verdict::Status;

/// Prefix of every key the API issues.
pub const KEY_PREFIX: &str = "nga_";

/// Characters of the key shown in logs and verdict messages.
const VISIBLE_KEY_CHARS: usize = 20;

const GRANT: Shape = Shape::new(&[required("api_key"), required("success")]);

const WITHOUT_EMAIL: &str = "POST /api_key/generate - Without email";
const WITH_EMAIL: &str = "POST /api_key/generate - With email";

/// A key issued during this run. Lives only in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
    obtained_at: DateTime<Utc>,
}

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>, obtained_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            obtained_at,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    /// First characters of the key followed by `...`.
    #[must_use]
    pub fn masked(&self) -> String {
        let visible: String = self.value.chars().take(VISIBLE_KEY_CHARS).collect();
        format!("{visible}...")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &self.masked())
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

fn generate_request(email: Option<&str>) -> ApiRequest {
    let body = email.map_or_else(|| json!({}), |email| json!({ "user_email": email }));
    ApiRequest::post("/api_key/generate", body)
}

/// `POST /api_key/generate`, first without and then with an email.
///
/// Returns the key from the first variant; `None` means every
/// key-dependent check must be skipped.
pub async fn check_generate_api_key<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    email: Option<&str>,
) -> Option<ApiKey> {
    let doc = match fetch_json(transport, &generate_request(None)).await {
        Ok(doc) => doc,
        Err(failure) => {
            recorder.fail(WITHOUT_EMAIL, failure.to_string());
            return None;
        }
    };

    let report = GRANT.validate(&doc);
    if report.status() == Status::Fail {
        let detail = report.message().unwrap_or_default();
        recorder.fail(
            WITHOUT_EMAIL,
            format!("Missing required fields in response. {detail}"),
        );
        return None;
    }

    let issued = doc["api_key"]
        .as_str()
        .filter(|key| doc["success"] == Value::Bool(true) && key.starts_with(KEY_PREFIX));
    let Some(value) = issued else {
        recorder.fail(WITHOUT_EMAIL, "Invalid response structure");
        return None;
    };

    let key = ApiKey::new(value, Utc::now());
    recorder.pass_with(WITHOUT_EMAIL, format!("Generated key: {}", key.masked()));

    if let Some(email) = email {
        check_with_email(transport, recorder, email).await;
    }

    Some(key)
}

async fn check_with_email<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    email: &str,
) {
    match fetch_json(transport, &generate_request(Some(email))).await {
        Ok(doc) if doc["success"] == Value::Bool(true) && doc.get("api_key").is_some() => {
            recorder.pass(WITH_EMAIL);
        }
        Ok(_) => recorder.warn(WITH_EMAIL, "Response structure issue"),
        Err(failure) => recorder.fail(WITH_EMAIL, failure.to_string()),
    }
}

//! Expected-shape descriptors for decoded response documents.
//!
//! Each endpoint declares the fields it expects, tagged with a severity.
//! A missing `Required` field fails the verdict, a missing `Optional` one
//! only warns.

use serde_json::Value;

use crate::recorder::Recorder;
use crate::verdict::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub severity: Severity,
}

#[must_use]
pub const fn required(name: &'static str) -> Field {
    Field {
        name,
        severity: Severity::Required,
    }
}

#[must_use]
pub const fn optional(name: &'static str) -> Field {
    Field {
        name,
        severity: Severity::Optional,
    }
}

/// Ordered list of expected fields.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    fields: &'static [Field],
}

impl Shape {
    #[must_use]
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Compare `document` against the expected fields.
    ///
    /// A document that is not a JSON object is missing every field.
    #[must_use]
    pub fn validate(&self, document: &Value) -> ShapeReport {
        let object = document.as_object();
        let mut report = ShapeReport::default();

        for field in self.fields {
            if object.is_some_and(|o| o.contains_key(field.name)) {
                continue;
            }
            match field.severity {
                Severity::Required => report.missing_required.push(field.name),
                Severity::Optional => report.missing_optional.push(field.name),
            }
        }

        report
    }
}

/// Missing field names, split by severity, in descriptor order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShapeReport {
    pub missing_required: Vec<&'static str>,
    pub missing_optional: Vec<&'static str>,
}

impl ShapeReport {
    #[must_use]
    pub fn status(&self) -> Status {
        if !self.missing_required.is_empty() {
            Status::Fail
        } else if !self.missing_optional.is_empty() {
            Status::Warn
        } else {
            Status::Pass
        }
    }

    /// Explanation for a non-passing report.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.status() {
            Status::Fail => Some(format!(
                "Missing fields: [{}]",
                self.missing_required.join(", ")
            )),
            Status::Warn => Some(format!("Missing: [{}]", self.missing_optional.join(", "))),
            Status::Pass => None,
        }
    }

    /// Record this report as one verdict. `pass_message` is used only on PASS.
    pub fn record(&self, recorder: &mut Recorder, name: &str, pass_message: Option<String>) {
        let status = self.status();
        let message = match status {
            Status::Pass => pass_message,
            Status::Fail | Status::Warn => self.message(),
        };
        recorder.record(name, status, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MIXED: Shape = Shape::new(&[
        required("id"),
        required("name"),
        optional("amount"),
        optional("currency"),
    ]);

    #[test]
    fn complete_document_passes() {
        let report = MIXED.validate(&json!({
            "id": 1, "name": "NIN", "amount": 0, "currency": "NGN", "extra": true
        }));
        assert_eq!(report.status(), Status::Pass);
        assert_eq!(report.message(), None);
    }

    #[test]
    fn missing_optional_warns() {
        let report = MIXED.validate(&json!({"id": 1, "name": "NIN"}));
        assert_eq!(report.status(), Status::Warn);
        assert_eq!(report.message().as_deref(), Some("Missing: [amount, currency]"));
    }

    #[test]
    fn missing_required_fails_even_with_optional_missing() {
        let report = MIXED.validate(&json!({"id": 1}));
        assert_eq!(report.status(), Status::Fail);
        assert_eq!(report.missing_required, vec!["name"]);
        assert_eq!(report.missing_optional, vec!["amount", "currency"]);
        assert_eq!(report.message().as_deref(), Some("Missing fields: [name]"));
    }

    #[test]
    fn null_field_counts_as_present() {
        let report = MIXED.validate(&json!({
            "id": 1, "name": null, "amount": null, "currency": null
        }));
        assert_eq!(report.status(), Status::Pass);
    }

    #[test]
    fn non_object_misses_everything() {
        let report = MIXED.validate(&json!([{"id": 1}]));
        assert_eq!(report.missing_required, vec!["id", "name"]);
        assert_eq!(report.status(), Status::Fail);
    }

    #[test]
    fn record_uses_pass_message_only_on_pass() {
        let mut recorder = Recorder::new();
        MIXED
            .validate(&json!({"id": 1, "name": "a", "amount": 1, "currency": "NGN"}))
            .record(&mut recorder, "ok", Some("Fee: a".into()));
        MIXED
            .validate(&json!({}))
            .record(&mut recorder, "broken", Some("Fee: ?".into()));

        let verdicts = recorder.verdicts();
        assert_eq!(verdicts[0].message(), Some("Fee: a"));
        assert_eq!(verdicts[1].status(), Status::Fail);
        assert_eq!(verdicts[1].message(), Some("Missing fields: [id, name]"));
    }
}

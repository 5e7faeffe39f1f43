use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";

/// A student row as persisted by the remote store. Field names match the
/// hosted table exactly. `courses` stays in its JSON-encoded string form and
/// is only decoded at the display/editing edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub cohort: String,
    #[serde(default)]
    pub courses: Option<String>,
    #[serde(default)]
    pub date_joined: Option<NaiveDate>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub status: bool,
    pub student_class: String,
}

/// Insert payload: everything but the identifier, which the store assigns.
#[derive(Debug, Clone, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub cohort: String,
    pub courses: String,
    pub date_joined: NaiveDate,
    pub status: bool,
    pub student_class: String,
}

/// Raw create-form input before validation. `status` carries the two-valued
/// choice from the form ("Online"/"Offline") and becomes a boolean only once
/// validation passes.
#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub name: String,
    pub cohort: String,
    pub courses: Vec<String>,
    pub date_joined: String,
    pub status: String,
    pub student_class: String,
}

impl StudentDraft {
    /// All fields non-empty and at least one course selected, or the single
    /// form-level message. No per-field detail.
    pub fn validate(&self) -> Result<NewStudent, String> {
        if self.name.trim().is_empty()
            || self.cohort.trim().is_empty()
            || self.courses.is_empty()
            || self.date_joined.trim().is_empty()
            || self.status.trim().is_empty()
            || self.student_class.trim().is_empty()
        {
            return Err(REQUIRED_FIELDS_MESSAGE.to_string());
        }

        let date_joined = self
            .date_joined
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| format!("invalid date_joined: {}", self.date_joined))?;

        Ok(NewStudent {
            name: self.name.trim().to_string(),
            cohort: self.cohort.trim().to_string(),
            courses: encode_courses(&self.courses),
            date_joined,
            status: self.status == "Online",
            student_class: self.student_class.trim().to_string(),
        })
    }
}

/// Partial update body. The identifier is never part of this payload; the
/// store call keys on it separately. Unknown fields are rejected so a full
/// record (id included) cannot slip through as a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_class: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cohort.is_none()
            && self.courses.is_none()
            && self.date_joined.is_none()
            && self.last_login.is_none()
            && self.status.is_none()
            && self.student_class.is_none()
    }

    /// Merge the present fields into a record, leaving the rest untouched.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(v) = &self.name {
            student.name = v.clone();
        }
        if let Some(v) = &self.cohort {
            student.cohort = v.clone();
        }
        if let Some(v) = &self.courses {
            student.courses = Some(v.clone());
        }
        if let Some(v) = self.date_joined {
            student.date_joined = Some(v);
        }
        if let Some(v) = self.last_login {
            student.last_login = Some(v);
        }
        if let Some(v) = self.status {
            student.status = v;
        }
        if let Some(v) = &self.student_class {
            student.student_class = v.clone();
        }
    }
}

/// Decode the JSON-encoded course list. Any malformed payload yields `None`;
/// display skips the chips entirely rather than surfacing a partial decode.
pub fn decode_courses(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).ok()
}

pub fn encode_courses(courses: &[String]) -> String {
    serde_json::to_string(courses).unwrap_or_else(|_| "[]".to_string())
}

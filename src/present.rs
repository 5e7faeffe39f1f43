use serde_json::json;

use crate::model::{self, Student};

const DATE_FORMAT: &str = "%b %d, %Y";
const TIMESTAMP_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// Display projection for one table row. The renderer shows exactly this;
/// all decoding and formatting happens here.
pub fn project_row(student: &Student, expanded: bool) -> serde_json::Value {
    json!({
        "id": student.id,
        "name": student.name,
        "cohort": student.cohort,
        "courseChips": course_chips(student),
        "dateJoined": student
            .date_joined
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        "lastLogin": student
            .last_login
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "Never".to_string()),
        "statusIndicator": if student.status { "green" } else { "red" },
        "expanded": expanded,
    })
}

pub fn project_rows(records: &[Student], active_row: Option<usize>) -> Vec<serde_json::Value> {
    records
        .iter()
        .enumerate()
        .map(|(i, s)| project_row(s, active_row == Some(i)))
        .collect()
}

/// Course chips for a row. An absent or undecodable course list renders no
/// chips at all.
fn course_chips(student: &Student) -> Vec<String> {
    let Some(raw) = student.courses.as_deref() else {
        return Vec::new();
    };
    let Some(courses) = model::decode_courses(raw) else {
        return Vec::new();
    };
    courses
        .iter()
        .map(|course| format!("CBSE {} {}", student.student_class, course))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn student() -> Student {
        Student {
            id: "s1".into(),
            name: "Alice".into(),
            cohort: "AY 2024-2025".into(),
            courses: Some("[\"Math\",\"Science\"]".into()),
            date_joined: NaiveDate::from_ymd_opt(2025, 1, 2),
            last_login: Utc.with_ymd_and_hms(2025, 3, 4, 19, 30, 0).single(),
            status: true,
            student_class: "9".into(),
        }
    }

    #[test]
    fn chips_carry_class_prefixed_labels_in_order() {
        let row = project_row(&student(), false);
        assert_eq!(
            row["courseChips"],
            serde_json::json!(["CBSE 9 Math", "CBSE 9 Science"])
        );
    }

    #[test]
    fn undecodable_course_list_renders_no_chips() {
        let mut s = student();
        s.courses = Some("not json".into());
        assert_eq!(project_row(&s, false)["courseChips"], serde_json::json!([]));

        s.courses = None;
        assert_eq!(project_row(&s, false)["courseChips"], serde_json::json!([]));
    }

    #[test]
    fn dates_format_for_display() {
        let row = project_row(&student(), false);
        assert_eq!(row["dateJoined"], "Jan 02, 2025");
        assert_eq!(row["lastLogin"], "Mar 04, 2025, 07:30 PM");
    }

    #[test]
    fn absent_last_login_renders_the_never_sentinel() {
        let mut s = student();
        s.last_login = None;
        assert_eq!(project_row(&s, false)["lastLogin"], "Never");
    }

    #[test]
    fn absent_join_date_renders_empty() {
        let mut s = student();
        s.date_joined = None;
        assert_eq!(project_row(&s, false)["dateJoined"], "");
    }

    #[test]
    fn status_boolean_maps_to_indicator_color() {
        let mut s = student();
        assert_eq!(project_row(&s, false)["statusIndicator"], "green");
        s.status = false;
        assert_eq!(project_row(&s, false)["statusIndicator"], "red");
    }

    #[test]
    fn only_the_active_row_is_expanded() {
        let records = vec![student(), student(), student()];
        let rows = project_rows(&records, Some(1));
        let expanded: Vec<bool> = rows
            .iter()
            .map(|r| r["expanded"].as_bool().unwrap_or(false))
            .collect();
        assert_eq!(expanded, vec![false, true, false]);
    }
}

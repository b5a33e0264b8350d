use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(alias = "studentID", deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "fName", default)]
    pub first_name: String,
    #[serde(alias = "lName", default)]
    pub last_name: String,
    #[serde(alias = "dob", default)]
    pub date_of_birth: String,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// ISO form of the date of birth when it parses as a calendar date.
    pub fn date_of_birth_iso(&self) -> Option<String> {
        parse_birth_date(&self.date_of_birth).map(|d| d.format("%Y-%m-%d").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(alias = "classID", deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "className", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(alias = "scoreID", deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "studentID", deserialize_with = "de_id")]
    pub student_id: String,
    #[serde(alias = "classID", deserialize_with = "de_id")]
    pub class_id: String,
    #[serde(alias = "score")]
    pub value: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

/// Ids are opaque strings; integer ids from older feeds are kept as their decimal text.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_field_names_and_integer_ids_decode() {
        let s: Student = serde_json::from_value(json!({
            "studentID": 2, "fName": "Jane", "lName": "Smith", "dob": "2001-02-02"
        }))
        .expect("student");
        assert_eq!(s.id, "2");
        assert_eq!(s.display_name(), "Jane Smith");

        let sc: Score = serde_json::from_value(json!({
            "scoreID": 5, "studentID": 2, "classID": "2", "score": 93
        }))
        .expect("score");
        assert_eq!(sc.student_id, "2");
        assert_eq!(sc.class_id, "2");
        assert_eq!(sc.value, 93);
    }

    #[test]
    fn camel_case_names_decode() {
        let c: Class = serde_json::from_value(json!({ "id": "m-1", "name": "Math" })).expect("class");
        assert_eq!(c.id, "m-1");
        assert_eq!(c.name, "Math");
    }

    #[test]
    fn birth_date_accepts_a_few_layouts() {
        assert_eq!(
            parse_birth_date("2000/01/31").map(|d| d.to_string()),
            Some("2000-01-31".to_string())
        );
        assert_eq!(
            parse_birth_date("31.01.2000").map(|d| d.to_string()),
            Some("2000-01-31".to_string())
        );
        assert_eq!(parse_birth_date("sometime"), None);
        assert_eq!(parse_birth_date(""), None);
    }
}

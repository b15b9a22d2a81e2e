use serde::{Deserialize, Serialize};

use crate::upload::AttachmentKind;

/// Domain records as the backend serves them. Required fields are plain
/// typed fields so a missing one surfaces as a tagged decode error;
/// optional fields default to `None` instead of throwing. A `None` file
/// reference means "not yet uploaded", never "upload failed".

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub year: i64,
    pub semester: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub pdf_name: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub cover_name: Option<String>,
}

impl Book {
    /// Best-effort local patch after a successful upload; the next full
    /// refresh from the server is authoritative.
    pub(crate) fn apply_file_ref(&mut self, kind: AttachmentKind, file_ref: &FileRef) {
        match kind {
            AttachmentKind::Pdf => {
                self.pdf_url = Some(file_ref.url.clone());
                self.pdf_name = Some(file_ref.filename.clone());
            }
            AttachmentKind::Cover => {
                self.cover_url = Some(file_ref.url.clone());
                self.cover_name = Some(file_ref.filename.clone());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaper {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub year: i64,
    pub semester: i64,
    #[serde(default)]
    pub exam_type: Option<String>,
    #[serde(default)]
    pub marks: Option<i64>,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub pdf_name: Option<String>,
}

impl QuestionPaper {
    pub(crate) fn apply_file_ref(&mut self, kind: AttachmentKind, file_ref: &FileRef) {
        // Papers only carry a PDF slot; a cover upload against a paper is
        // rejected by the backend long before it reaches this patch.
        if kind == AttachmentKind::Pdf {
            self.pdf_url = Some(file_ref.url.clone());
            self.pdf_name = Some(file_ref.filename.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    SuperAdmin,
    CollegeAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superAdmin",
            Role::CollegeAdmin => "collegeAdmin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "superAdmin" => Some(Role::SuperAdmin),
            "collegeAdmin" => Some(Role::CollegeAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub college_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub announcement: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub expires_at: i64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub page: u32,
    #[serde(default)]
    pub total: i64,
}

/// File reference echoed back by an upload endpoint: the public or signed
/// URL plus the original filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub url: String,
    pub filename: String,
}

// Create/update payloads. Business validation stays with the caller; the
// backend enforces its own rules and rejects what it will not take.

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub name: String,
    pub subject: String,
    pub year: i64,
    pub semester: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDraft {
    pub title: String,
    pub subject: String,
    pub year: i64,
    pub semester: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_decodes_with_missing_optionals() {
        let raw = serde_json::json!({
            "id": "b1",
            "name": "Algorithms",
            "subject": "CS",
            "year": 2024,
            "semester": 3
        });
        let book: Book = serde_json::from_value(raw).expect("book should decode");
        assert_eq!(book.name, "Algorithms");
        assert!(book.pdf_url.is_none());
        assert!(book.cover_url.is_none());
        assert!(book.description.is_none());
    }

    #[test]
    fn book_missing_required_field_names_it() {
        let raw = serde_json::json!({
            "id": "b1",
            "subject": "CS",
            "year": 2024,
            "semester": 3
        });
        let err = serde_json::from_value::<Book>(raw).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn paper_tolerates_null_optionals() {
        let raw = serde_json::json!({
            "id": "p1",
            "title": "Midterm",
            "subject": "Math",
            "year": 2,
            "semester": 4,
            "examType": null,
            "pdfUrl": null
        });
        let paper: QuestionPaper = serde_json::from_value(raw).expect("paper should decode");
        assert!(paper.exam_type.is_none());
        assert!(paper.pdf_url.is_none());
    }

    #[test]
    fn role_round_trips_wire_names() {
        assert_eq!(Role::parse("superAdmin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("collegeAdmin"), Some(Role::CollegeAdmin));
        assert_eq!(Role::parse("editor"), None);
        assert_eq!(Role::SuperAdmin.as_str(), "superAdmin");
    }

    #[test]
    fn apply_file_ref_fills_the_right_slot() {
        let mut book = Book {
            id: "b1".to_string(),
            name: "Algorithms".to_string(),
            subject: "CS".to_string(),
            year: 2024,
            semester: 3,
            description: None,
            college_id: None,
            pdf_url: None,
            pdf_name: None,
            cover_url: None,
            cover_name: None,
        };
        book.apply_file_ref(
            AttachmentKind::Pdf,
            &FileRef {
                url: "https://cdn.example/b1.pdf".to_string(),
                filename: "book.pdf".to_string(),
            },
        );
        assert_eq!(book.pdf_name.as_deref(), Some("book.pdf"));
        assert!(book.cover_url.is_none());
    }

    #[test]
    fn draft_serializes_camel_case_without_empty_optionals() {
        let draft = BookDraft {
            name: "Algorithms".to_string(),
            subject: "CS".to_string(),
            year: 2024,
            semester: 3,
            description: None,
            college_id: Some("c9".to_string()),
        };
        let value = serde_json::to_value(&draft).expect("draft should serialize");
        assert_eq!(value["collegeId"], "c9");
        assert!(value.get("description").is_none());
    }
}

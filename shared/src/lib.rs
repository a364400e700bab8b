use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry as the backend returns it. `available_quantity` is the
/// number of copies currently on the shelf; `0 <= available_quantity <=
/// quantity` is checked at form-input time only, the backend owns the
/// authoritative accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    pub quantity: i32,
    pub available_quantity: i32,
}

/// Library member. `member_id` is the external membership code, distinct
/// from the database `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub status: MemberStatus,
    /// RFC 3339 timestamp assigned by the backend on registration.
    pub registration_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Active,
        MemberStatus::Inactive,
        MemberStatus::Suspended,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Inactive => "INACTIVE",
            MemberStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn from_label(label: &str) -> Option<MemberStatus> {
        MemberStatus::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// One borrow/return record linking a book copy to a member. Open while
/// `return_date` is `None`; the status is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub book: Book,
    pub member: Member,
    pub borrow_date: String,
    pub due_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Borrowed,
    Overdue,
    Returned,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "Borrowed",
            TransactionStatus::Overdue => "Overdue",
            TransactionStatus::Returned => "Returned",
        }
    }
}

impl Transaction {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Derive the display status against an explicit instant: a returned
    /// transaction is Returned regardless of its due date, an open one is
    /// Overdue once the due date has passed. An unparseable due date
    /// counts as not yet due.
    pub fn status(&self, now: DateTime<Utc>) -> TransactionStatus {
        if self.return_date.is_some() {
            return TransactionStatus::Returned;
        }
        match parse_instant(&self.due_date) {
            Some(due) if due < now => TransactionStatus::Overdue,
            _ => TransactionStatus::Borrowed,
        }
    }
}

/// Parse a backend timestamp. The API mostly sends RFC 3339, but borrow
/// requests carry plain `YYYY-MM-DD` due dates, which are taken as
/// midnight UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Book fields sent on create/update; the id travels in the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    pub quantity: i32,
    pub available_quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub book_id: i64,
    pub member_id: i64,
    /// RFC 3339; the form sends the chosen day at midnight UTC.
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Error envelope the backend attaches to non-2xx responses. `message`
/// is optional; callers fall back to a generic string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Records that carry a unique numeric id, used for table keys and
/// replace/remove-by-id list reconciliation.
pub trait HasId {
    fn record_id(&self) -> i64;
}

impl HasId for Book {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl HasId for Member {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl HasId for Transaction {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn book(id: i64) -> Book {
        Book {
            id,
            title: "The Rust Programming Language".to_string(),
            author: "Klabnik & Nichols".to_string(),
            isbn: "978-1718500440".to_string(),
            publication_year: Some(2019),
            quantity: 5,
            available_quantity: 3,
        }
    }

    fn member(id: i64) -> Member {
        Member {
            id,
            member_id: "M-001".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            status: MemberStatus::Active,
            registration_date: "2024-01-15T10:00:00Z".to_string(),
        }
    }

    fn transaction(due_date: &str, return_date: Option<&str>) -> Transaction {
        Transaction {
            id: 1,
            book: book(1),
            member: member(1),
            borrow_date: "2025-06-01T00:00:00Z".to_string(),
            due_date: due_date.to_string(),
            return_date: return_date.map(str::to_string),
        }
    }

    #[test]
    fn test_status_overdue_when_past_due_and_not_returned() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let tx = transaction("2025-06-15T00:00:00Z", None);
        assert_eq!(tx.status(now), TransactionStatus::Overdue);
    }

    #[test]
    fn test_status_borrowed_when_due_in_future() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let tx = transaction("2025-07-01T00:00:00Z", None);
        assert_eq!(tx.status(now), TransactionStatus::Borrowed);
    }

    #[test]
    fn test_status_returned_regardless_of_due_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let tx = transaction("2025-06-01T00:00:00Z", Some("2025-06-10T00:00:00Z"));
        assert_eq!(tx.status(now), TransactionStatus::Returned);
        let tx = transaction("2099-01-01T00:00:00Z", Some("2025-06-10T00:00:00Z"));
        assert_eq!(tx.status(now), TransactionStatus::Returned);
    }

    #[test]
    fn test_status_unparseable_due_date_counts_as_borrowed() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let tx = transaction("whenever", None);
        assert_eq!(tx.status(now), TransactionStatus::Borrowed);
    }

    #[test]
    fn test_parse_instant_accepts_rfc3339_and_plain_dates() {
        let rfc = parse_instant("2025-06-15T08:30:00+02:00").unwrap();
        assert_eq!(rfc, Utc.with_ymd_and_hms(2025, 6, 15, 6, 30, 0).unwrap());

        let plain = parse_instant("2025-06-15").unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap());

        assert!(parse_instant("not a date").is_none());
    }

    #[test]
    fn test_member_status_wire_labels() {
        let json = serde_json::to_string(&MemberStatus::Suspended).unwrap();
        assert_eq!(json, "\"SUSPENDED\"");
        let status: MemberStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, MemberStatus::Active);
        assert_eq!(MemberStatus::from_label("INACTIVE"), Some(MemberStatus::Inactive));
        assert_eq!(MemberStatus::from_label("UNKNOWN"), None);
    }

    #[test]
    fn test_book_uses_camel_case_field_names() {
        let value = serde_json::to_value(book(7)).unwrap();
        assert_eq!(value["publicationYear"], 2019);
        assert_eq!(value["availableQuantity"], 3);
        assert!(value.get("available_quantity").is_none());
    }

    #[test]
    fn test_book_tolerates_missing_publication_year() {
        let parsed: Book = serde_json::from_str(
            r#"{"id":1,"title":"T","author":"A","isbn":"I","quantity":2,"availableQuantity":1}"#,
        )
        .unwrap();
        assert_eq!(parsed.publication_year, None);
    }

    #[test]
    fn test_borrow_request_wire_shape() {
        let request = BorrowRequest {
            book_id: 3,
            member_id: 8,
            due_date: "2025-07-01T00:00:00+00:00".to_string(),
        };
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["bookId"], 3);
        assert_eq!(value["memberId"], 8);
        assert_eq!(value["dueDate"], "2025-07-01T00:00:00+00:00");
    }

    #[test]
    fn test_return_request_sends_bare_id_object() {
        let value = serde_json::to_value(ReturnRequest { id: 42 }).unwrap();
        assert_eq!(value, serde_json::json!({ "id": 42 }));
    }

    #[test]
    fn test_error_body_message_is_optional() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, None);
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Book not found"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Book not found"));
    }
}

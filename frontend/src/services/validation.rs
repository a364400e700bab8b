use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use shared::{Book, BookPayload, BorrowRequest, Member, MemberPayload, MemberStatus};

/// Field-keyed validation errors. The reserved `"submit"` key carries
/// non-field errors surfaced after a failed API call.
pub type FieldErrors = HashMap<&'static str, String>;

pub const SUBMIT: &str = "submit";

/// Same shape check the membership office's paper form applies:
/// something before the @, a dot somewhere in the domain, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// Book form state, kept as raw strings the way the inputs hold them.
#[derive(Clone, PartialEq, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: String,
    pub quantity: String,
    pub available_quantity: String,
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            publication_year: book
                .publication_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            quantity: book.quantity.to_string(),
            available_quantity: book.available_quantity.to_string(),
        }
    }

    /// Only meaningful after `validate_book` came back clean.
    pub fn to_payload(&self) -> BookPayload {
        BookPayload {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            publication_year: self.publication_year.trim().parse().ok(),
            quantity: self.quantity.trim().parse().unwrap_or_default(),
            available_quantity: self.available_quantity.trim().parse().unwrap_or_default(),
        }
    }
}

pub fn validate_book(draft: &BookDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required".to_string());
    }
    if draft.author.trim().is_empty() {
        errors.insert("author", "Author is required".to_string());
    }
    if draft.isbn.trim().is_empty() {
        errors.insert("isbn", "ISBN is required".to_string());
    }
    let quantity = parse_count(&draft.quantity, "quantity", "Quantity", &mut errors);
    let available = parse_count(
        &draft.available_quantity,
        "availableQuantity",
        "Available quantity",
        &mut errors,
    );
    if let (Some(quantity), Some(available)) = (quantity, available) {
        if available > quantity {
            errors.insert(
                "availableQuantity",
                "Available quantity cannot exceed total quantity".to_string(),
            );
        }
    }
    errors
}

fn parse_count(
    value: &str,
    key: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(key, format!("{label} is required"));
        return None;
    }
    match value.parse::<i32>() {
        Ok(count) if count >= 0 => Some(count),
        _ => {
            errors.insert(key, format!("{label} must be a non-negative number"));
            None
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct MemberDraft {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub status: MemberStatus,
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            member_id: String::new(),
            name: String::new(),
            email: String::new(),
            status: MemberStatus::Active,
        }
    }
}

impl MemberDraft {
    pub fn from_member(member: &Member) -> Self {
        Self {
            member_id: member.member_id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            status: member.status,
        }
    }

    pub fn to_payload(&self) -> MemberPayload {
        MemberPayload {
            member_id: self.member_id.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            status: self.status,
        }
    }
}

pub fn validate_member(draft: &MemberDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.member_id.trim().is_empty() {
        errors.insert("memberId", "Member ID is required".to_string());
    }
    if draft.name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    }
    if draft.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !is_valid_email(draft.email.trim()) {
        errors.insert("email", "Email is invalid".to_string());
    }
    errors
}

/// Borrow form state; the selects hold ids as strings, empty = nothing
/// selected.
#[derive(Clone, PartialEq)]
pub struct BorrowDraft {
    pub book_id: String,
    pub member_id: String,
    pub due_date: String,
}

impl Default for BorrowDraft {
    fn default() -> Self {
        Self {
            book_id: String::new(),
            member_id: String::new(),
            due_date: default_due_date(),
        }
    }
}

impl BorrowDraft {
    /// Only meaningful after `validate_borrow` came back clean.
    pub fn to_request(&self) -> Option<BorrowRequest> {
        Some(BorrowRequest {
            book_id: self.book_id.parse().ok()?,
            member_id: self.member_id.parse().ok()?,
            due_date: due_date_to_rfc3339(&self.due_date)?,
        })
    }
}

/// Loan period default, two weeks out.
pub fn default_due_date() -> String {
    (Utc::now() + Duration::days(14)).format("%Y-%m-%d").to_string()
}

pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// The date input yields `YYYY-MM-DD`; the backend wants a full
/// timestamp, taken as midnight UTC of the chosen day.
pub fn due_date_to_rfc3339(date: &str) -> Option<String> {
    let date = date.parse::<NaiveDate>().ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().to_rfc3339())
}

pub fn validate_borrow(draft: &BorrowDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.book_id.is_empty() {
        errors.insert("bookId", "Book is required".to_string());
    }
    if draft.member_id.is_empty() {
        errors.insert("memberId", "Member is required".to_string());
    } else if draft.member_id.parse::<i64>().is_err() {
        errors.insert("memberId", "Member is invalid".to_string());
    }
    if !draft.book_id.is_empty() && draft.book_id.parse::<i64>().is_err() {
        errors.insert("bookId", "Book is invalid".to_string());
    }
    if draft.due_date.is_empty() {
        errors.insert("dueDate", "Due date is required".to_string());
    } else if due_date_to_rfc3339(&draft.due_date).is_none() {
        errors.insert("dueDate", "Due date is invalid".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_book_draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441172719".to_string(),
            publication_year: "1965".to_string(),
            quantity: "5".to_string(),
            available_quantity: "5".to_string(),
        }
    }

    #[test]
    fn test_valid_book_draft_passes() {
        assert!(validate_book(&valid_book_draft()).is_empty());
    }

    #[test]
    fn test_book_required_fields() {
        let errors = validate_book(&BookDraft::default());
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("author"));
        assert!(errors.contains_key("isbn"));
        assert!(errors.contains_key("quantity"));
        assert!(errors.contains_key("availableQuantity"));
    }

    #[test]
    fn test_available_quantity_must_not_exceed_quantity() {
        let mut draft = valid_book_draft();
        draft.quantity = "5".to_string();
        draft.available_quantity = "6".to_string();
        let errors = validate_book(&draft);
        assert_eq!(
            errors.get("availableQuantity").map(String::as_str),
            Some("Available quantity cannot exceed total quantity")
        );
    }

    #[test]
    fn test_negative_and_garbage_counts_are_rejected() {
        let mut draft = valid_book_draft();
        draft.quantity = "-1".to_string();
        assert!(validate_book(&draft).contains_key("quantity"));
        draft.quantity = "many".to_string();
        assert!(validate_book(&draft).contains_key("quantity"));
    }

    #[test]
    fn test_book_payload_omits_blank_publication_year() {
        let mut draft = valid_book_draft();
        draft.publication_year = String::new();
        assert_eq!(draft.to_payload().publication_year, None);
        assert_eq!(valid_book_draft().to_payload().publication_year, Some(1965));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("reader.one@library.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
    }

    #[test]
    fn test_member_validation() {
        let draft = MemberDraft {
            member_id: "M-100".to_string(),
            name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            status: MemberStatus::Active,
        };
        assert!(validate_member(&draft).is_empty());

        let mut bad = draft.clone();
        bad.email = "not-an-email".to_string();
        assert_eq!(validate_member(&bad).get("email").map(String::as_str), Some("Email is invalid"));

        let errors = validate_member(&MemberDraft::default());
        assert!(errors.contains_key("memberId"));
        assert!(errors.contains_key("name"));
        assert_eq!(errors.get("email").map(String::as_str), Some("Email is required"));
    }

    #[test]
    fn test_borrow_validation_requires_selections() {
        let errors = validate_borrow(&BorrowDraft {
            book_id: String::new(),
            member_id: String::new(),
            due_date: String::new(),
        });
        assert!(errors.contains_key("bookId"));
        assert!(errors.contains_key("memberId"));
        assert!(errors.contains_key("dueDate"));
    }

    #[test]
    fn test_borrow_draft_converts_to_request() {
        let draft = BorrowDraft {
            book_id: "3".to_string(),
            member_id: "8".to_string(),
            due_date: "2025-07-01".to_string(),
        };
        assert!(validate_borrow(&draft).is_empty());
        let request = draft.to_request().unwrap();
        assert_eq!(request.book_id, 3);
        assert_eq!(request.member_id, 8);
        assert_eq!(request.due_date, "2025-07-01T00:00:00+00:00");
    }

    #[test]
    fn test_default_due_date_is_well_formed() {
        assert!(due_date_to_rfc3339(&default_due_date()).is_some());
    }
}

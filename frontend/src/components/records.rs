use chrono::Utc;
use shared::{parse_instant, Member, MemberStatus, Transaction, TransactionStatus};
use yew::prelude::*;

use crate::components::data_table::TableRecord;

/// Backend timestamps rendered for humans; anything unparseable is shown
/// as-is rather than hidden.
pub fn format_date(value: &str) -> String {
    match parse_instant(value) {
        Some(instant) => instant.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

pub fn member_status_badge(status: MemberStatus) -> Html {
    let class = match status {
        MemberStatus::Active => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-green-100 text-green-800",
        MemberStatus::Inactive => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-gray-100 text-gray-800",
        MemberStatus::Suspended => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-red-100 text-red-800",
    };
    html! { <span {class}>{ status.label() }</span> }
}

pub fn transaction_status_badge(transaction: &Transaction) -> Html {
    let status = transaction.status(Utc::now());
    let class = match status {
        TransactionStatus::Returned => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-green-100 text-green-800",
        TransactionStatus::Overdue => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-red-100 text-red-800",
        TransactionStatus::Borrowed => "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-yellow-100 text-yellow-800",
    };
    html! { <span {class}>{ status.label() }</span> }
}

impl TableRecord for shared::Book {
    fn cell(&self, key: &str) -> Html {
        match key {
            "id" => html! { { self.id } },
            "title" => html! { { &self.title } },
            "author" => html! { { &self.author } },
            "isbn" => html! { { &self.isbn } },
            "publicationYear" => match self.publication_year {
                Some(year) => html! { { year } },
                None => html! { { "—" } },
            },
            "quantity" => html! { { self.quantity } },
            "availableQuantity" => html! { { self.available_quantity } },
            _ => html! {},
        }
    }
}

impl TableRecord for Member {
    fn cell(&self, key: &str) -> Html {
        match key {
            "id" => html! { { self.id } },
            "memberId" => html! { { &self.member_id } },
            "name" => html! { { &self.name } },
            "email" => html! { { &self.email } },
            "registrationDate" => html! { { format_date(&self.registration_date) } },
            "status" => member_status_badge(self.status),
            _ => html! {},
        }
    }
}

impl TableRecord for Transaction {
    fn cell(&self, key: &str) -> Html {
        match key {
            "id" => html! { { self.id } },
            "book" => html! { { &self.book.title } },
            "member" => html! { { &self.member.name } },
            "borrowDate" => html! { { format_date(&self.borrow_date) } },
            "dueDate" => html! { { format_date(&self.due_date) } },
            "returnDate" => match &self.return_date {
                Some(date) => html! { { format_date(date) } },
                None => html! { { "Not returned" } },
            },
            "status" => transaction_status_badge(self),
            _ => html! {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_renders_rfc3339() {
        assert_eq!(format_date("2025-06-15T00:00:00Z"), "Jun 15, 2025");
        assert_eq!(format_date("2025-06-05"), "Jun 5, 2025");
    }

    #[test]
    fn test_format_date_passes_garbage_through() {
        assert_eq!(format_date("soon"), "soon");
    }
}

pub mod book_details;
pub mod books;
pub mod dashboard;
pub mod login;
pub mod member_details;
pub mod members;
pub mod not_found;
pub mod transactions;

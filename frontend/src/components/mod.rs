pub mod alert;
pub mod book_form_modal;
pub mod data_table;
pub mod member_form_modal;
pub mod modal;
pub mod records;
pub mod sidebar;
pub mod stats_card;
pub mod transaction_form_modal;

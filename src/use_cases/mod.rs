pub mod dto;
pub mod get_payment_summary;
pub mod process_payment;
pub mod record_payment;
pub mod select_processor;

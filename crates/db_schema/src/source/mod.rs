pub mod booking;
pub mod booking_event;
pub mod cleaner_account;
pub mod commission;
pub mod fraud_flag;
pub mod review;
pub mod wallet;

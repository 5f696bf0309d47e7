pub mod account;
pub mod job;
pub mod notification;

pub mod appointment;
pub mod case;
pub mod message;
pub mod notification;
pub mod payment;
pub mod summary;
pub mod user;

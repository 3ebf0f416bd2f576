mod helpers;

mod appointment_test;
mod notification_test;
mod payment_test;

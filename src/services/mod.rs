pub mod contact;
pub mod notification;
pub mod smtp_mailer;

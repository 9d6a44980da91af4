pub mod chat;
pub mod donation;
pub mod health;
pub mod partner;
pub mod partnership;

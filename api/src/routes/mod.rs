pub mod chat;
pub mod health;
pub mod index;
pub mod models;

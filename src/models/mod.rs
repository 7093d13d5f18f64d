pub mod application;
pub mod notification;
pub mod score;
pub mod snapshot;

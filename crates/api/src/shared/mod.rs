pub mod auth;
pub mod guard;
pub mod retry;
pub mod usecase;

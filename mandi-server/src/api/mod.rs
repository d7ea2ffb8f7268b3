//! API Modules
//!
//! One module per route group, each exposing a `router()`.

pub mod company;
pub mod health;
pub mod purchase;
pub mod sell;
pub mod users;

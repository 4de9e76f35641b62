//! Feature modules. Each has a `controller.rs` with the handlers and a
//! `router.rs` building its `Router<AppState>`; access control is applied
//! where the routers are nested, in [`crate::router`].

pub mod admin;
pub mod auth;

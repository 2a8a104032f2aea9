//! Data models for the Zammad API.
//!
//! This module contains type definitions for tickets, articles, users and
//! ticket states, plus the request bodies used to update tickets and create
//! articles.

mod article;
mod common;
mod ticket;
mod ticket_state;
mod user;

pub use article::*;
pub use common::*;
pub use ticket::*;
pub use ticket_state::*;
pub use user::*;

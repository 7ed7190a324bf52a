//! Helper functions shared by templates and content loading

pub mod date;

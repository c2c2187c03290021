//! HTTP request handlers

pub mod admin;
pub mod catalog;
pub mod compare;
pub mod search;
pub mod suggest;

#![allow(clippy::new_without_default)]

pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod fetch;
pub mod item;
pub mod library;
pub mod loader;
pub mod nav;
pub mod promise;
pub mod render;
pub mod router;
pub mod search;
pub mod state;
pub mod storage;
pub mod taxonomy;
pub mod util;

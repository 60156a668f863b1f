pub mod api_utils;
pub mod components;
pub mod config;
pub mod crud;
pub mod dialog;
pub mod download;
pub mod http;
pub mod icons;
pub mod list_controller;
pub mod list_state;
pub mod page_frame;
pub mod query_client;
pub mod toast;

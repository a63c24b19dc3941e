pub mod api;
pub mod config;
pub mod db;
pub mod files;
pub mod models;
pub mod triage;

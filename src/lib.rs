pub mod auth;
pub mod config;
pub mod db;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
pub mod utils;

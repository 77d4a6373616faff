pub mod app;
pub mod auth;
pub mod bidding;
pub mod cart;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod media;
pub mod order;
pub mod product;
pub mod query;
pub mod revalidate;
pub mod users;
pub mod validation;

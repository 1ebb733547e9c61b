//! Chess board controller over a pluggable rules engine, with a terminal
//! board and a small HTTP service that logs the moves it is sent.

pub mod config;
pub mod game;
pub mod models;
pub mod notify;
pub mod routes;
pub mod terminal;

//! agrichat - terminal client for the Agricultural Disease Expert chat backend.
//!
//! Architecture:
//! - The backend owns sessions and messages; this client only mirrors ids and previews
//! - `ChatController` turns user actions into backend round trips and surface updates
//! - A surface is the page being drawn: message list, session sidebar, input field
//! - The CLI draws that page on the terminal and keeps the current session between runs

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod models;
pub mod session;
pub mod view;

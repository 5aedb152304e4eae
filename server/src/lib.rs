//! Multi-room No-Limit Texas Hold'em server with LLM-driven seats.
//!
//! The engine lives in [`game`] and [`poker`]; [`rooms`] coordinates seats,
//! dealer rotation and the auto-play loop for automated players; [`ai`]
//! talks to the chat-completion endpoint; [`server`] is the HTTP surface.

pub mod ai;
pub mod auth;
pub mod cli;
pub mod config;
pub mod game;
pub mod poker;
pub mod pretty;
pub mod rooms;
pub mod server;

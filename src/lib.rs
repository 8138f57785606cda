//! Wash Bay Status API
//!
//! Reports real-time occupancy of a fixed set of wash bays by aggregating
//! the newest sensor reading per bay from a time-series table.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │               WASHBAY STATUS API              │
//!                   │                                               │
//!   Client Request  │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ────────────────┼─▶│  http    │──▶│ pipeline │──▶│ handlers │  │
//!                   │  │  server  │   │ id/cors/ │   │          │  │
//!                   │  └──────────┘   │ratelimit │   └────┬─────┘  │
//!                   │                 └──────────┘        │        │
//!                   │                                     ▼        │
//!                   │                              ┌────────────┐  │
//!                   │                              │   status   │  │
//!                   │                              │ bays+codec │  │
//!                   │                              └─────┬──────┘  │
//!                   │                                    │         │
//!                   │  ┌────────────────────────────┐    ▼        │
//!                   │  │   Cross-Cutting Concerns    │ ┌────────┐  │
//!                   │  │ config · lifecycle · logs   │ │   db   │──┼──▶ PostgreSQL
//!                   │  └────────────────────────────┘ └────────┘  │
//!                   └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod db;
pub mod http;
pub mod status;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;

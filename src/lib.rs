//! # Showcase
//!
//! Backend for a marketing site that presents AI case studies and AI
//! capability listings stored in a headless CMS.
//!
//! The HTTP server proxies CMS reads for the browser (keeping the API key
//! server-side) and serves catalog views built with [`showcase_core`]:
//! capabilities sorted into purpose groups, free-text search over those
//! groups, and category pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌────────────────┐
//! │  CMS API  │──▶│ ContentSource│──▶│ ContentService │
//! │ (microCMS)│   │ cms/mock/... │   │ typed records  │
//! └───────────┘   └──────┬───────┘   └───────┬────────┘
//!                        │ proxy             │ catalog
//!                        ▼                   ▼
//!                  ┌──────────┐        ┌──────────┐
//!                  │   HTTP   │        │   CLI    │
//!                  │  server  │        │(showcase)│
//!                  └──────────┘        └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with environment overrides |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`cms`] | HTTP client for the CMS content API |
//! | [`source`] | Content sources: CMS, dummy, mock, fallback |
//! | [`content`] | Typed reads with field projections |
//! | [`catalog`] | Capabilities grouped, searched, and paged by category |
//! | [`server`] | Proxy and catalog HTTP endpoints |
//! | [`commands`] | CLI command implementations |

pub mod catalog;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod logging;
pub mod server;
pub mod source;

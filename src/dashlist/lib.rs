//! # Dashlist Architecture
//!
//! Dashlist is a **collection view engine** for an admin dashboard: it takes
//! a whole collection (users, content items, blogs, employees) fetched once
//! from a document store and turns it into the page the user is looking at,
//! after filters, free-text search and sorting.
//!
//! Like any library with a CLI client, the engine knows nothing about
//! terminals.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, loads config                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list / view / create / update / delete / upload / ...    │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                             │
//!                  ▼                             ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  View Engine                  │ │  Storage Layer (store/)   │
//! │  filter/ search pager sort    │ │  DataStore trait          │
//! │  view (state + derive)        │ │  FileStore, InMemoryStore │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## The View Engine
//!
//! The engine is a set of pure functions plus one state holder:
//!
//! - [`filter`]: one record against one criterion (`role=admin`, `lastLogin@30d`)
//! - [`search`]: one record against a free-text query over declared fields
//! - [`pager`]: page slicing and page metadata
//! - [`sort`]: stable ordering, absent values last
//! - [`view`]: [`view::derive`] composes the above; [`view::ViewController`]
//!   owns per-view state and the record cache
//!
//! None of it does I/O, reads the clock during derivation, or panics on odd
//! record shapes. The only errors it raises are [`error::ValidationError`]s
//! for bad page sizes, page indexes, criteria, windows and sort keys.
//!
//! ## Logging
//!
//! Library code emits [`tracing`] events and never installs a subscriber;
//! the binary does that.
//!
//! ## Testing Strategy
//!
//! 1. **Engine and commands**: unit tests next to the code, over
//!    `InMemoryStore` fixtures.
//! 2. **Laws**: `proptest` properties in `tests/` (paging partitions the
//!    result, derivation is repeatable, a blank query is inert).
//! 3. **CLI**: `assert_cmd` tests in `tests/` against a temporary data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Record`, `EntityKind`, timestamp coercion
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod pager;
pub mod search;
pub mod sort;
pub mod store;
pub mod view;

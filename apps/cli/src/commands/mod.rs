//! # Commands Module
//!
//! Everything the menu can do, as plain functions over the handles in
//! [`AppState`](crate::state::AppState).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── order.rs    ◄─── set_name, add_item, list_items
//! ├── calc.rs     ◄─── calculate (via worker), show_result
//! └── storage.rs  ◄─── save, load (JSON)
//! ```
//!
//! Each function takes only the handles it needs, so it can be tested
//! without a terminal or a running worker.

pub mod calc;
pub mod order;
pub mod storage;

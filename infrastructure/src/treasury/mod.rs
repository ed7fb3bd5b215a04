//! Treasury API adapters
//!
//! | Adapter | Port | Used when |
//! |---------|------|-----------|
//! | [`HttpContextProvider`] | `ContextProvider` | `[treasury] base_url` set |
//! | [`StaticContextProvider`] | `ContextProvider` | no treasury API configured |
//! | [`HttpExecutionDispatcher`] | `ExecutionDispatcher` | `base_url` set and not dry-run |
//! | [`DryRunDispatcher`] | `ExecutionDispatcher` | dry-run or no treasury API |
//!
//! Endpoints of the treasury API, relative to its base URL:
//!
//! ```text
//! GET  /balance         {"sol_balance": 1.25}
//! GET  /token           {"mint": "...", "symbol": "...", "name": "..."} | null | 404
//! GET  /market/{mint}   {"price_usd": ..., "market_cap_usd": ..., ...}
//! POST /execute         {"action": "buyback", "sol_amount": 0.1}
//!                       -> {"success": true, "signature": "...", "error": null}
//! ```

mod client;
mod context;
mod dispatcher;

pub use client::{TreasuryClient, TreasuryHttpError};
pub use context::{HttpContextProvider, StaticContextProvider};
pub use dispatcher::{DryRunDispatcher, HttpExecutionDispatcher};

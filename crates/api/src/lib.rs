//! HTTP surface of the stock ledger, consumed by the admin console.

pub mod app;

//! Asset record lifecycle over an external world-state store.
//!
//! [`AssetContract`] exposes create/read/update/delete/exists over single
//! [`Asset`](assetledger_types::Asset) records, plus the comparison and
//! wallet refund operations in [`compare`].

pub mod compare;
pub mod contract;

pub use compare::*;
pub use contract::*;

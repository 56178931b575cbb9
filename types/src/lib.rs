//! Common types used throughout hustle.
//!
//! The turn ledger is served over GraphQL and persisted in a relational
//! store; everything that must agree across those boundaries lives here. The
//! centerpiece is [`Amount`], an arbitrary-precision token amount with one
//! canonical base-10 string form shared by all three encodings.

pub mod amount;
pub mod turn;

pub use amount::{Amount, AmountError};
pub use turn::{total_amount_traded, Turn};

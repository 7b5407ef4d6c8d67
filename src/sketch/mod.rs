//! Token store: the arena shared by every pipeline stage.
//!
//! - [`Token`] is a straight segment with contrast, coverage and age, plus
//!   per-endpoint adjacency filled in by [`crate::link::po_link`].
//! - [`TokenStore`] owns the tokens of one canvas and an optional
//!   [`crate::bixel::BixelGrid`] over them.
//! - [`po_merge`] and [`union`] combine stores produced by several rounds.
//!
//! Token identity survives copying between stores through [`TokenId`], which
//! is what merge and union deduplicate on.

mod merge;
mod store;
mod token;

pub use merge::{po_merge, union};
pub use store::TokenStore;
pub use token::{Endpoint, Token, TokenId};

pub(crate) use token::{dist_sq, point_line_dist_sq};

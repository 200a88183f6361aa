//! Static lunisolar table data, one module per shard.
//!
//! Generated asset; do not edit by hand.

pub(crate) mod shard_1900;
pub(crate) mod shard_1976;
pub(crate) mod shard_2051;
pub(crate) mod shard_2126;

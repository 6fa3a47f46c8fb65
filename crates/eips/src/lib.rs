//! EIP types consumed by the transaction envelopes: the [EIP-2718] typed
//! envelope traits, [EIP-2930] access lists and [EIP-7702] authorizations.
//!
//! [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
//! [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930
//! [EIP-7702]: https://eips.ethereum.org/EIPS/eip-7702

pub mod eip2718;

pub mod eip2930;

pub mod eip7702;

#[cfg(feature = "ssz")]
mod ssz;

//! Serialization and deserialization of Ethereum data across three binary
//! encodings, and the typed transaction envelopes built on top of them.
//!
//! - [`abi`]: the Solidity ABI 32-byte slot codec, driven by runtime
//!   parameter descriptors, with log-topic handling.
//! - [`rlp`]: recursive length prefix encoding, the Yellow Paper wire
//!   format of transactions and most execution-layer structures.
//! - [`ssz`]: the consensus-layer simple serialize encoding.
//! - [`consensus`] / [`tx`]: Legacy through EIP-7702 transaction
//!   envelopes, their signing preimages, and the type-byte dispatcher.
//! - [`eips`]: access lists, authorizations and the EIP-2718 traits the
//!   envelopes are built from.

#[doc(inline)]
pub use ethcodec_abi as abi;

#[doc(inline)]
pub use ethcodec_consensus as consensus;

#[doc(inline)]
pub use ethcodec_eips as eips;

#[doc(inline)]
pub use ethcodec_rlp as rlp;

#[doc(inline)]
pub use ethcodec_ssz as ssz;

/// Transaction parsing and serialization.
pub mod tx {
    #[doc(inline)]
    pub use ethcodec_consensus::{
        parse, parse_hex, parse_signed, parse_signed_hex, serialize, Signed, Transaction,
        TxEip1559, TxEip2930, TxEip4844, TxEip7702, TxEnvelope, TxError, TxLegacy, TxType,
        TypedTransaction,
    };
}

//! Typed Ethereum transactions across the Legacy, Berlin (EIP-2930),
//! London (EIP-1559), Cancun (EIP-4844) and EIP-7702 envelope formats,
//! with their RLP wire codecs, signing preimages and the type-byte
//! dispatcher of EIP-2718.

mod error;
pub use error::TxError;

mod signed;
pub use signed::Signed;

pub mod transaction;
pub use transaction::{
    from_eip155_value, to_eip155_value, SignableTransaction, Transaction, TxEip1559, TxEip2930,
    TxEip4844, TxEip7702, TxEnvelope, TxLegacy, TxType, TypedTransaction, DEPOSIT_TX_TYPE_ID,
};

pub mod parse;
pub use parse::{parse, parse_hex, parse_signed, parse_signed_hex, serialize};

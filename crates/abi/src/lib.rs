//! Solidity ABI encoding and decoding over runtime parameter descriptors.
//!
//! The codec is driven by a [`ParamKind`] descriptor tree and moves values
//! as [`AbiValue`]s, the 32-byte-slot head/tail layout of the Solidity ABI
//! specification: static values inline in the head, dynamic values behind
//! big-endian offsets with their payloads concatenated in the tail.
//!
//! Decoding is bounded: [`DecodeOptions::max_bytes`] caps the total bytes
//! visited across every head and tail read, which keeps crafted
//! offset-chain inputs from turning a small calldata blob into unbounded
//! work. Trailing bytes after a complete decode are rejected unless
//! [`DecodeOptions::allow_junk_data`] is set.

mod error;
pub use error::{AbiError, Result};

pub mod utils;
pub use utils::Endian;

mod param;
pub use param::{find_param, Param, ParamKind};

mod value;
pub use value::AbiValue;

pub mod item;
pub use item::{Constructor, Error as ErrorItem, Event, EventParam, Function};

mod encoder;
pub use encoder::{encode, encode_constructor, encode_error, encode_function};

mod decoder;
pub use decoder::{
    decode, decode_constructor, decode_error, decode_function, decode_function_outputs,
    AllocateWhen, DecodeOptions, Decoded,
};

mod logs;
pub use logs::{decode_topics, encode_topics, DecodedTopics};

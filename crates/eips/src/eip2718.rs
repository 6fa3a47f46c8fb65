//! [EIP-2718] traits.
//!
//! [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718

use ethcodec_rlp::BufMut;

// https://eips.ethereum.org/EIPS/eip-2718#transactiontype-only-goes-up-to-0x7f
const TX_TYPE_BYTE_MAX: u8 = 0x7f;

/// The decoding half of an [EIP-2718] envelope: dispatch on the leading
/// type byte, with the untyped legacy form as the fallback.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
pub trait Decodable2718: Sized {
    /// The error produced by envelope decoding.
    type Err;

    /// Peeks at the envelope's type byte without consuming it. Values
    /// above 0x7f open the RLP payload of an untyped legacy item and
    /// yield `None`.
    fn extract_type_byte(buf: &[u8]) -> Option<u8> {
        match buf.first() {
            Some(&byte) if byte <= TX_TYPE_BYTE_MAX => Some(byte),
            _ => None,
        }
    }

    /// Decodes the variant selected by `ty` from the bytes after the type
    /// byte. Called by [`Self::decode_2718`].
    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Result<Self, Self::Err>;

    /// Decodes the untyped legacy variant. Called by
    /// [`Self::decode_2718`] when the buffer starts with no type byte.
    fn fallback_decode(buf: &mut &[u8]) -> Result<Self, Self::Err>;

    /// Decodes an envelope, dispatching on the type byte when one is
    /// present.
    fn decode_2718(buf: &mut &[u8]) -> Result<Self, Self::Err> {
        match Self::extract_type_byte(buf) {
            Some(ty) => {
                *buf = &buf[1..];
                Self::typed_decode(ty, buf)
            }
            None => Self::fallback_decode(buf),
        }
    }
}

/// The encoding half of an [EIP-2718] envelope: the type byte, when the
/// variant carries one, followed by the variant's payload.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
pub trait Encodable2718: Sized {
    /// The envelope's type byte, `None` for the untyped legacy variant.
    fn type_flag(&self) -> Option<u8>;

    /// True for the untyped legacy variant.
    fn is_legacy(&self) -> bool {
        matches!(self.type_flag(), None | Some(0))
    }

    /// The serialized length: the type byte, when present, plus the inner
    /// payload.
    fn encode_2718_len(&self) -> usize;

    /// Writes the envelope: the type byte when present, then the
    /// variant's payload.
    fn encode_2718(&self, out: &mut dyn BufMut);

    /// Writes the envelope into a fresh vec.
    fn encoded_2718(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut out);
        out
    }
}

//! [EIP-7702] authorization types.
//!
//! [EIP-7702]: https://eips.ethereum.org/EIPS/eip-7702

use alloy_primitives::{keccak256, Address, ChainId, B256, U256};
use ethcodec_rlp::{BufMut, Decodable, Encodable, Header, Result as RlpResult};

/// The magic byte prepended to the authorization signing payload,
/// `keccak(MAGIC || rlp([chain_id, address, nonce]))`.
pub const MAGIC: u8 = 0x05;

/// An unsigned EIP-7702 authorization: permission for `address` code to be
/// executed in the authority's context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Authorization {
    /// The chain the authorization is valid on, or zero for any chain.
    pub chain_id: ChainId,
    /// The address of the code to delegate to.
    pub address: Address,
    /// The nonce of the authority account at signing time.
    pub nonce: u64,
}

impl Authorization {
    /// Computes the hash an external signer must sign to authorize this
    /// delegation.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::new();
        buf.put_u8(MAGIC);
        let payload_length =
            self.chain_id.length() + self.address.length() + self.nonce.length();
        Header { list: true, payload_length }.encode(&mut buf);
        self.chain_id.encode(&mut buf);
        self.address.encode(&mut buf);
        self.nonce.encode(&mut buf);
        keccak256(buf)
    }

    /// Attaches a signature, producing a [`SignedAuthorization`].
    pub const fn into_signed(self, y_parity: u8, r: U256, s: U256) -> SignedAuthorization {
        SignedAuthorization { inner: self, y_parity, r, s }
    }
}

/// A signed EIP-7702 authorization, carried on the wire as the flat list
/// `[chain_id, address, nonce, y_parity, r, s]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SignedAuthorization {
    /// The unsigned authorization.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub inner: Authorization,
    /// The signature parity bit.
    pub y_parity: u8,
    /// The signature r value.
    pub r: U256,
    /// The signature s value.
    pub s: U256,
}

impl SignedAuthorization {
    /// Returns the unsigned part of the authorization.
    pub const fn strip_signature(&self) -> &Authorization {
        &self.inner
    }

    fn fields_len(&self) -> usize {
        self.inner.chain_id.length()
            + self.inner.address.length()
            + self.inner.nonce.length()
            + self.y_parity.length()
            + self.r.length()
            + self.s.length()
    }
}

impl Encodable for SignedAuthorization {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.inner.chain_id.encode(out);
        self.inner.address.encode(out);
        self.inner.nonce.encode(out);
        self.y_parity.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for SignedAuthorization {
    fn decode(buf: &mut &[u8]) -> RlpResult<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        Ok(Self {
            inner: Authorization {
                chain_id: Decodable::decode(&mut payload)?,
                address: Decodable::decode(&mut payload)?,
                nonce: Decodable::decode(&mut payload)?,
            },
            y_parity: Decodable::decode(&mut payload)?,
            r: Decodable::decode(&mut payload)?,
            s: Decodable::decode(&mut payload)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ethcodec_rlp::{decode_exact, encode};

    fn sample() -> SignedAuthorization {
        Authorization {
            chain_id: 1,
            address: address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"),
            nonce: 7,
        }
        .into_signed(1, U256::from(0x1234), U256::from(0x5678))
    }

    #[test]
    fn signed_authorization_round_trip() {
        let auth = sample();
        let decoded: SignedAuthorization = decode_exact(encode(&auth)).unwrap();
        assert_eq!(decoded, auth);
    }

    #[test]
    fn signature_hash_is_domain_separated() {
        let auth = sample().inner;
        let hash = auth.signature_hash();
        // Same fields, different chain id, different preimage.
        let other = Authorization { chain_id: 2, ..auth };
        assert_ne!(hash, other.signature_hash());
    }
}

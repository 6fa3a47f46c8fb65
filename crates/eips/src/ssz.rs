//! SSZ impls for the EIP types.

use crate::{
    eip2930::{AccessList, AccessListItem},
    eip7702::{Authorization, SignedAuthorization},
};
use alloy_primitives::{Address, B256, U256};
use ethcodec_ssz::{
    Decode, DecoderBuilder, Encode, Encoder, Result as SszResult, BYTES_PER_LENGTH_OFFSET,
};

impl Encode for AccessListItem {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        <Address as Encode>::fixed_len()
            + BYTES_PER_LENGTH_OFFSET
            + self.storage_keys.len() * <B256 as Encode>::fixed_len()
    }

    fn append(&self, buf: &mut Vec<u8>) {
        let fixed = <Address as Encode>::fixed_len() + BYTES_PER_LENGTH_OFFSET;
        let mut encoder = Encoder::container(buf, fixed);
        encoder.append(&self.address);
        encoder.append(&self.storage_keys);
        encoder.finalize();
    }
}

impl Decode for AccessListItem {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> SszResult<Self> {
        let mut builder = DecoderBuilder::new(bytes);
        builder.register_type::<Address>()?;
        builder.register_type::<Vec<B256>>()?;
        let mut decoder = builder.build()?;
        Ok(Self { address: decoder.decode_next()?, storage_keys: decoder.decode_next()? })
    }
}

impl Encode for AccessList {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        self.0.byte_len()
    }

    fn append(&self, buf: &mut Vec<u8>) {
        self.0.append(buf)
    }
}

impl Decode for AccessList {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> SszResult<Self> {
        Vec::from_bytes(bytes).map(Self)
    }
}

impl Encode for SignedAuthorization {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        <u64 as Encode>::fixed_len()
            + <Address as Encode>::fixed_len()
            + <u64 as Encode>::fixed_len()
            + <u8 as Encode>::fixed_len()
            + <U256 as Encode>::fixed_len()
            + <U256 as Encode>::fixed_len()
    }

    fn byte_len(&self) -> usize {
        <Self as Encode>::fixed_len()
    }

    fn append(&self, buf: &mut Vec<u8>) {
        self.inner.chain_id.append(buf);
        self.inner.address.append(buf);
        self.inner.nonce.append(buf);
        self.y_parity.append(buf);
        self.r.append(buf);
        self.s.append(buf);
    }
}

impl Decode for SignedAuthorization {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        <Self as Encode>::fixed_len()
    }

    fn from_bytes(bytes: &[u8]) -> SszResult<Self> {
        let mut builder = DecoderBuilder::new(bytes);
        builder.register_type::<u64>()?;
        builder.register_type::<Address>()?;
        builder.register_type::<u64>()?;
        builder.register_type::<u8>()?;
        builder.register_type::<U256>()?;
        builder.register_type::<U256>()?;
        let mut decoder = builder.build()?;
        Ok(Self {
            inner: Authorization {
                chain_id: decoder.decode_next()?,
                address: decoder.decode_next()?,
                nonce: decoder.decode_next()?,
            },
            y_parity: decoder.decode_next()?,
            r: decoder.decode_next()?,
            s: decoder.decode_next()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ethcodec_ssz::{decode, encode};

    #[test]
    fn access_list_round_trips() {
        let list = AccessList(vec![
            AccessListItem {
                address: address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"),
                storage_keys: vec![B256::with_last_byte(1), B256::with_last_byte(2)],
            },
            AccessListItem { address: Address::ZERO, storage_keys: vec![] },
        ]);
        let decoded: AccessList = decode(&encode(&list)).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn signed_authorization_is_fixed_size() {
        let auth = Authorization {
            chain_id: 1,
            address: address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"),
            nonce: 9,
        }
        .into_signed(0, U256::from(1), U256::from(2));
        let bytes = encode(&auth);
        assert_eq!(bytes.len(), <SignedAuthorization as Encode>::fixed_len());
        let decoded: SignedAuthorization = decode(&bytes).unwrap();
        assert_eq!(decoded, auth);
    }
}

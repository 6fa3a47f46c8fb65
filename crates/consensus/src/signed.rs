use crate::transaction::SignableTransaction;
use alloy_primitives::{Signature, B256};

/// A transaction sealed with its signature and the keccak hash of its
/// signed encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signed<T, Sig = Signature> {
    #[cfg_attr(feature = "serde", serde(flatten))]
    tx: T,
    #[cfg_attr(feature = "serde", serde(flatten))]
    signature: Sig,
    hash: B256,
}

impl<T, Sig> Signed<T, Sig> {
    /// The sealed transaction.
    pub const fn tx(&self) -> &T {
        &self.tx
    }

    /// The signature it was sealed with.
    pub const fn signature(&self) -> &Sig {
        &self.signature
    }

    /// The transaction hash.
    pub const fn hash(&self) -> &B256 {
        &self.hash
    }

    /// Takes the seal apart.
    pub fn into_parts(self) -> (T, Sig, B256) {
        (self.tx, self.signature, self.hash)
    }

    /// Discards the signature and hash, keeping the transaction.
    pub fn strip_signature(self) -> T {
        self.tx
    }
}

impl<T: SignableTransaction<Sig>, Sig> Signed<T, Sig> {
    /// Seals the parts as given. The signature is trusted, not checked
    /// against the transaction.
    pub const fn new_unchecked(tx: T, signature: Sig, hash: B256) -> Self {
        Self { tx, signature, hash }
    }

    /// The hash the signature was (or should have been) produced over.
    pub fn signature_hash(&self) -> B256 {
        self.tx.signature_hash()
    }
}

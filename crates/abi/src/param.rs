use crate::{AbiError, Result};

/// A runtime ABI type descriptor.
///
/// The recursive tree that drives both directions of the codec. Tuples
/// carry their components as [`Param`]s so field names survive for
/// diagnostics and typed lookup; names play no part in the encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// `bool`.
    Bool,
    /// `address`.
    Address,
    /// `uint<bits>`, with bits a positive multiple of 8 up to 256.
    Uint(usize),
    /// `int<bits>`, same domain as [`Self::Uint`].
    Int(usize),
    /// `bytes<size>`, with size in 1..=32.
    FixedBytes(usize),
    /// Dynamic `bytes`.
    Bytes,
    /// Dynamic `string`.
    String,
    /// `T[size]`.
    FixedArray(Box<ParamKind>, usize),
    /// `T[]`.
    Array(Box<ParamKind>),
    /// `(T1,...,Tn)`.
    Tuple(Vec<Param>),
}

/// A named ABI parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// The parameter name; empty when unnamed. Ignored by the codec.
    pub name: String,
    /// The parameter type.
    pub kind: ParamKind,
}

impl Param {
    /// A named parameter.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// An unnamed parameter.
    pub const fn unnamed(kind: ParamKind) -> Self {
        Self { name: String::new(), kind }
    }
}

impl From<ParamKind> for Param {
    fn from(kind: ParamKind) -> Self {
        Self::unnamed(kind)
    }
}

impl ParamKind {
    /// True if the encoded length of the type is not fixed by the type
    /// alone: `bytes`, `string`, `T[]`, and any compound with a dynamic
    /// child.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(child, _) => child.is_dynamic(),
            Self::Tuple(fields) => fields.iter().any(|field| field.kind.is_dynamic()),
            _ => false,
        }
    }

    /// The number of head bytes the type occupies in a sequence: 32 for
    /// every dynamic type (the offset word), the full inline footprint for
    /// static types.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            Self::FixedArray(child, size) => size * child.head_size(),
            Self::Tuple(fields) => fields.iter().map(|field| field.kind.head_size()).sum(),
            _ => 32,
        }
    }

    /// Checks the structural invariants of the descriptor tree.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Uint(bits) | Self::Int(bits) => {
                if *bits == 0 || *bits % 8 != 0 || *bits > 256 {
                    return Err(AbiError::InvalidBits(*bits));
                }
            }
            Self::FixedBytes(size) => {
                if *size == 0 || *size > 32 {
                    return Err(AbiError::InvalidArraySize(*size));
                }
            }
            Self::FixedArray(child, _) | Self::Array(child) => child.validate()?,
            Self::Tuple(fields) => {
                for field in fields {
                    field.kind.validate()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// The canonical Solidity name of the type, as hashed into selectors
    /// and topics: `uint256`, `(address,bytes32[])`, ...
    pub fn sol_name(&self) -> String {
        match self {
            Self::Bool => "bool".into(),
            Self::Address => "address".into(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::FixedBytes(size) => format!("bytes{size}"),
            Self::Bytes => "bytes".into(),
            Self::String => "string".into(),
            Self::FixedArray(child, size) => format!("{}[{size}]", child.sol_name()),
            Self::Array(child) => format!("{}[]", child.sol_name()),
            Self::Tuple(fields) => {
                let inner =
                    fields.iter().map(|field| field.kind.sol_name()).collect::<Vec<_>>();
                format!("({})", inner.join(","))
            }
        }
    }

    /// Looks up a tuple component by field name.
    pub fn component(&self, name: &str) -> Result<&Param> {
        if let Self::Tuple(fields) = self {
            if let Some(field) = fields.iter().find(|field| field.name == name) {
                return Ok(field);
            }
        }
        Err(AbiError::UnknownField(name.into()))
    }
}

/// Finds a parameter by name in a descriptor sequence, returning its
/// position and descriptor.
pub fn find_param<'p>(params: &'p [Param], name: &str) -> Result<(usize, &'p Param)> {
    params
        .iter()
        .enumerate()
        .find(|(_, param)| param.name == name)
        .ok_or_else(|| AbiError::UnknownField(name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn dynamic_predicate() {
        assert!(!ParamKind::Bool.is_dynamic());
        assert!(!ParamKind::Uint(256).is_dynamic());
        assert!(ParamKind::Bytes.is_dynamic());
        assert!(ParamKind::String.is_dynamic());
        assert!(ParamKind::Array(Box::new(ParamKind::Bool)).is_dynamic());
        // A fixed array is only as static as its child.
        assert!(!ParamKind::FixedArray(Box::new(ParamKind::Address), 3).is_dynamic());
        assert!(ParamKind::FixedArray(Box::new(ParamKind::String), 3).is_dynamic());
        // A tuple is dynamic if any component is.
        let static_tuple = ParamKind::Tuple(vec![
            ParamKind::Bool.into(),
            ParamKind::Uint(8).into(),
        ]);
        assert!(!static_tuple.is_dynamic());
        let dynamic_tuple = ParamKind::Tuple(vec![
            ParamKind::Bool.into(),
            ParamKind::Bytes.into(),
        ]);
        assert!(dynamic_tuple.is_dynamic());
    }

    #[test]
    fn head_sizes() {
        assert_eq!(ParamKind::Uint(64).head_size(), 32);
        assert_eq!(ParamKind::FixedArray(Box::new(ParamKind::Address), 3).head_size(), 96);
        assert_eq!(ParamKind::String.head_size(), 32);
        let tuple = ParamKind::Tuple(vec![
            ParamKind::Bool.into(),
            ParamKind::FixedArray(Box::new(ParamKind::Uint(256)), 2).into(),
        ]);
        assert_eq!(tuple.head_size(), 96);
    }

    #[test]
    fn validation() {
        assert!(ParamKind::Uint(256).validate().is_ok());
        assert_matches!(ParamKind::Uint(0).validate(), Err(AbiError::InvalidBits(0)));
        assert_matches!(ParamKind::Int(12).validate(), Err(AbiError::InvalidBits(12)));
        assert_matches!(ParamKind::Uint(264).validate(), Err(AbiError::InvalidBits(264)));
        assert_matches!(
            ParamKind::FixedBytes(33).validate(),
            Err(AbiError::InvalidArraySize(33))
        );
        let nested = ParamKind::Array(Box::new(ParamKind::FixedBytes(0)));
        assert_matches!(nested.validate(), Err(AbiError::InvalidArraySize(0)));
    }

    #[test]
    fn canonical_names() {
        assert_eq!(ParamKind::Uint(256).sol_name(), "uint256");
        assert_eq!(
            ParamKind::Array(Box::new(ParamKind::FixedBytes(32))).sol_name(),
            "bytes32[]"
        );
        let tuple = ParamKind::Tuple(vec![
            ParamKind::Address.into(),
            ParamKind::FixedArray(Box::new(ParamKind::Int(8)), 4).into(),
        ]);
        assert_eq!(tuple.sol_name(), "(address,int8[4])");
    }

    #[test]
    fn field_lookup() {
        let tuple = ParamKind::Tuple(vec![
            Param::new("owner", ParamKind::Address),
            Param::new("amount", ParamKind::Uint(256)),
        ]);
        assert_eq!(tuple.component("amount").unwrap().kind, ParamKind::Uint(256));
        assert_matches!(tuple.component("spender"), Err(AbiError::UnknownField(_)));

        let params =
            [Param::new("to", ParamKind::Address), Param::new("value", ParamKind::Uint(256))];
        assert_eq!(find_param(&params, "value").unwrap().0, 1);
        assert_matches!(find_param(&params, "data"), Err(AbiError::UnknownField(_)));
    }
}

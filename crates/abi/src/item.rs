//! Function, error, constructor and event descriptors, with their
//! canonical signatures and keccak selectors.

use crate::{Param, ParamKind};
use alloy_primitives::{keccak256, Selector, B256};

fn signature<'a>(name: &str, kinds: impl Iterator<Item = &'a ParamKind>) -> String {
    let types = kinds.map(ParamKind::sol_name).collect::<Vec<_>>();
    format!("{name}({})", types.join(","))
}

/// A function descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// The function name.
    pub name: String,
    /// The input parameters.
    pub inputs: Vec<Param>,
    /// The output parameters.
    pub outputs: Vec<Param>,
}

impl Function {
    /// The canonical signature, `name(type1,type2,...)` with no spaces.
    pub fn signature(&self) -> String {
        signature(&self.name, self.inputs.iter().map(|param| &param.kind))
    }

    /// The 4-byte selector: the first four bytes of the keccak-256 hash of
    /// the canonical signature.
    pub fn selector(&self) -> Selector {
        let hash = keccak256(self.signature().as_bytes());
        Selector::from_slice(&hash[..4])
    }
}

/// A custom error descriptor. Selector discipline is the same as for
/// functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    /// The error name.
    pub name: String,
    /// The error parameters.
    pub inputs: Vec<Param>,
}

impl Error {
    /// The canonical signature.
    pub fn signature(&self) -> String {
        signature(&self.name, self.inputs.iter().map(|param| &param.kind))
    }

    /// The 4-byte selector.
    pub fn selector(&self) -> Selector {
        let hash = keccak256(self.signature().as_bytes());
        Selector::from_slice(&hash[..4])
    }
}

/// A constructor descriptor. Constructors have no name and no selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    /// The constructor parameters.
    pub inputs: Vec<Param>,
}

/// An event parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventParam {
    /// The parameter name; empty when unnamed.
    pub name: String,
    /// The parameter type.
    pub kind: ParamKind,
    /// True if the parameter is indexed into a topic.
    pub indexed: bool,
}

/// An event descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// The event name.
    pub name: String,
    /// All event parameters, indexed or not, in declaration order.
    pub inputs: Vec<EventParam>,
}

impl Event {
    /// The canonical signature over all parameters, indexed or not.
    pub fn signature(&self) -> String {
        signature(&self.name, self.inputs.iter().map(|param| &param.kind))
    }

    /// Topic zero: the full keccak-256 hash of the canonical signature.
    pub fn selector(&self) -> B256 {
        keccak256(self.signature().as_bytes())
    }

    /// The indexed parameters, in declaration order.
    pub fn indexed(&self) -> impl Iterator<Item = &EventParam> {
        self.inputs.iter().filter(|param| param.indexed)
    }
}

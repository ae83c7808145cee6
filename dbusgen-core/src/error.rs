//! Error types for signature decoding.

use thiserror::Error;

/// Error raised when a wire type signature cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid signature {signature:?} at offset {offset}: {kind}")]
pub struct SignatureError {
    /// The full signature being decoded.
    pub signature: String,
    /// Byte offset of the fault within `signature`.
    pub offset: usize,
    /// What went wrong.
    pub kind: SignatureErrorKind,
}

impl SignatureError {
    /// Creates a signature error for the given input and offset.
    pub fn new(signature: impl Into<String>, offset: usize, kind: SignatureErrorKind) -> Self {
        Self {
            signature: signature.into(),
            offset,
            kind,
        }
    }
}

/// The kind of a [`SignatureError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureErrorKind {
    /// A single complete type was expected but the signature is empty.
    #[error("empty signature")]
    Empty,

    /// A byte that does not start any known type.
    #[error("unsupported signature character {0:?}")]
    UnsupportedCharacter(char),

    /// An `a` with nothing following it.
    #[error("array is missing its element type")]
    MissingArrayElement,

    /// A dictionary whose key is compound or a variant.
    #[error("dictionary key is not a primitive")]
    DictKeyNotPrimitive,

    /// A dictionary with a key but no value type.
    #[error("dictionary is missing its value type")]
    MissingDictValue,

    /// A dictionary that is not closed right after its value type.
    #[error("dictionary is not closed by '}}'")]
    UnclosedDict,

    /// A `(` without its matching `)`.
    #[error("unmatched '('")]
    UnclosedStructure,

    /// A `)` without an opening `(`.
    #[error("unmatched ')'")]
    UnexpectedStructureEnd,

    /// A structure with no fields, `()`.
    #[error("structure has no fields")]
    EmptyStructure,

    /// Bytes left over after a single complete type.
    #[error("trailing characters after a complete type")]
    TrailingCharacters,

    /// A signature longer than 255 bytes.
    #[error("signature is longer than 255 bytes")]
    SignatureTooLong,

    /// More than 32 nested arrays, or 64 containers in total.
    #[error("exceeded maximum array recursion")]
    ExceededMaximumArrayRecursion,

    /// More than 32 nested structures, or 64 containers in total.
    #[error("exceeded maximum struct recursion")]
    ExceededMaximumStructRecursion,

    /// A dictionary opened past the array nesting limit.
    #[error("exceeded maximum dict recursion")]
    ExceededMaximumDictRecursion,
}

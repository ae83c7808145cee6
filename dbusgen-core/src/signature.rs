//! Recursive-descent decoder for D-Bus wire type signatures.
//!
//! Single-letter codes decode to primitives, `v` to a variant, `a` to an
//! array or (when followed by `{`) a dictionary, and `(...)` to a structure
//! whose closing parenthesis is located with a depth counter.
//!
//! Signatures are limited to 255 bytes, and containers nest at most 32
//! arrays and 32 structures deep, 64 in total.

use crate::error::{SignatureError, SignatureErrorKind};
use crate::types::{Primitive, Type};

/// Longest accepted signature in bytes.
pub const MAX_SIGNATURE: usize = 255;

/// Deepest nesting of one container kind.
pub const MAX_CONTAINER_DEPTH: usize = 32;

/// Deepest nesting of arrays and structures combined.
pub const MAX_DEPTH: usize = 64;

/// Decodes a signature that must denote exactly one complete type.
///
/// # Arguments
/// * `signature` - Wire signature, e.g. `a{sv}`
///
/// # Errors
/// Returns `SignatureError` if the signature is empty, too long, nested too
/// deeply, malformed, or has bytes left over after the first complete type.
pub fn decode_one(signature: &str) -> Result<Type, SignatureError> {
    let decoder = Decoder::new(signature)?;
    if signature.is_empty() {
        return Err(decoder.error(0, SignatureErrorKind::Empty));
    }

    let (ty, next) = decoder.next(0, signature.len(), Depth::default())?;
    if next != signature.len() {
        return Err(decoder.error(next, SignatureErrorKind::TrailingCharacters));
    }
    Ok(ty)
}

/// Decodes a sequence of complete types laid back-to-back, as found in a
/// method's combined argument list. An empty signature yields no types.
///
/// # Errors
/// Returns `SignatureError` if the signature is too long or on the first
/// malformed type.
pub fn decode_all(signature: &str) -> Result<Vec<Type>, SignatureError> {
    Decoder::new(signature)?.sequence(0, signature.len(), Depth::default())
}

/// Open containers around the type being decoded.
#[derive(Debug, Clone, Copy, Default)]
struct Depth {
    arrays: usize,
    structs: usize,
}

impl Depth {
    fn is_full(self, count: usize) -> bool {
        count == MAX_CONTAINER_DEPTH || self.arrays + self.structs == MAX_DEPTH
    }

    fn open_array(self) -> Option<Self> {
        (!self.is_full(self.arrays)).then_some(Self {
            arrays: self.arrays + 1,
            ..self
        })
    }

    fn open_struct(self) -> Option<Self> {
        (!self.is_full(self.structs)).then_some(Self {
            structs: self.structs + 1,
            ..self
        })
    }
}

struct Decoder<'a> {
    signature: &'a str,
    bytes: &'a [u8],
}

impl<'a> Decoder<'a> {
    fn new(signature: &'a str) -> Result<Self, SignatureError> {
        if signature.len() > MAX_SIGNATURE {
            return Err(SignatureError::new(
                signature,
                MAX_SIGNATURE,
                SignatureErrorKind::SignatureTooLong,
            ));
        }
        Ok(Self {
            signature,
            bytes: signature.as_bytes(),
        })
    }

    fn error(&self, offset: usize, kind: SignatureErrorKind) -> SignatureError {
        SignatureError::new(self.signature, offset, kind)
    }

    /// Decodes complete types in `start..end` until the range is exhausted.
    fn sequence(
        &self,
        start: usize,
        end: usize,
        depth: Depth,
    ) -> Result<Vec<Type>, SignatureError> {
        let mut types = Vec::new();
        let mut at = start;
        while at < end {
            let (ty, next) = self.next(at, end, depth)?;
            types.push(ty);
            at = next;
        }
        Ok(types)
    }

    /// Decodes one complete type starting at `at` without reading past
    /// `end`, returning it with the offset right after it.
    fn next(
        &self,
        at: usize,
        end: usize,
        depth: Depth,
    ) -> Result<(Type, usize), SignatureError> {
        match self.bytes[at] {
            b'v' => Ok((Type::Variant, at + 1)),
            b'a' => {
                if at + 1 >= end {
                    return Err(self.error(at, SignatureErrorKind::MissingArrayElement));
                }
                let is_dict = self.bytes[at + 1] == b'{';
                let Some(inner) = depth.open_array() else {
                    let kind = if is_dict {
                        SignatureErrorKind::ExceededMaximumDictRecursion
                    } else {
                        SignatureErrorKind::ExceededMaximumArrayRecursion
                    };
                    return Err(self.error(at, kind));
                };
                if is_dict {
                    return self.dictionary(at, end, inner);
                }
                let (element, next) = self.next(at + 1, end, inner)?;
                Ok((Type::Array(Box::new(element)), next))
            }
            b'(' => {
                let inner = depth.open_struct().ok_or_else(|| {
                    self.error(at, SignatureErrorKind::ExceededMaximumStructRecursion)
                })?;
                let close = self.matching_paren(at, end)?;
                if close == at + 1 {
                    return Err(self.error(at, SignatureErrorKind::EmptyStructure));
                }
                let fields = self.sequence(at + 1, close, inner)?;
                Ok((Type::Structure(fields), close + 1))
            }
            b')' => Err(self.error(at, SignatureErrorKind::UnexpectedStructureEnd)),
            code => match Primitive::from_code(code) {
                Some(primitive) => Ok((Type::Primitive(primitive), at + 1)),
                None => Err(self.error(
                    at,
                    SignatureErrorKind::UnsupportedCharacter(self.char_at(at)),
                )),
            },
        }
    }

    /// Decodes `a{KV}` where `at` points at the `a`. `depth` already counts
    /// the dictionary.
    fn dictionary(
        &self,
        at: usize,
        end: usize,
        depth: Depth,
    ) -> Result<(Type, usize), SignatureError> {
        let key_at = at + 2;
        if key_at >= end {
            return Err(self.error(at, SignatureErrorKind::UnclosedDict));
        }

        let (key, value_at) = self.next(key_at, end, depth)?;
        let Some(key) = key.as_primitive() else {
            return Err(self.error(key_at, SignatureErrorKind::DictKeyNotPrimitive));
        };

        if value_at >= end || self.bytes[value_at] == b'}' {
            return Err(self.error(value_at, SignatureErrorKind::MissingDictValue));
        }

        let (value, close_at) = self.next(value_at, end, depth)?;
        if close_at >= end || self.bytes[close_at] != b'}' {
            return Err(self.error(at, SignatureErrorKind::UnclosedDict));
        }

        Ok((Type::Dictionary(key, Box::new(value)), close_at + 1))
    }

    /// Finds the `)` matching the `(` at `at`.
    fn matching_paren(&self, at: usize, end: usize) -> Result<usize, SignatureError> {
        let mut depth = 0usize;
        for (i, byte) in self.bytes[at..end].iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(at + i);
                    }
                }
                _ => {}
            }
        }
        Err(self.error(at, SignatureErrorKind::UnclosedStructure))
    }

    fn char_at(&self, at: usize) -> char {
        self.signature
            .get(at..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

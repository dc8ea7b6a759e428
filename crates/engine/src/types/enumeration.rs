//! Enumerated parameters over a declared set of named constants.

use std::marker::PhantomData;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// A closed set of named constants usable as an enumerated parameter value.
///
/// Implementors list every variant in declaration order and give each a
/// stable name; the engine looks values up by that name on the command line
/// and in config files.
pub trait NamedEnum: Copy + std::fmt::Debug + PartialEq + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Stable name used in raw text.
    fn name(&self) -> &'static str;

    /// Looks a variant up by name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|variant| variant.name() == name)
    }
}

fn variant_names<E: NamedEnum>() -> String {
    E::VARIANTS.iter().map(NamedEnum::name).collect::<Vec<_>>().join(", ")
}

/// Parameter whose value is a single [`NamedEnum`] constant.
#[derive(Debug, Clone, Copy)]
pub struct EnumParameter<E: NamedEnum> {
    _marker: PhantomData<E>,
}

impl<E: NamedEnum> EnumParameter<E> {
    /// Creates the enumerated type.
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<E: NamedEnum> Default for EnumParameter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NamedEnum> ParameterType for EnumParameter<E> {
    type Value = E;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        E::from_name(raw).ok_or_else(|| ParameterError::invalid(raw, format!("one of: {}", variant_names::<E>())))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.name().to_string()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Enum
    }
}

/// Parameter whose value is a comma-separated list of [`NamedEnum`]
/// constants from one declared set.
///
/// Values form a list: order is preserved, duplicates may occur, and the
/// empty string parses to an empty list.
#[derive(Debug, Clone, Copy)]
pub struct EnumListParameter<E: NamedEnum> {
    _marker: PhantomData<E>,
}

impl<E: NamedEnum> EnumListParameter<E> {
    /// Creates the enumerated-list type.
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<E: NamedEnum> Default for EnumListParameter<E> {
    fn default() -> Self {
        Self::new()
    }
}

const LIST_SEPARATOR: char = ',';

impl<E: NamedEnum> ParameterType for EnumListParameter<E> {
    type Value = Vec<E>;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        raw.split(LIST_SEPARATOR)
            .enumerate()
            .map(|(index, name)| {
                E::from_name(name).ok_or_else(|| {
                    ParameterError::invalid(
                        name,
                        format!("one of: {} (at index {index})", variant_names::<E>()),
                    )
                })
            })
            .collect()
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value
            .iter()
            .map(NamedEnum::name)
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string())
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::EnumList
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Compression {
        Gzip,
        Bzip2,
        NoOp,
    }

    impl NamedEnum for Compression {
        const VARIANTS: &'static [Self] = &[Compression::Gzip, Compression::Bzip2, Compression::NoOp];

        fn name(&self) -> &'static str {
            match self {
                Compression::Gzip => "gzip",
                Compression::Bzip2 => "bzip2",
                Compression::NoOp => "noop",
            }
        }
    }

    #[test]
    fn looks_constants_up_by_name() {
        let ty: EnumParameter<Compression> = EnumParameter::new();
        assert_eq!(ty.parse("gzip").unwrap(), Compression::Gzip);
        assert_eq!(ty.serialize(&Compression::Bzip2), "bzip2");
    }

    #[test]
    fn unknown_name_is_invalid() {
        let ty: EnumParameter<Compression> = EnumParameter::new();
        let error = ty.parse("zstd").unwrap_err();
        assert!(error.to_string().contains("gzip, bzip2, noop"));
    }

    #[test]
    fn list_preserves_order_and_duplicates() {
        let ty: EnumListParameter<Compression> = EnumListParameter::new();
        let parsed = ty.parse("bzip2,gzip,bzip2").unwrap();
        assert_eq!(parsed, vec![Compression::Bzip2, Compression::Gzip, Compression::Bzip2]);
        assert_eq!(ty.serialize(&parsed), "bzip2,gzip,bzip2");
    }

    #[test]
    fn empty_text_is_an_empty_list() {
        let ty: EnumListParameter<Compression> = EnumListParameter::new();
        assert_eq!(ty.parse("").unwrap(), Vec::<Compression>::new());
        assert_eq!(ty.serialize(&Vec::new()), "");
    }

    #[test]
    fn bad_list_entry_names_the_index() {
        let ty: EnumListParameter<Compression> = EnumListParameter::new();
        let error = ty.parse("gzip,zstd").unwrap_err();
        assert!(error.to_string().contains("index 1"), "unexpected message: {error}");
    }
}

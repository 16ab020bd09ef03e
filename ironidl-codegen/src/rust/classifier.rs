//! Type classification for the Rust backend.
//!
//! Maps a [`ParameterType`] to its textual Rust type on each surface. The
//! classifier only describes representations; the conversions between them
//! are emitted by [`conversions`](super::conversions).

use ironidl_schema::ParameterType;
use std::fmt;

/// Surface a type is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Return type of a method-table function pointer.
    PublicReturn,
    /// Parameter type of a method-table function pointer.
    PublicParameter,
    /// Return type of a wrapper method.
    MethodReturn,
    /// Parameter type of a wrapper method.
    MethodParameter,
}

impl Surface {
    /// All surfaces.
    pub const ALL: [Self; 4] = [
        Self::PublicReturn,
        Self::PublicParameter,
        Self::MethodReturn,
        Self::MethodParameter,
    ];

    /// Returns true for the two public (ABI) surfaces.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::PublicReturn | Self::PublicParameter)
    }
}

/// Rust type text for a descriptor on one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Rust type.
    pub text: String,
    /// False when the descriptor has no mapping on this surface. The text is
    /// then an opaque pointer and the member must not be emitted.
    pub supported: bool,
}

impl MappedType {
    fn supported(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            supported: true,
        }
    }

    fn unsupported() -> Self {
        Self {
            text: "*const c_void".to_string(),
            supported: false,
        }
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Name of the method table struct of a class.
#[must_use]
pub fn methods_struct(class: &str) -> String {
    format!("{class}RustMethods")
}

/// Classifies a type for a surface.
///
/// Total over every descriptor and surface: unknown combinations come back
/// with `supported == false` instead of failing.
#[must_use]
pub fn classify(ty: &ParameterType, surface: Surface) -> MappedType {
    match (ty, surface) {
        (ParameterType::Pointer { class }, Surface::PublicReturn | Surface::PublicParameter) => {
            MappedType::supported(format!("RustValue<{}>", methods_struct(class)))
        }
        (ParameterType::Pointer { class }, Surface::MethodReturn) => MappedType::supported(class),
        (ParameterType::Pointer { class }, Surface::MethodParameter) => {
            MappedType::supported(format!("&{class}"))
        }

        // Both integer kinds widen to i64 on every surface.
        (ParameterType::Int32 | ParameterType::Int64, _) => MappedType::supported("i64"),

        (ParameterType::Double, s) if s.is_public() => MappedType::supported("c_double"),
        (ParameterType::Double, _) => MappedType::supported("f64"),

        (ParameterType::Boolean, s) if s.is_public() => MappedType::supported("Boolean"),
        (ParameterType::Boolean, _) => MappedType::supported("bool"),

        (ParameterType::DomString | ParameterType::LegacyDomString, s) if s.is_public() => {
            MappedType::supported("*const c_char")
        }
        (ParameterType::DomString | ParameterType::LegacyDomString, Surface::MethodReturn) => {
            MappedType::supported("String")
        }
        (ParameterType::DomString | ParameterType::LegacyDomString, _) => {
            MappedType::supported("&str")
        }

        (ParameterType::Any, Surface::PublicReturn) => {
            MappedType::supported("RustValue<ScriptValueRefRustMethods>")
        }
        (ParameterType::Any, Surface::PublicParameter) => MappedType::supported("*const OpaquePtr"),
        (ParameterType::Any, Surface::MethodReturn) => MappedType::supported("ScriptValueRef"),
        (ParameterType::Any, Surface::MethodParameter) => MappedType::supported("&ScriptValueRef"),

        (ParameterType::Void, Surface::PublicReturn) => MappedType::supported("c_void"),
        (ParameterType::Void, Surface::MethodReturn) => MappedType::supported("()"),
        (ParameterType::Void, Surface::PublicParameter | Surface::MethodParameter) => {
            MappedType::unsupported()
        }

        (ParameterType::Unsupported, _) => MappedType::unsupported(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_types() -> Vec<ParameterType> {
        vec![
            ParameterType::Int32,
            ParameterType::Int64,
            ParameterType::Double,
            ParameterType::Boolean,
            ParameterType::DomString,
            ParameterType::LegacyDomString,
            ParameterType::Any,
            ParameterType::Void,
            ParameterType::pointer("Element"),
            ParameterType::Unsupported,
        ]
    }

    #[test]
    fn test_classify_is_total() {
        for ty in all_types() {
            for surface in Surface::ALL {
                let mapped = classify(&ty, surface);
                assert!(!mapped.text.is_empty(), "{ty} on {surface:?}");
            }
        }
    }

    #[test]
    fn test_pointer_surfaces() {
        let ty = ParameterType::pointer("Element");
        assert_eq!(
            classify(&ty, Surface::PublicReturn).text,
            "RustValue<ElementRustMethods>"
        );
        assert_eq!(
            classify(&ty, Surface::PublicParameter).text,
            "RustValue<ElementRustMethods>"
        );
        assert_eq!(classify(&ty, Surface::MethodReturn).text, "Element");
        assert_eq!(classify(&ty, Surface::MethodParameter).text, "&Element");
    }

    #[test]
    fn test_integers_widen() {
        for ty in [ParameterType::Int32, ParameterType::Int64] {
            for surface in Surface::ALL {
                assert_eq!(classify(&ty, surface).text, "i64");
            }
        }
    }

    #[test]
    fn test_double_and_boolean() {
        assert_eq!(
            classify(&ParameterType::Double, Surface::PublicReturn).text,
            "c_double"
        );
        assert_eq!(
            classify(&ParameterType::Double, Surface::MethodReturn).text,
            "f64"
        );
        assert_eq!(
            classify(&ParameterType::Boolean, Surface::PublicParameter).text,
            "Boolean"
        );
        assert_eq!(
            classify(&ParameterType::Boolean, Surface::MethodParameter).text,
            "bool"
        );
    }

    #[test]
    fn test_string_kinds_identical() {
        for surface in Surface::ALL {
            assert_eq!(
                classify(&ParameterType::DomString, surface),
                classify(&ParameterType::LegacyDomString, surface)
            );
        }
        assert_eq!(
            classify(&ParameterType::DomString, Surface::PublicReturn).text,
            "*const c_char"
        );
        assert_eq!(
            classify(&ParameterType::DomString, Surface::MethodReturn).text,
            "String"
        );
        assert_eq!(
            classify(&ParameterType::DomString, Surface::MethodParameter).text,
            "&str"
        );
    }

    #[test]
    fn test_any_surfaces() {
        assert_eq!(
            classify(&ParameterType::Any, Surface::PublicReturn).text,
            "RustValue<ScriptValueRefRustMethods>"
        );
        assert_eq!(
            classify(&ParameterType::Any, Surface::MethodReturn).text,
            "ScriptValueRef"
        );
        assert_eq!(
            classify(&ParameterType::Any, Surface::MethodParameter).text,
            "&ScriptValueRef"
        );
    }

    #[test]
    fn test_void_and_unsupported() {
        assert_eq!(
            classify(&ParameterType::Void, Surface::MethodReturn).text,
            "()"
        );
        assert!(classify(&ParameterType::Void, Surface::PublicReturn).supported);
        assert!(!classify(&ParameterType::Void, Surface::MethodParameter).supported);

        for surface in Surface::ALL {
            let mapped = classify(&ParameterType::Unsupported, surface);
            assert!(!mapped.supported);
            assert_eq!(mapped.to_string(), "*const c_void");
        }
    }
}

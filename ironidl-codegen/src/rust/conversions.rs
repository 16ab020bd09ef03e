//! Conversion code emitted at call sites and struct boundaries.
//!
//! The classifier decides representations; this module writes the Rust
//! expressions moving a value from one representation to the other. String
//! arguments are bound to a local `CString` declared before the native call,
//! so the buffer outlives it.

use ironidl_schema::ParameterType;

/// How one argument reaches a native call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentBinding {
    /// Statement to run before the call.
    pub prelude: Option<String>,
    /// Expression passed to the native function.
    pub expr: String,
}

/// Builds the call-site conversion for an argument bound to `name`.
///
/// Pointer arguments must already carry the emitted class name.
#[must_use]
pub fn argument_binding(name: &str, ty: &ParameterType) -> ArgumentBinding {
    match ty {
        ParameterType::DomString | ParameterType::LegacyDomString => ArgumentBinding {
            prelude: Some(format!("let {name} = to_native_string({name})?;")),
            expr: format!("{name}.as_ptr()"),
        },
        ParameterType::Boolean => ArgumentBinding {
            prelude: None,
            expr: format!("Boolean::from({name})"),
        },
        ParameterType::Any => ArgumentBinding {
            prelude: None,
            expr: format!("{name}.as_ptr()"),
        },
        ParameterType::Pointer { .. } => ArgumentBinding {
            prelude: None,
            expr: format!("{name}.boundary().as_rust_value()"),
        },
        ParameterType::Int32
        | ParameterType::Int64
        | ParameterType::Double
        | ParameterType::Void
        | ParameterType::Unsupported => ArgumentBinding {
            prelude: None,
            expr: name.to_string(),
        },
    }
}

/// Builds the expression turning a native return `value` into
/// `Result<T, BoundaryError>`.
///
/// `context` is the expression for the caller's executing context, carried
/// into handles of returned objects.
#[must_use]
pub fn return_unwrap(ty: &ParameterType, value: &str, context: &str) -> String {
    match ty {
        ParameterType::Pointer { class } => format!(
            "unsafe {{ {class}::initialize(BoundaryHandle::from_rust_value({value}, {context})) }}"
        ),
        ParameterType::DomString | ParameterType::LegacyDomString => {
            format!("unsafe {{ take_native_string({value}) }}")
        }
        ParameterType::Boolean => format!("Ok({value} != 0)"),
        ParameterType::Any => format!("Ok(ScriptValueRef::from_rust_value({value}))"),
        ParameterType::Void => "Ok(())".to_string(),
        ParameterType::Int32
        | ParameterType::Int64
        | ParameterType::Double
        | ParameterType::Unsupported => format!("Ok({value})"),
    }
}

/// Conversion of one dictionary field into its raw form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFieldConversion {
    /// Statements run before the raw struct is built.
    pub prelude: Option<String>,
    /// Initializer expression for the raw field.
    pub expr: String,
}

/// Builds the `to_native` conversion of field `field`.
///
/// String buffers are pushed onto the `strings` vector of the native owner.
#[must_use]
pub fn to_raw_field(field: &str, ty: &ParameterType) -> RawFieldConversion {
    match ty {
        ParameterType::DomString | ParameterType::LegacyDomString => RawFieldConversion {
            prelude: Some(format!(
                "let {field}_buffer = to_native_string(&self.{field})?;\n\
                 let {field}_ptr = {field}_buffer.as_ptr();\n\
                 strings.push({field}_buffer);"
            )),
            expr: format!("{field}_ptr"),
        },
        ParameterType::Boolean => RawFieldConversion {
            prelude: None,
            expr: format!("Boolean::from(self.{field})"),
        },
        ParameterType::Any => RawFieldConversion {
            prelude: None,
            expr: format!("self.{field}.to_rust_value()"),
        },
        _ => RawFieldConversion {
            prelude: None,
            expr: format!("self.{field}"),
        },
    }
}

/// Builds the `from_raw` expression for field `field`, reading from `raw`.
///
/// Strings in a raw dictionary stay owned by the native side and are copied.
#[must_use]
pub fn from_raw_field(field: &str, ty: &ParameterType) -> String {
    match ty {
        ParameterType::DomString | ParameterType::LegacyDomString => {
            format!("unsafe {{ copy_native_string(raw.{field}) }}?")
        }
        ParameterType::Boolean => format!("raw.{field} != 0"),
        ParameterType::Any => format!("ScriptValueRef::from_rust_value(raw.{field})"),
        _ => format!("raw.{field}"),
    }
}

//! Interface binding generation.
//!
//! Every interface produces a `#[repr(C)]` method table mirroring the native
//! vtable and a wrapper struct that owns a `BoundaryHandle` to the native
//! object. A derived wrapper embeds its parent wrapper, built from the parent
//! table pointer stored in its own table, and derefs to it. Only root classes
//! carry a `release` slot and release the object on drop.

use super::classifier::{Surface, classify, methods_struct};
use super::conversions::{argument_binding, return_unwrap};
use super::{TypeUse, resolve_type};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::naming::{UniqueNames, rust_identifier, to_snake_case};
use crate::resolver::{ClassResolver, ParentResolution, PointerResolution};
use crate::templates::InterfaceFragment;
use ironidl_schema::{Attribute, ClassObject, Operation};

/// Names every wrapper and table already uses.
const RESERVED_MEMBER_NAMES: &[&str] = &["version", "release", "initialize", "boundary"];

/// Locals of generated wrapper methods that arguments must not shadow.
const RESERVED_LOCALS: &[&str] = &["methods", "value", "exception_state"];

const CONTEXT: &str = "self.boundary.context()";

/// Generator for interface bindings.
pub struct InterfaceGenerator<'a> {
    resolver: ClassResolver<'a>,
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(resolver: ClassResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Builds the fragment for `class`, emitted as `object_name`.
    ///
    /// Members that cannot be bound are skipped and reported to `sink`.
    pub fn generate(
        &self,
        class: &ClassObject,
        object_name: &str,
        sink: &mut DiagnosticSink,
    ) -> InterfaceFragment {
        let mut names = UniqueNames::with_reserved(RESERVED_MEMBER_NAMES.iter().copied());
        let mut fragment = InterfaceFragment {
            object_name: object_name.to_string(),
            class_name: class.name.clone(),
            ..InterfaceFragment::default()
        };

        self.generate_parent(class, object_name, &mut names, &mut fragment, sink);

        for attribute in class.attributes() {
            self.generate_attribute(class, attribute, &mut names, &mut fragment, sink);
        }

        for (name, group) in class.overload_groups() {
            for (index, operation) in group.iter().enumerate() {
                let rust_name = overload_name(name, index, operation);
                self.generate_operation(
                    class,
                    operation,
                    &rust_name,
                    &mut names,
                    &mut fragment,
                    sink,
                );
            }
        }

        fragment
    }

    /// Fills the parent-dependent slots.
    fn generate_parent(
        &self,
        class: &ClassObject,
        object_name: &str,
        names: &mut UniqueNames,
        fragment: &mut InterfaceFragment,
        sink: &mut DiagnosticSink,
    ) {
        let parent = match self.resolver.resolve_parent(class) {
            ParentResolution::Resolved { name, object } => {
                match self.resolver.resolve_pointer(&object.name) {
                    PointerResolution::Interface(_) => Ok(name),
                    PointerResolution::Dictionary(_) | PointerResolution::Unresolved => {
                        sink.report(
                            &class.name,
                            None,
                            DiagnosticKind::UnsupportedMember {
                                reason: format!(
                                    "interface cannot inherit from dictionary '{}'",
                                    object.name
                                ),
                            },
                        );
                        Err(object.name.clone())
                    }
                }
            }
            ParentResolution::Unresolved(parent) => {
                sink.report(
                    &class.name,
                    None,
                    DiagnosticKind::UnresolvedParent {
                        parent: parent.clone(),
                    },
                );
                Err(parent)
            }
            ParentResolution::Root => {
                fragment
                    .parent_table_field
                    .push_str("    pub release: extern \"C\" fn(*const OpaquePtr),\n");
                fragment.initialize_body.push_str("        boundary.methods()?;\n");
                fragment.initialize_body.push_str("        Ok(Self { boundary })\n");
                fragment.inheritance = generate_drop(object_name);
                return;
            }
        };

        match parent {
            Ok(parent) => {
                let field = names.allocate(&rust_identifier(&parent));
                fragment.parent_table_field.push_str(&format!(
                    "    pub {}: *const {},\n",
                    field,
                    methods_struct(&parent)
                ));
                fragment
                    .parent_field
                    .push_str(&format!("    pub {field}: {parent},\n"));
                fragment
                    .initialize_body
                    .push_str("        let methods = boundary.methods()?;\n");
                fragment.initialize_body.push_str(&format!(
                    "        let {field} = unsafe {{ {parent}::initialize(boundary.with_methods(methods.{field})) }}?;\n"
                ));
                fragment
                    .initialize_body
                    .push_str(&format!("        Ok(Self {{ {field}, boundary }})\n"));
                fragment.inheritance = generate_deref(object_name, &parent, &field);
            }
            Err(parent) => {
                // Keep the table layout; the parent part itself is omitted.
                let field = names.allocate(&rust_identifier(&parent));
                fragment
                    .parent_table_field
                    .push_str(&format!("    pub {field}: *const c_void,\n"));
                fragment.initialize_body.push_str("        boundary.methods()?;\n");
                fragment.initialize_body.push_str("        Ok(Self { boundary })\n");
            }
        }
    }

    /// Emits the getter and, for writable attributes, the setter.
    fn generate_attribute(
        &self,
        class: &ClassObject,
        attribute: &Attribute,
        names: &mut UniqueNames,
        fragment: &mut InterfaceFragment,
        sink: &mut DiagnosticSink,
    ) {
        let ty = match resolve_type(&self.resolver, &attribute.ty, TypeUse::Value) {
            Ok(ty) => ty,
            Err(kind) => {
                sink.report(&class.name, Some(&attribute.name), kind);
                return;
            }
        };

        let getter = names.allocate(&rust_identifier(&attribute.name));
        fragment.table_fields.push_str(&format!(
            "    pub {}: extern \"C\" fn(*const OpaquePtr) -> {},\n",
            getter,
            classify(&ty, Surface::PublicReturn)
        ));

        let mut output = String::new();
        output.push_str(&format!(
            "    pub fn {}(&self) -> Result<{}, BoundaryError> {{\n",
            getter,
            classify(&ty, Surface::MethodReturn)
        ));
        output.push_str("        let methods = self.boundary.methods()?;\n");
        output.push_str(&format!(
            "        let value = (methods.{getter})(self.boundary.ptr());\n"
        ));
        output.push_str(&format!(
            "        {}\n",
            return_unwrap(&ty, "value", CONTEXT)
        ));
        output.push_str("    }\n\n");

        if !attribute.readonly {
            let setter = names.allocate(&format!("set_{}", to_snake_case(&attribute.name)));
            let binding = argument_binding("value", &ty);

            fragment.table_fields.push_str(&format!(
                "    pub {}: extern \"C\" fn(*const OpaquePtr, {}, *const OpaquePtr),\n",
                setter,
                classify(&ty, Surface::PublicParameter)
            ));

            output.push_str(&format!(
                "    pub fn {}(&self, value: {}, exception_state: &ExceptionState) -> Result<(), BoundaryError> {{\n",
                setter,
                classify(&ty, Surface::MethodParameter)
            ));
            output.push_str("        let methods = self.boundary.methods()?;\n");
            if let Some(prelude) = &binding.prelude {
                output.push_str(&format!("        {prelude}\n"));
            }
            output.push_str(&format!(
                "        (methods.{})(self.boundary.ptr(), {}, exception_state.ptr());\n",
                setter, binding.expr
            ));
            output.push_str(&format!("        exception_state.check({CONTEXT})\n"));
            output.push_str("    }\n\n");
        }

        fragment.members.push_str(&output);
    }

    /// Emits one operation: table slot, wrapper and call-site conversions.
    fn generate_operation(
        &self,
        class: &ClassObject,
        operation: &Operation,
        rust_name: &str,
        names: &mut UniqueNames,
        fragment: &mut InterfaceFragment,
        sink: &mut DiagnosticSink,
    ) {
        let return_type =
            match resolve_type(&self.resolver, &operation.return_type, TypeUse::Return) {
                Ok(ty) => ty,
                Err(kind) => {
                    sink.report(&class.name, Some(&operation.name), kind);
                    return;
                }
            };

        let mut arg_names = UniqueNames::default();
        let mut arguments = Vec::with_capacity(operation.arguments.len());
        for argument in &operation.arguments {
            let ty = match resolve_type(&self.resolver, &argument.ty, TypeUse::Value) {
                Ok(ty) => ty,
                Err(kind) => {
                    sink.report(
                        &class.name,
                        Some(&format!("{}({})", operation.name, argument.name)),
                        kind,
                    );
                    return;
                }
            };
            let mut ident = rust_identifier(&argument.name);
            if RESERVED_LOCALS.contains(&ident.as_str()) {
                ident.push('_');
            }
            arguments.push((arg_names.allocate(&ident), ty));
        }

        let name = names.allocate(rust_name);
        let is_void = return_type.is_void();

        // Table slot.
        let mut public_params = vec!["*const OpaquePtr".to_string()];
        public_params.extend(
            arguments
                .iter()
                .map(|(_, ty)| classify(ty, Surface::PublicParameter).text),
        );
        public_params.push("*const OpaquePtr".to_string());
        let public_return = if is_void {
            String::new()
        } else {
            format!(" -> {}", classify(&return_type, Surface::PublicReturn))
        };
        fragment.table_fields.push_str(&format!(
            "    pub {}: extern \"C\" fn({}){},\n",
            name,
            public_params.join(", "),
            public_return
        ));

        // Wrapper method.
        let mut params = vec!["&self".to_string()];
        params.extend(
            arguments
                .iter()
                .map(|(arg, ty)| format!("{}: {}", arg, classify(ty, Surface::MethodParameter))),
        );
        params.push("exception_state: &ExceptionState".to_string());

        let mut output = String::new();
        output.push_str(&format!(
            "    pub fn {}({}) -> Result<{}, BoundaryError> {{\n",
            name,
            params.join(", "),
            classify(&return_type, Surface::MethodReturn)
        ));
        output.push_str("        let methods = self.boundary.methods()?;\n");

        let mut call_args = vec!["self.boundary.ptr()".to_string()];
        for (arg, ty) in &arguments {
            let binding = argument_binding(arg, ty);
            if let Some(prelude) = binding.prelude {
                output.push_str(&format!("        {prelude}\n"));
            }
            call_args.push(binding.expr);
        }
        call_args.push("exception_state.ptr()".to_string());
        let call = format!("(methods.{})({})", name, call_args.join(", "));

        if is_void {
            output.push_str(&format!("        {call};\n"));
            output.push_str(&format!("        exception_state.check({CONTEXT})\n"));
        } else {
            output.push_str(&format!("        let value = {call};\n"));
            output.push_str(&format!("        exception_state.check({CONTEXT})?;\n"));
            output.push_str(&format!(
                "        {}\n",
                return_unwrap(&return_type, "value", CONTEXT)
            ));
        }
        output.push_str("    }\n\n");

        fragment.members.push_str(&output);
    }
}

/// Wrapper name of the `index`-th overload of `name`.
///
/// The first overload keeps the plain name; later ones are suffixed with
/// their argument names. Remaining collisions are numbered by the caller.
fn overload_name(name: &str, index: usize, operation: &Operation) -> String {
    if index == 0 || operation.arguments.is_empty() {
        return rust_identifier(name);
    }
    let suffix: Vec<String> = operation
        .arguments
        .iter()
        .map(|a| to_snake_case(&a.name))
        .collect();
    format!("{}_with_{}", to_snake_case(name), suffix.join("_and_"))
}

fn generate_deref(object_name: &str, parent: &str, field: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("impl std::ops::Deref for {object_name} {{\n"));
    output.push_str(&format!("    type Target = {parent};\n\n"));
    output.push_str(&format!("    fn deref(&self) -> &{parent} {{\n"));
    output.push_str(&format!("        &self.{field}\n"));
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}

fn generate_drop(object_name: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("impl Drop for {object_name} {{\n"));
    output.push_str("    fn drop(&mut self) {\n");
    output.push_str("        if let Ok(methods) = self.boundary.methods() {\n");
    output.push_str("            (methods.release)(self.boundary.ptr());\n");
    output.push_str("        }\n");
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}

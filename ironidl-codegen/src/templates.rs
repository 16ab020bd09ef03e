//! Fixed source skeletons with named slots.
//!
//! A template is plain text with `{{slot}}` placeholders. Each template kind
//! declares the exact set of slots its fragment provides: a template naming
//! an unknown slot, leaving out a declared one, or containing an unterminated
//! placeholder is rejected when it is loaded. Rendering copies literal text
//! and slot values in order; there is no escaping, looping or conditional.

use crate::error::CodegenError;
use std::fmt;

const BASE: &str = include_str!("../templates/base.rs.tpl");
const INTERFACE: &str = include_str!("../templates/interface.rs.tpl");
const DICTIONARY: &str = include_str!("../templates/dictionary.rs.tpl");
const GLOBAL_FUNCTION: &str = include_str!("../templates/global_function.rs.tpl");

/// The four template assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// File skeleton wrapping all fragments of a unit.
    Base,
    /// Interface bindings.
    Interface,
    /// Dictionary value types.
    Dictionary,
    /// Free functions. Loaded and checked but not rendered yet.
    GlobalFunction,
}

impl TemplateKind {
    /// All kinds.
    pub const ALL: [Self; 4] = [
        Self::Base,
        Self::Interface,
        Self::Dictionary,
        Self::GlobalFunction,
    ];

    /// Asset name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Interface => "interface",
            Self::Dictionary => "dictionary",
            Self::GlobalFunction => "global_function",
        }
    }

    /// File name of the asset in a template directory.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.rs.tpl", self.name())
    }

    /// Slots the kind's fragment provides. Every one must appear in the
    /// template.
    #[must_use]
    pub const fn slots(self) -> &'static [&'static str] {
        match self {
            Self::Base => &["source", "class_name", "content"],
            Self::Interface => &[
                "object_name",
                "class_name",
                "parent_table_field",
                "table_fields",
                "parent_field",
                "initialize_body",
                "members",
                "inheritance",
            ],
            Self::Dictionary => &[
                "object_name",
                "class_name",
                "fields",
                "raw_fields",
                "to_native_body",
                "raw_init",
                "from_raw_fields",
            ],
            Self::GlobalFunction => &["name", "content"],
        }
    }

    const fn builtin_source(self) -> &'static str {
        match self {
            Self::Base => BASE,
            Self::Interface => INTERFACE,
            Self::Dictionary => DICTIONARY,
            Self::GlobalFunction => GLOBAL_FUNCTION,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed slot values for one template kind.
pub trait Fragment {
    /// Template the fragment fills.
    fn kind(&self) -> TemplateKind;

    /// Value of a slot, or `None` if the fragment does not provide it.
    fn slot(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(&'static str),
}

/// A checked template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: TemplateKind,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses and checks a template for `kind`.
    ///
    /// # Errors
    /// Returns [`CodegenError::Template`] for unterminated placeholders,
    /// unknown slots and missing slots.
    pub fn parse(kind: TemplateKind, source: &str) -> Result<Self, CodegenError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                CodegenError::template(kind.name(), "unterminated placeholder")
            })?;
            let name = after[..end].trim();
            let slot = kind
                .slots()
                .iter()
                .find(|s| **s == name)
                .ok_or_else(|| {
                    CodegenError::template(kind.name(), format!("unknown slot '{name}'"))
                })?;
            segments.push(Segment::Slot(*slot));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        for slot in kind.slots() {
            if !segments.contains(&Segment::Slot(*slot)) {
                return Err(CodegenError::template(
                    kind.name(),
                    format!("missing slot '{slot}'"),
                ));
            }
        }

        Ok(Self { kind, segments })
    }

    /// Template kind.
    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Fills the template from a fragment of the same kind.
    ///
    /// # Errors
    /// Returns [`CodegenError::Template`] if the fragment is for another
    /// template or lacks a slot.
    pub fn render(&self, fragment: &dyn Fragment) -> Result<String, CodegenError> {
        if fragment.kind() != self.kind {
            return Err(CodegenError::template(
                self.kind.name(),
                format!("cannot render a {} fragment", fragment.kind()),
            ));
        }
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Slot(name) => {
                    let value = fragment.slot(name).ok_or_else(|| {
                        CodegenError::template(
                            self.kind.name(),
                            format!("fragment has no value for slot '{name}'"),
                        )
                    })?;
                    output.push_str(value);
                }
            }
        }
        Ok(output)
    }
}

/// The full set of templates used by a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    base: Template,
    interface: Template,
    dictionary: Template,
    global_function: Template,
}

impl TemplateSet {
    /// Loads the templates compiled into the crate.
    ///
    /// # Errors
    /// Returns [`CodegenError::Template`] if a built-in asset is malformed.
    pub fn builtin() -> Result<Self, CodegenError> {
        Self::from_sources(|kind| Some(kind.builtin_source().to_string()))
    }

    /// Builds a set from a source lookup, falling back to the built-in asset
    /// for kinds the lookup does not provide.
    ///
    /// # Errors
    /// Returns [`CodegenError::Template`] if any template is malformed.
    pub fn from_sources(
        mut lookup: impl FnMut(TemplateKind) -> Option<String>,
    ) -> Result<Self, CodegenError> {
        let mut load = |kind: TemplateKind| {
            let source = lookup(kind).unwrap_or_else(|| kind.builtin_source().to_string());
            Template::parse(kind, &source)
        };
        Ok(Self {
            base: load(TemplateKind::Base)?,
            interface: load(TemplateKind::Interface)?,
            dictionary: load(TemplateKind::Dictionary)?,
            global_function: load(TemplateKind::GlobalFunction)?,
        })
    }

    /// Returns the template for a kind.
    #[must_use]
    pub const fn get(&self, kind: TemplateKind) -> &Template {
        match kind {
            TemplateKind::Base => &self.base,
            TemplateKind::Interface => &self.interface,
            TemplateKind::Dictionary => &self.dictionary,
            TemplateKind::GlobalFunction => &self.global_function,
        }
    }

    /// Renders a fragment with the matching template.
    ///
    /// # Errors
    /// See [`Template::render`].
    pub fn render(&self, fragment: &dyn Fragment) -> Result<String, CodegenError> {
        self.get(fragment.kind()).render(fragment)
    }
}

/// Fragment for the file skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseFragment {
    /// Source unit filename.
    pub source: String,
    /// Class name derived from the unit.
    pub class_name: String,
    /// Concatenated object fragments.
    pub content: String,
}

impl Fragment for BaseFragment {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Base
    }

    fn slot(&self, name: &str) -> Option<&str> {
        match name {
            "source" => Some(&self.source),
            "class_name" => Some(&self.class_name),
            "content" => Some(&self.content),
            _ => None,
        }
    }
}

/// Fragment for one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceFragment {
    /// Emitted Rust type name.
    pub object_name: String,
    /// Declared class name.
    pub class_name: String,
    /// Method table field pointing at the parent table.
    pub parent_table_field: String,
    /// Method table function pointers.
    pub table_fields: String,
    /// Wrapper field holding the parent part.
    pub parent_field: String,
    /// Body of `initialize`.
    pub initialize_body: String,
    /// Accessors, setters and operations.
    pub members: String,
    /// `Deref` or `Drop` impls.
    pub inheritance: String,
}

impl Fragment for InterfaceFragment {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Interface
    }

    fn slot(&self, name: &str) -> Option<&str> {
        match name {
            "object_name" => Some(&self.object_name),
            "class_name" => Some(&self.class_name),
            "parent_table_field" => Some(&self.parent_table_field),
            "table_fields" => Some(&self.table_fields),
            "parent_field" => Some(&self.parent_field),
            "initialize_body" => Some(&self.initialize_body),
            "members" => Some(&self.members),
            "inheritance" => Some(&self.inheritance),
            _ => None,
        }
    }
}

/// Fragment for one dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryFragment {
    /// Emitted Rust type name.
    pub object_name: String,
    /// Declared class name.
    pub class_name: String,
    /// Value struct fields.
    pub fields: String,
    /// `#[repr(C)]` struct fields.
    pub raw_fields: String,
    /// Statements preparing buffers in `to_native`.
    pub to_native_body: String,
    /// Raw struct initializers in `to_native`.
    pub raw_init: String,
    /// Value struct initializers in `from_raw`.
    pub from_raw_fields: String,
}

impl Fragment for DictionaryFragment {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Dictionary
    }

    fn slot(&self, name: &str) -> Option<&str> {
        match name {
            "object_name" => Some(&self.object_name),
            "class_name" => Some(&self.class_name),
            "fields" => Some(&self.fields),
            "raw_fields" => Some(&self.raw_fields),
            "to_native_body" => Some(&self.to_native_body),
            "raw_init" => Some(&self.raw_init),
            "from_raw_fields" => Some(&self.from_raw_fields),
            _ => None,
        }
    }
}

use std::fmt;

/// How a member's value is read and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A single scalar rendered through its formatter.
    Value,
    /// A filter value holder, translated operator by operator.
    FilterTyped,
    /// A collection rendered as one multi-valued parameter.
    Iterable,
    /// A fixed or borrowed slice, rendered like [`Classification::Iterable`].
    Array,
}

impl Classification {
    /// Whether an element-type override is meaningful for this classification.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Iterable | Self::Array)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Method => f.write_str("method"),
        }
    }
}

/// One accepted member of a criteria type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Declared Rust name of the field or method.
    pub name: &'static str,
    /// Name used for query parameters: the alias, the field name, or the normalised method name.
    pub param_name: String,
    /// Source spelling of the declared (or return) type.
    pub declared_type: &'static str,
    pub classification: Classification,
    /// Formatted alias, if one was declared.
    pub alias: Option<String>,
    /// Element type for collections, only kept for `Iterable`/`Array` members.
    pub element_type_override: Option<&'static str>,
    pub kind: MemberKind,
    /// The type that declared the member, which differs from the descriptor owner for
    /// members inherited from an embedded base.
    pub declared_in: &'static str,
}

impl MemberDescriptor {
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(self.classification, Classification::FilterTyped)
    }
}

/// The memoized extraction result for one criteria type.
///
/// Obtained through [`extract`](super::extract) or [`Criteria::descriptor`](super::Criteria::descriptor);
/// one instance exists per type for the lifetime of the process.
#[derive(Debug, PartialEq, Eq)]
pub struct CriteriaDescriptor {
    pub(crate) owner: &'static str,
    pub(crate) fields: Vec<MemberDescriptor>,
    pub(crate) methods: Vec<MemberDescriptor>,
}

impl CriteriaDescriptor {
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Accepted fields, most-derived level first, declaration order within a level.
    #[must_use]
    pub fn fields(&self) -> &[MemberDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn methods(&self) -> &[MemberDescriptor] {
        &self.methods
    }

    /// Fields followed by methods.
    pub fn members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.fields.iter().chain(&self.methods)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&MemberDescriptor> {
        self.fields.iter().find(|member| member.name == name)
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MemberDescriptor> {
        self.methods.iter().find(|member| member.name == name)
    }

    /// Accepted members of classification [`Classification::FilterTyped`].
    pub fn filter_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members().filter(|member| member.is_filter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len() + self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }
}

//! Raw member declarations, as emitted by `#[derive(Criteria)]`.
//!
//! A [`Declaration`] lists every member of a criteria type with its annotations, before any
//! inclusion rule is applied. The extraction engine turns it into a
//! [`CriteriaDescriptor`](super::CriteriaDescriptor). Declarations can also be written by hand:
//!
//! ```rust
//! use criteriacrate::metadata::{Classification, Declaration, DeclaredMember, DeclaredMethod};
//!
//! let declaration = Declaration::new("ProductCriteria")
//!     .field(DeclaredMember::new("name", "StringFilter", Classification::FilterTyped))
//!     .field(DeclaredMember::new("tags", "Vec<String>", Classification::Iterable).include())
//!     .field(DeclaredMember::new("internal", "StringFilter", Classification::FilterTyped).ignore())
//!     .method(DeclaredMethod::new("is_featured", "bool", Classification::Value).include());
//!
//! assert_eq!(declaration.fields.len(), 3);
//! assert_eq!(declaration.levels().count(), 1);
//! ```

use super::descriptor::Classification;

/// The raw, unfiltered member list of one criteria type, with its base chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub owner: &'static str,
    pub fields: Vec<DeclaredMember>,
    pub methods: Vec<DeclaredMethod>,
    /// Declaration of the embedded base criteria, if any.
    pub base: Option<Box<Declaration>>,
}

impl Declaration {
    #[must_use]
    pub const fn new(owner: &'static str) -> Self {
        Self {
            owner,
            fields: Vec::new(),
            methods: Vec::new(),
            base: None,
        }
    }

    #[must_use]
    pub fn field(mut self, member: DeclaredMember) -> Self {
        self.fields.push(member);
        self
    }

    #[must_use]
    pub fn fields(mut self, members: impl IntoIterator<Item = DeclaredMember>) -> Self {
        self.fields.extend(members);
        self
    }

    #[must_use]
    pub fn method(mut self, method: DeclaredMethod) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = DeclaredMethod>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Embed `base` as the next less-derived level.
    #[must_use]
    pub fn extends(mut self, base: Declaration) -> Self {
        self.base = Some(Box::new(base));
        self
    }

    /// This level and every base level, most-derived first.
    pub fn levels(&self) -> impl Iterator<Item = &Declaration> {
        std::iter::successors(Some(self), |level| level.base.as_deref())
    }
}

/// One declared field, or the member part of a declared method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMember {
    pub name: &'static str,
    pub declared_type: &'static str,
    pub classification: Classification,
    pub ignore: bool,
    pub include: bool,
    pub alias: Option<&'static str>,
    pub element_type: Option<&'static str>,
}

impl DeclaredMember {
    #[must_use]
    pub const fn new(
        name: &'static str,
        declared_type: &'static str,
        classification: Classification,
    ) -> Self {
        Self {
            name,
            declared_type,
            classification,
            ignore: false,
            include: false,
            alias: None,
            element_type: None,
        }
    }

    #[must_use]
    pub const fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    #[must_use]
    pub const fn include(mut self) -> Self {
        self.include = true;
        self
    }

    /// Set the alias. An alias is an explicit include.
    #[must_use]
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self.include = true;
        self
    }

    #[must_use]
    pub const fn element(mut self, element_type: &'static str) -> Self {
        self.element_type = Some(element_type);
        self
    }
}

/// How a declared method receives `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `self`, `&mut self` or a typed receiver.
    Other,
    /// An associated function without receiver.
    Associated,
}

/// One declared method of a criteria type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMethod {
    /// Name, return type spelling, classification of the return type and annotations.
    pub member: DeclaredMember,
    pub receiver: Receiver,
    /// Number of parameters besides the receiver.
    pub arity: usize,
    pub returns_unit: bool,
    /// Declares type or const parameters, so it cannot be called as an accessor.
    pub generic: bool,
}

impl DeclaredMethod {
    /// A `&self` method without parameters.
    #[must_use]
    pub const fn new(
        name: &'static str,
        return_type: &'static str,
        classification: Classification,
    ) -> Self {
        Self {
            member: DeclaredMember::new(name, return_type, classification),
            receiver: Receiver::Ref,
            arity: 0,
            returns_unit: false,
            generic: false,
        }
    }

    #[must_use]
    pub const fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    #[must_use]
    pub const fn arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    #[must_use]
    pub const fn returns_unit(mut self) -> Self {
        self.returns_unit = true;
        self
    }

    #[must_use]
    pub const fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    #[must_use]
    pub fn ignore(mut self) -> Self {
        self.member = self.member.ignore();
        self
    }

    #[must_use]
    pub fn include(mut self) -> Self {
        self.member = self.member.include();
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.member = self.member.alias(alias);
        self
    }

    #[must_use]
    pub fn element(mut self, element_type: &'static str) -> Self {
        self.member = self.member.element(element_type);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.member.name
    }
}

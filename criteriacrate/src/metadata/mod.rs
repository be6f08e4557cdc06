//! Criteria metadata: declarations, extraction rules and the descriptor cache.
//!
//! `#[derive(Criteria)]` records every member of a struct in a [`Declaration`]. The first
//! call to [`extract`] (or [`Criteria::descriptor`]) applies the inclusion rules and
//! publishes one [`CriteriaDescriptor`] for the type:
//!
//! 1. Base levels are walked after the derived one; a name accepted at a more-derived level
//!    shadows the base member. A rejected member shadows nothing.
//! 2. `ignore` excludes a member, whatever else it is annotated with.
//! 3. `include` (or `alias`) accepts it.
//! 4. Filter-typed members are accepted without annotation.
//! 5. Everything else is left out.
//!
//! Accessor methods are only considered when annotated, and only when they take `&self`, no
//! parameters, no type parameters and return something.

mod cache;
mod criteria;
pub mod declaration;
pub mod descriptor;
pub mod extraction;

pub use cache::{extract, is_cached};
pub use criteria::{Criteria, CriteriaMethods, FilterBinding, MemberRef, MemberValue};
pub use declaration::{Declaration, DeclaredMember, DeclaredMethod, Receiver};
pub use descriptor::{Classification, CriteriaDescriptor, MemberDescriptor, MemberKind};

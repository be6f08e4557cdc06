//! Extraction of a [`CriteriaDescriptor`] from a raw [`Declaration`].

use std::collections::HashSet;

use tracing::{debug, warn};

use super::declaration::{Declaration, DeclaredMember, DeclaredMethod, Receiver};
use super::descriptor::{Classification, CriteriaDescriptor, MemberDescriptor, MemberKind};
use crate::errors::{CriteriaError, Result};

/// Methods that describe the value itself rather than one of its attributes.
const IDENTITY_METHODS: [&str; 10] = [
    "eq",
    "ne",
    "hash",
    "fmt",
    "to_string",
    "clone",
    "clone_from",
    "cmp",
    "partial_cmp",
    "type_id",
];

/// Apply the inclusion rules to every level of `declaration`.
///
/// Levels are walked most-derived first. An accepted member whose name was already accepted
/// at a more-derived level is skipped with a warning. Rejected members never shadow.
///
/// # Errors
///
/// [`CriteriaError::BlankAlias`] when an accepted member's alias formats to nothing,
/// [`CriteriaError::BlankMethodName`] when an accepted method without alias has a name that
/// is only a `get`/`is` prefix.
pub fn extract_descriptor(declaration: &Declaration) -> Result<CriteriaDescriptor> {
    let mut seen_fields = HashSet::new();
    let mut seen_methods = HashSet::new();
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    for level in declaration.levels() {
        for member in &level.fields {
            if !is_accepted(member) {
                continue;
            }
            if !seen_fields.insert(member.name) {
                warn!(
                    owner = declaration.owner,
                    declared_in = level.owner,
                    field = member.name,
                    "Field shadowed by a more-derived declaration, skipping"
                );
                continue;
            }
            fields.push(describe(level.owner, member, MemberKind::Field, || {
                Ok(member.name.to_string())
            })?);
        }

        for method in &level.methods {
            let member = &method.member;
            if member.ignore || !member.include {
                continue;
            }
            if let Some(reason) = method_rejection(method) {
                debug!(
                    owner = level.owner,
                    method = member.name,
                    reason,
                    "Annotated method is not an accessor, skipping"
                );
                continue;
            }
            if !seen_methods.insert(member.name) {
                warn!(
                    owner = declaration.owner,
                    declared_in = level.owner,
                    method = member.name,
                    "Method shadowed by a more-derived declaration, skipping"
                );
                continue;
            }
            methods.push(describe(level.owner, member, MemberKind::Method, || {
                normalize_method_name(level.owner, member.name)
            })?);
        }
    }

    debug!(
        owner = declaration.owner,
        fields = fields.len(),
        methods = methods.len(),
        "Extracted criteria descriptor"
    );

    Ok(CriteriaDescriptor {
        owner: declaration.owner,
        fields,
        methods,
    })
}

/// Ignore beats include; filter members are included without annotation.
fn is_accepted(member: &DeclaredMember) -> bool {
    if member.ignore {
        return false;
    }
    member.include || member.classification == Classification::FilterTyped
}

fn method_rejection(method: &DeclaredMethod) -> Option<&'static str> {
    if IDENTITY_METHODS.contains(&method.name()) {
        Some("object identity method")
    } else if method.receiver != Receiver::Ref {
        Some("receiver is not &self")
    } else if method.arity > 0 {
        Some("takes parameters")
    } else if method.returns_unit {
        Some("returns ()")
    } else if method.generic {
        Some("has type parameters")
    } else {
        None
    }
}

fn describe(
    declared_in: &'static str,
    member: &DeclaredMember,
    kind: MemberKind,
    default_param_name: impl FnOnce() -> Result<String>,
) -> Result<MemberDescriptor> {
    let alias = member
        .alias
        .map(|alias| format_alias(declared_in, member.name, member.classification, alias))
        .transpose()?;

    let element_type_override = match member.element_type {
        Some(element) if member.classification.is_collection() => Some(element),
        Some(element) => {
            warn!(
                owner = declared_in,
                member = member.name,
                element,
                "Element type override on a non-collection member, ignoring"
            );
            None
        }
        None => None,
    };

    let param_name = match &alias {
        Some(alias) => alias.clone(),
        None => default_param_name()?,
    };

    Ok(MemberDescriptor {
        name: member.name,
        param_name,
        declared_type: member.declared_type,
        classification: member.classification,
        alias,
        element_type_override,
        kind,
        declared_in,
    })
}

/// Format a declared alias.
///
/// For filter members everything from the first `.` on is an operator selector
/// (`"price.equals"`) and is dropped. The result is trimmed.
///
/// # Errors
///
/// [`CriteriaError::BlankAlias`] when nothing is left.
pub fn format_alias(
    owner: &'static str,
    member: &str,
    classification: Classification,
    alias: &str,
) -> Result<String> {
    let mut formatted = alias;
    if classification == Classification::FilterTyped {
        if let Some((head, selector)) = alias.split_once('.') {
            if !selector.trim().is_empty() {
                warn!(
                    owner,
                    member, alias, selector, "Operator selector dropped from filter alias"
                );
            }
            formatted = head;
        }
    }

    let formatted = formatted.trim();
    if formatted.is_empty() {
        return Err(CriteriaError::BlankAlias {
            owner,
            member: member.to_string(),
        });
    }
    Ok(formatted.to_string())
}

/// Default parameter name of an accessor: `get_`/`is_` or a camel-case `get`/`is` prefix is
/// stripped and the first remaining character lower-cased.
///
/// # Errors
///
/// [`CriteriaError::BlankMethodName`] when the name is nothing but the prefix.
pub fn normalize_method_name(owner: &'static str, method: &str) -> Result<String> {
    let stripped = ["get_", "is_"]
        .into_iter()
        .find_map(|prefix| method.strip_prefix(prefix))
        .or_else(|| {
            ["get", "is"].into_iter().find_map(|prefix| {
                method
                    .strip_prefix(prefix)
                    .filter(|rest| rest.is_empty() || rest.starts_with(char::is_uppercase))
            })
        })
        .unwrap_or(method);

    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => Ok(first.to_lowercase().chain(chars).collect()),
        None => Err(CriteriaError::BlankMethodName {
            owner,
            method: method.to_string(),
        }),
    }
}

use serde::Deserialize;
use utoipa::IntoParams;

use super::request::{SortDirection, SortOrder, SortRequest};
use crate::errors::{CriteriaError, Result};

/// Sort query parameters.
///
/// Two formats are accepted:
/// - **React Admin format:** `sort=["column", "ORDER"]`
/// - **Standard REST format:** `sort_by=column&order=ASC`, or `sort=column,desc;other`
///   using the [`SortRequest::parse`] syntax
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Sort order for the results, either `["column", "order"]` or `column[,asc|desc]`.
    ///
    /// Example: `["id", "ASC"]`
    #[param(example = r#"["id", "ASC"]"#)]
    pub sort: Option<String>,
    /// Sort column for standard REST format. Takes priority over `sort`.
    ///
    /// Example: `title`
    #[param(example = "title")]
    pub sort_by: Option<String>,
    /// Sort order for standard REST format (ASC or DESC).
    ///
    /// Example: `ASC`
    #[param(example = "ASC")]
    pub order: Option<String>,
}

impl SortParams {
    fn direction(&self) -> SortDirection {
        self.order
            .as_deref()
            .map_or(SortDirection::Asc, SortDirection::from_order)
    }
}

/// A trimmed, non-blank column key.
fn column_key<'a>(column: &'a str, raw: &str) -> Result<&'a str> {
    let key = column.trim();
    if key.is_empty() {
        return Err(CriteriaError::InvalidSortParameter(raw.to_string()));
    }
    Ok(key)
}

/// Parse the React Admin `["column", "ORDER"]` form.
fn parse_json_sort(sort: &str) -> Result<SortOrder> {
    let parts: Vec<String> = serde_json::from_str(sort)
        .map_err(|_| CriteriaError::InvalidSortParameter(sort.to_string()))?;
    match parts.as_slice() {
        [column] => Ok(SortOrder::new(column_key(column, sort)?)),
        [column, order, ..] => Ok(SortOrder::new(column_key(column, sort)?)
            .with_direction(SortDirection::from_order(order))),
        [] => Err(CriteriaError::InvalidSortParameter(sort.to_string())),
    }
}

impl TryFrom<&SortParams> for SortRequest {
    type Error = CriteriaError;

    fn try_from(params: &SortParams) -> Result<Self> {
        if let Some(sort_by) = &params.sort_by {
            return Ok(Self::by(
                SortOrder::new(column_key(sort_by, sort_by)?).with_direction(params.direction()),
            ));
        }

        match params.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(Self::new()),
            Some(sort) if sort.starts_with('[') => parse_json_sort(sort).map(Self::by),
            // `sort=column&order=DESC`
            Some(sort) if params.order.is_some() && !sort.contains([',', ';']) => {
                Ok(Self::by(SortOrder::new(sort).with_direction(params.direction())))
            }
            Some(sort) => Self::parse(sort),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>, sort_by: Option<&str>, order: Option<&str>) -> SortParams {
        SortParams {
            sort: sort.map(str::to_string),
            sort_by: sort_by.map(str::to_string),
            order: order.map(str::to_string),
        }
    }

    #[test]
    fn test_react_admin_format() {
        let request = SortRequest::try_from(&params(Some(r#"["title", "DESC"]"#), None, None)).unwrap();
        assert_eq!(request, SortRequest::by(SortOrder::desc("title")));
    }

    #[test]
    fn test_react_admin_malformed_is_rejected() {
        let result = SortRequest::try_from(&params(Some(r#"["title""#), None, None));
        assert!(matches!(result, Err(CriteriaError::InvalidSortParameter(_))));
        assert!(SortRequest::try_from(&params(Some("[]"), None, None)).is_err());
    }

    #[test]
    fn test_blank_column_keys_are_rejected() {
        for (sort, sort_by) in [
            (None, Some("")),
            (None, Some("   ")),
            (Some(r#"[""]"#), None),
            (Some(r#"[" ", "DESC"]"#), None),
        ] {
            let result = SortRequest::try_from(&params(sort, sort_by, None));
            assert!(
                matches!(result, Err(CriteriaError::InvalidSortParameter(_))),
                "{sort:?} {sort_by:?}"
            );
        }
    }

    #[test]
    fn test_sort_by_takes_priority() {
        let request =
            SortRequest::try_from(&params(Some("ignored"), Some("name"), Some("desc"))).unwrap();
        assert_eq!(request, SortRequest::by(SortOrder::desc("name")));
    }

    #[test]
    fn test_rest_column_with_order() {
        let request = SortRequest::try_from(&params(Some("name"), None, Some("DESC"))).unwrap();
        assert_eq!(request, SortRequest::by(SortOrder::desc("name")));
    }

    #[test]
    fn test_inline_syntax() {
        let request = SortRequest::try_from(&params(Some("name,desc;id"), None, None)).unwrap();
        assert_eq!(
            request,
            SortRequest::by(SortOrder::desc("name")).then(SortOrder::new("id"))
        );
    }

    #[test]
    fn test_non_asc_order_is_descending() {
        let request = SortRequest::try_from(&params(None, Some("name"), Some("random"))).unwrap();
        assert_eq!(request.orders()[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_no_sort_is_empty_request() {
        assert!(SortRequest::try_from(&SortParams::default()).unwrap().is_empty());
    }

    #[test]
    fn test_deserializes_from_query_string() {
        let params: SortParams = serde_json::from_value(serde_json::json!({
            "sort_by": "created_at",
            "order": "DESC"
        }))
        .unwrap();
        assert_eq!(params.sort_by.as_deref(), Some("created_at"));
        assert!(params.sort.is_none());
    }
}

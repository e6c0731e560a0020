//! Data source implementations.
//!
//! Data sources look records up by id or by name through the list
//! endpoints; exactly one match is required.

pub mod product;
pub mod product_type;

pub use product::ProductDataSource;
pub use product_type::ProductTypeDataSource;

use crate::framework::{Diagnostics, Value};

/// Decode the lookup parameters shared by every data source. At least one
/// of id and name must be configured.
pub(crate) fn lookup_params(
    id: &Value<String>,
    name: &Value<String>,
    diags: &mut Diagnostics,
) -> Option<(Option<i64>, Option<String>)> {
    let id = match id {
        Value::Known(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(e) => {
                diags.add_error(
                    "Error converting value",
                    format!("Could not convert the id value {:?} to an integer: {}", raw, e),
                );
                return None;
            }
        },
        _ => None,
    };
    let name = name.as_known().cloned();

    if id.is_none() && name.is_none() {
        diags.add_error(
            "Could not Read Data Source",
            "Either the id or the name attribute must be set.",
        );
        return None;
    }
    Some((id, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_id_or_name() {
        let mut diags = Diagnostics::new();
        let params = lookup_params(&Value::Known("7".into()), &Value::Null, &mut diags);
        assert_eq!(params, Some((Some(7), None)));

        let params = lookup_params(&Value::Null, &Value::Known("app".into()), &mut diags);
        assert_eq!(params, Some((None, Some("app".to_string()))));
        assert!(!diags.has_errors());
    }

    #[test]
    fn lookup_requires_a_parameter() {
        let mut diags = Diagnostics::new();
        assert_eq!(lookup_params(&Value::Null, &Value::Null, &mut diags), None);
        assert_eq!(diags.errors[0].summary, "Could not Read Data Source");
    }

    #[test]
    fn lookup_rejects_an_unparsable_id() {
        let mut diags = Diagnostics::new();
        assert_eq!(lookup_params(&Value::Known("x".into()), &Value::Null, &mut diags), None);
        assert_eq!(diags.errors[0].summary, "Error converting value");
    }
}

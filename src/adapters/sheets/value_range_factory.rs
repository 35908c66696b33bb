use google_sheets4::api::ValueRange;
use serde_json::Value;

pub trait ValueRangeFactory {
    /// One value per row, top to bottom.
    fn from_single_column<T: AsRef<str>>(column_values: &[T]) -> Self;
}

fn wrap_value<T: AsRef<str>>(value: T) -> Value {
    Value::String(value.as_ref().to_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_single_column<T: AsRef<str>>(column_values: &[T]) -> Self {
        let values = column_values
            .iter()
            .map(|item| vec![wrap_value(item)])
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}

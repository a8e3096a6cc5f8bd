use serde_json::Value;

use super::FromJsonError;

/// Walks a dot-separated path into `data`.
///
/// Each segment is an object key, or an integer index when the current value is an
/// array. Negative indices count from the end. An absent or empty path returns `data`
/// unchanged.
pub fn get_by_path(data: Value, path: Option<&str>) -> Result<Value, FromJsonError> {
    let Some(path) = path.filter(|path| !path.is_empty()) else {
        return Ok(data);
    };
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(mut object) => object
            .remove(segment)
            .ok_or_else(|| FromJsonError::missing_field(segment)),
        Value::Array(items) => {
            let index: i64 = segment
                .parse()
                .map_err(|_| FromJsonError::InvalidIndex(segment.to_owned()))?;
            let len = items.len();
            let position = if index < 0 {
                len.checked_sub(index.unsigned_abs() as usize)
            } else {
                Some(index as usize)
            };
            position
                .and_then(|i| items.into_iter().nth(i))
                .ok_or(FromJsonError::IndexOutOfRange { index, len })
        }
        other => Err(FromJsonError::shape_mismatch("`List` or `Mapping`", &other)),
    })
}

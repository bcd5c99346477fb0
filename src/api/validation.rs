use super::ApiError;

pub const WRONG_ID: &str = "Wrong id. Id should be > 0";
pub const UNREADABLE_ID: &str = "Unable to retrieve id from URL";

/// Parses the `{id}` path segment of `find`/`delete` routes.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(UNREADABLE_ID))?;

    let id = i32::try_from(id).map_err(|_| ApiError::bad_request(UNREADABLE_ID))?;
    validate_id(id)
}

pub fn validate_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::bad_request(WRONG_ID));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<i32, ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(message(parse_id("0")), WRONG_ID);
        assert_eq!(message(parse_id("-7")), WRONG_ID);
    }

    #[test]
    fn test_unreadable_id() {
        assert_eq!(message(parse_id("abc")), UNREADABLE_ID);
        assert_eq!(message(parse_id("")), UNREADABLE_ID);
        assert_eq!(message(parse_id("99999999999")), UNREADABLE_ID);
    }
}

use crate::errors::AppError;

/// Parses a path id into the store's numeric key.
///
/// Anything that is not an integer is a bad request. An integer outside the
/// key range cannot name a stored row and yields `None`.
pub fn valid_id(id: &str) -> Result<Option<i32>, AppError> {
    let trimmed = id.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!("Invalid id: {}", id)));
    }

    Ok(trimmed.parse::<i32>().ok())
}

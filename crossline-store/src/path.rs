use crate::store::StoreError;

/// Splits a store path into its segments, rejecting empty ones.
pub fn segments(path: &str) -> Result<Vec<String>, StoreError> {
    let parts: Vec<String> = path
        .trim_matches('/')
        .split('/')
        .map(str::to_owned)
        .collect();

    if parts.iter().any(|p| p.is_empty() || p == "." || p == "..") {
        return Err(StoreError::InvalidPath(path.to_owned()));
    }
    Ok(parts)
}

/// True when `a` equals `b` or is one of its ancestors.
pub fn is_prefix(a: &[String], b: &[String]) -> bool {
    a.len() <= b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

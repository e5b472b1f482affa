//! Result of resolving a routed document

use crate::cms::CmsError;

/// What a route found in the CMS
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
    Failed(CmsError),
}

impl<T> From<Result<Option<T>, CmsError>> for Outcome<T> {
    fn from(result: Result<Option<T>, CmsError>) -> Self {
        match result {
            Ok(Some(value)) => Outcome::Found(value),
            Ok(None) => Outcome::NotFound,
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl<T> From<Result<Vec<T>, CmsError>> for Outcome<Vec<T>> {
    /// Collections are always found; an empty list is a valid view
    fn from(result: Result<Vec<T>, CmsError>) -> Self {
        match result {
            Ok(items) => Outcome::Found(items),
            Err(e) => Outcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_optional() {
        let found: Outcome<u8> = Ok(Some(1)).into();
        assert!(matches!(found, Outcome::Found(1)));

        let missing: Outcome<u8> = Ok(None).into();
        assert!(matches!(missing, Outcome::NotFound));

        let failed: Outcome<u8> = Err(CmsError::Config("x".into())).into();
        assert!(matches!(failed, Outcome::Failed(CmsError::Config(_))));
    }

    #[test]
    fn test_empty_collection_is_found() {
        let outcome: Outcome<Vec<u8>> = Ok(Vec::new()).into();
        assert!(matches!(outcome, Outcome::Found(ref v) if v.is_empty()));
    }
}

//! Required-key validation
//!
//! Checks a document against a list of required keys, or against the keys
//! of a template document, and reports every missing key in one error.

use tracing::debug;

use crate::error::{EnvError, EnvResult};

use super::store::Document;

/// Keys from `required` that `document` does not assign, in the given order
pub fn missing_keys<S: AsRef<str>>(document: &Document, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(|key| key.as_ref())
        .filter(|key| !document.contains_key(key))
        .map(str::to_string)
        .collect()
}

/// Require every key declared by `template` to be present in `document`
///
/// Missing keys are reported in the template's file order.
pub fn validate_against_template(document: &Document, template: &Document) -> EnvResult<()> {
    document.require(template.keys().as_slice())
}

impl Document {
    /// Fail with `EnvError::Validation` listing all absent `keys`
    pub fn require<S: AsRef<str>>(&self, keys: &[S]) -> EnvResult<()> {
        let missing = missing_keys(self, keys);
        if missing.is_empty() {
            debug!(checked = keys.len(), "all required keys present");
            return Ok(());
        }
        Err(EnvError::Validation { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reports_all_missing_in_order() {
        let doc = Document::from_contents(".env", "APP_NAME=MyApp");

        let err = doc.require(&["APP_NAME", "DB_HOST", "API_KEY"]).unwrap_err();
        assert_eq!(err.missing_keys().unwrap(), ["DB_HOST", "API_KEY"]);
        assert_eq!(err.to_string(), "Missing required env keys: DB_HOST, API_KEY");
    }

    #[test]
    fn test_require_passes_when_all_present() {
        let doc = Document::from_contents(".env", "APP_NAME=MyApp\nDB_HOST=localhost");
        assert!(doc.require(&["APP_NAME", "DB_HOST"]).is_ok());
    }

    #[test]
    fn test_require_empty_value_counts_as_present() {
        let doc = Document::from_contents(".env", "DB_HOST=");
        assert!(doc.require(&["DB_HOST"]).is_ok());
    }

    #[test]
    fn test_require_on_empty_document() {
        let doc = Document::from_contents(".env", "");
        let err = doc.require(&["KEY1", "KEY2"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required env keys: KEY1, KEY2");
    }

    #[test]
    fn test_missing_keys_accepts_owned_strings() {
        let doc = Document::from_contents(".env", "A=1");
        let required = vec!["A".to_string(), "B".to_string()];
        assert_eq!(missing_keys(&doc, required.as_slice()), vec!["B".to_string()]);
    }

    #[test]
    fn test_validate_against_template_uses_template_order() {
        let doc = Document::from_contents(".env", "B=2");
        let template = Document::from_contents(".env.example", "# required\nZ=\nB=\nA=");

        let err = validate_against_template(&doc, &template).unwrap_err();
        assert_eq!(err.missing_keys().unwrap(), ["Z", "A"]);
    }
}

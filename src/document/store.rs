//! Document store
//!
//! `Document` owns the ordered line sequence and the key/value mapping
//! derived from it. Both are private and only change together, through the
//! operations below.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::backup::create_backup;
use crate::error::{EnvError, EnvResult};
use crate::storage::file_io::{read_optional, write_file};

use super::line::{parse_lines, Line};

/// Replacement shown for sensitive values in masked listings
pub const MASK: &str = "********";

/// Key-name fragments that mark a value as sensitive (matched case-insensitively)
pub const SENSITIVE_MARKERS: [&str; 4] = ["KEY", "SECRET", "PASS", "TOKEN"];

/// Values `get_bool` treats as true (compared case-insensitively)
const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];

/// Whether a key name looks like it holds a secret
pub fn is_sensitive_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SENSITIVE_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// A format-preserving env document bound to a file path
///
/// For duplicate keys the first assignment line is authoritative: it holds
/// the mapped value and is the one `set` updates.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<Line>,
    values: HashMap<String, String>,
}

impl Document {
    /// Create an empty, unloaded document for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Create a document for `path` and load it
    pub fn open(path: impl Into<PathBuf>) -> EnvResult<Self> {
        let mut document = Self::new(path);
        document.load()?;
        Ok(document)
    }

    /// Build a document from in-memory text, without touching the disk
    pub fn from_contents(path: impl Into<PathBuf>, contents: &str) -> Self {
        let mut document = Self::new(path);
        document.ingest(contents);
        document
    }

    /// (Re)load the document from disk
    ///
    /// A missing file yields an empty document. Loading replaces any
    /// in-memory state, so repeated loads of an unchanged file agree.
    pub fn load(&mut self) -> EnvResult<&mut Self> {
        match read_optional(&self.path)? {
            Some(bytes) => {
                let contents = String::from_utf8(bytes).map_err(|_| {
                    EnvError::Io(format!("{} is not valid UTF-8", self.path.display()))
                })?;
                self.ingest(&contents);
            }
            None => {
                debug!(path = %self.path.display(), "no file, starting empty");
                self.lines.clear();
                self.values.clear();
            }
        }
        Ok(self)
    }

    fn ingest(&mut self, contents: &str) {
        self.lines = parse_lines(contents);
        self.values.clear();

        for line in &self.lines {
            if let Line::Assignment { key, value } = line {
                if self.values.contains_key(key) {
                    warn!(key = %key, "duplicate key, keeping first value");
                    continue;
                }
                self.values.insert(key.clone(), value.clone());
            }
        }

        debug!(
            path = %self.path.display(),
            lines = self.lines.len(),
            keys = self.values.len(),
            "document parsed"
        );
    }

    /// The file this document reads from and saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The ordered line sequence
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of physical lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the document has no keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `key` is assigned
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Distinct keys in file order (first occurrence)
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter_map(Line::key)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a value, falling back to `default`
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up an integer; absent or non-numeric values give `default`
    ///
    /// The whole trimmed value must parse. Unlike a C-style integer cast, a
    /// numeric prefix such as `8080abc` is not read as 8080, and text with
    /// no digits gives `default` rather than 0.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Look up a flag
    ///
    /// Only `true`, `1`, `yes` and `on` (any case) read as true. Every other
    /// value, including `false` or `0`, returns `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        let truthy = self
            .get(key)
            .map(|value| TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t)))
            .unwrap_or(false);
        truthy || default
    }

    /// The full key/value mapping, optionally with sensitive values masked
    pub fn get_all(&self, mask_sensitive: bool) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(key, value)| {
                let shown = if mask_sensitive && is_sensitive_key(key) {
                    MASK.to_string()
                } else {
                    value.clone()
                };
                (key.clone(), shown)
            })
            .collect()
    }

    /// Key/value pairs in file order, optionally masked
    pub fn entries(&self, mask_sensitive: bool) -> Vec<(String, String)> {
        self.keys()
            .into_iter()
            .map(|key| {
                let value = if mask_sensitive && is_sensitive_key(key) {
                    MASK.to_string()
                } else {
                    self.get_or(key, "").to_string()
                };
                (key.to_string(), value)
            })
            .collect()
    }

    /// Assign a value
    ///
    /// Updates the first existing assignment of `key` in place; otherwise
    /// appends a new assignment, preceded by a `# comment` line if given.
    pub fn set(&mut self, key: &str, value: &str, comment: Option<&str>) -> &mut Self {
        match self.lines.iter().position(|line| line.assigns(key)) {
            Some(index) => {
                self.lines[index] = Line::assignment(key, value);
            }
            None => {
                if let Some(comment) = comment {
                    self.lines.push(Line::raw(format!("# {}", comment)));
                }
                self.lines.push(Line::assignment(key, value));
            }
        }

        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Assign several values in order
    pub fn set_many<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in values {
            self.set(key.as_ref(), value.as_ref(), None);
        }
        self
    }

    /// Remove a key and every assignment line for it
    pub fn unset(&mut self, key: &str) -> &mut Self {
        if self.values.remove(key).is_some() {
            self.lines.retain(|line| !line.assigns(key));
        }
        self
    }

    /// Serialize the document
    ///
    /// Lines are joined with `\n`, so the output has no trailing newline.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(Line::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the document back to its path
    ///
    /// The previous file contents, if any, are first copied to the backup path.
    pub fn save(&self) -> EnvResult<()> {
        create_backup(&self.path)?;
        write_file(&self.path, self.render().as_bytes())?;
        info!(path = %self.path.display(), keys = self.values.len(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup_path;
    use std::fs;
    use tempfile::TempDir;

    fn write_env(temp_dir: &TempDir, contents: &str) -> PathBuf {
        let path = temp_dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let doc = Document::open(temp_dir.path().join("missing.env")).unwrap();

        assert!(doc.is_empty());
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let doc = Document::open(write_env(&temp_dir, "")).unwrap();

        assert!(doc.get_all(false).is_empty());
    }

    #[test]
    fn test_load_parses_pairs() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_env(&temp_dir, "# Comment\nAPP_NAME=MyApp\n\nAPP_ENV=production");
        let doc = Document::open(path).unwrap();

        assert_eq!(doc.get("APP_NAME"), Some("MyApp"));
        assert_eq!(doc.get("APP_ENV"), Some("production"));
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.line_count(), 4);
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_env(&temp_dir, "# c\nA=1\nB=2\n");
        let mut doc = Document::new(path);

        doc.load().unwrap();
        let lines = doc.lines().to_vec();
        let values = doc.get_all(false);

        doc.load().unwrap();
        assert_eq!(doc.lines(), lines.as_slice());
        assert_eq!(doc.get_all(false), values);
    }

    #[test]
    fn test_get_with_default() {
        let doc = Document::from_contents(".env", "A=1");
        assert_eq!(doc.get_or("A", "x"), "1");
        assert_eq!(doc.get_or("MISSING_KEY", "default"), "default");
        assert_eq!(doc.get("MISSING_KEY"), None);
    }

    #[test]
    fn test_get_int() {
        let doc = Document::from_contents(".env", "DB_PORT=3306\nNAME=abc");
        assert_eq!(doc.get_int("DB_PORT", 0), 3306);
        assert_eq!(doc.get_int("PORT", 8080), 8080);
        assert_eq!(doc.get_int("NAME", 7), 7);
    }

    #[test]
    fn test_get_int_rejects_numeric_prefix() {
        let doc = Document::from_contents(".env", "PORT=8080abc
NEG= -42 ");
        assert_eq!(doc.get_int("PORT", 1), 1);
        assert_eq!(doc.get_int("NEG", 0), -42);
    }

    #[test]
    fn test_get_bool_truthy_values() {
        for value in ["true", "TRUE", "1", "yes", "YES", "on", "ON"] {
            let doc = Document::from_contents(".env", &format!("APP_DEBUG={}", value));
            assert!(doc.get_bool("APP_DEBUG", false), "failed for {}", value);
        }
    }

    #[test]
    fn test_get_bool_other_values_fall_back_to_default() {
        for value in ["false", "FALSE", "0", "no", "off", "maybe"] {
            let doc = Document::from_contents(".env", &format!("APP_DEBUG={}", value));
            assert!(!doc.get_bool("APP_DEBUG", false), "failed for {}", value);
            assert!(doc.get_bool("APP_DEBUG", true), "failed for {}", value);
        }
    }

    #[test]
    fn test_get_bool_missing_key() {
        let doc = Document::from_contents(".env", "");
        assert!(doc.get_bool("DEBUG", true));
        assert!(!doc.get_bool("DEBUG", false));
    }

    #[test]
    fn test_get_all_masks_sensitive_keys() {
        let doc = Document::from_contents(
            ".env",
            "API_KEY=secret123\nDB_PASSWORD=pass123\nauth_token=t\nAPP_NAME=MyApp",
        );
        let masked = doc.get_all(true);

        assert_eq!(masked["API_KEY"], MASK);
        assert_eq!(masked["DB_PASSWORD"], MASK);
        assert_eq!(masked["auth_token"], MASK);
        assert_eq!(masked["APP_NAME"], "MyApp");

        let plain = doc.get_all(false);
        assert_eq!(plain["API_KEY"], "secret123");
    }

    #[test]
    fn test_entries_follow_file_order() {
        let doc = Document::from_contents(".env", "Z=1\nA=2\nSECRET=s");
        assert_eq!(
            doc.entries(true),
            vec![
                ("Z".to_string(), "1".to_string()),
                ("A".to_string(), "2".to_string()),
                ("SECRET".to_string(), MASK.to_string()),
            ]
        );
    }

    #[test]
    fn test_set_existing_updates_in_place() {
        let mut doc = Document::from_contents(".env", "# c\nAPP_NAME=Old\nB=2");
        doc.set("APP_NAME", "New", Some("ignored"));

        assert_eq!(doc.get("APP_NAME"), Some("New"));
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.render(), "# c\nAPP_NAME=New\nB=2");
    }

    #[test]
    fn test_set_new_key_appends() {
        let mut doc = Document::from_contents(".env", "A=1");
        doc.set("B", "2", None);
        assert_eq!(doc.line_count(), 2);

        doc.set("C", "3", Some("Added later"));
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.render(), "A=1\nB=2\n# Added later\nC=3");
    }

    #[test]
    fn test_set_many() {
        let mut doc = Document::from_contents(".env", "");
        doc.set_many([("KEY1", "value1"), ("KEY2", "value2"), ("KEY3", "value3")]);

        assert_eq!(doc.get("KEY1"), Some("value1"));
        assert_eq!(doc.get("KEY2"), Some("value2"));
        assert_eq!(doc.get("KEY3"), Some("value3"));
        assert_eq!(doc.keys(), vec!["KEY1", "KEY2", "KEY3"]);
    }

    #[test]
    fn test_unset_removes_all_occurrences() {
        let mut doc = Document::from_contents(".env", "A=1\n# keep\nB=2\nA=3");
        doc.unset("A");

        assert_eq!(doc.get("A"), None);
        assert_eq!(doc.get_or("A", "fallback"), "fallback");
        assert_eq!(doc.get("B"), Some("2"));
        assert_eq!(doc.render(), "# keep\nB=2");
    }

    #[test]
    fn test_unset_missing_key_is_noop() {
        let mut doc = Document::from_contents(".env", "A=1");
        doc.unset("B");
        assert_eq!(doc.render(), "A=1");
    }

    #[test]
    fn test_duplicate_keys_first_wins() {
        let mut doc = Document::from_contents(".env", "A=first\nA=second");
        assert_eq!(doc.get("A"), Some("first"));
        assert_eq!(doc.keys(), vec!["A"]);

        doc.set("A", "updated", None);
        assert_eq!(doc.render(), "A=updated\nA=second");

        let reparsed = Document::from_contents(".env", &doc.render());
        assert_eq!(reparsed.get("A"), Some("updated"));
    }

    #[test]
    fn test_save_creates_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_env(&temp_dir, "ORIGINAL=value");
        let mut doc = Document::open(&path).unwrap();

        doc.set("NEW", "value", None);
        doc.save().unwrap();

        assert_eq!(
            fs::read_to_string(backup_path(&path)).unwrap(),
            "ORIGINAL=value"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "ORIGINAL=value\nNEW=value");
    }

    #[test]
    fn test_save_new_file_has_no_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut doc = Document::open(&path).unwrap();

        doc.set("A", "1", None);
        doc.save().unwrap();

        assert!(path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_save_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let content = "# Comment\nAPP_NAME=MyApp\n\n# Another comment\nAPP_ENV=local";
        let path = write_env(&temp_dir, content);
        let mut doc = Document::open(&path).unwrap();

        doc.set("APP_NAME", "NewApp", None);
        doc.save().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Comment\nAPP_NAME=NewApp\n\n# Another comment\nAPP_ENV=local"
        );
    }

    #[test]
    fn test_save_quotes_values_with_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut doc = Document::open(&path).unwrap();

        doc.set("APP_NAME", "My Application", None);
        doc.save().unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "APP_NAME=\"My Application\"");

        let reloaded = Document::open(&path).unwrap();
        assert_eq!(reloaded.get("APP_NAME"), Some("My Application"));
    }

    #[test]
    fn test_trailing_blank_lines_round_trip() {
        let doc = Document::from_contents(".env", "A=1\n\n");
        assert_eq!(doc.render(), "A=1\n\n");
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, [0x41, 0x3d, 0xff, 0xfe]).unwrap();

        let err = Document::open(&path).unwrap_err();
        assert!(matches!(err, EnvError::Io(_)));
    }

    #[test]
    fn test_is_sensitive_key() {
        assert!(is_sensitive_key("API_KEY"));
        assert!(is_sensitive_key("db_password"));
        assert!(is_sensitive_key("GITHUB_TOKEN"));
        assert!(is_sensitive_key("client_secret"));
        assert!(!is_sensitive_key("APP_NAME"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn line_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                "# [a-zA-Z0-9 ]{0,20}",
                ("[A-Z_][A-Z0-9_]{0,10}", "[a-zA-Z0-9_./:-]{0,8}( [a-zA-Z0-9]{1,6}){0,2}")
                    .prop_map(|(key, value)| format!("{}={}", key, value)),
            ]
        }

        proptest! {
            #[test]
            fn prop_render_reparses_identically(lines in proptest::collection::vec(line_strategy(), 0..20)) {
                let original = Document::from_contents(".env", &lines.join("\n"));
                let reparsed = Document::from_contents(".env", &original.render());

                prop_assert_eq!(reparsed.get_all(false), original.get_all(false));
                prop_assert_eq!(reparsed.lines(), original.lines());
            }
        }
    }
}

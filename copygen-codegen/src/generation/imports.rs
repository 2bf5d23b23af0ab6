//! Per-package import alias table.

use std::collections::{BTreeMap, HashSet};

use copygen_ir::is_keyword;

/// Assigns a unique local alias to every import path a package's generated
/// code needs.
///
/// Aliases are built from the path's segments, right to left, so the common
/// case (`k8s.io/apimachinery/pkg/runtime` → `runtime`) needs no rename and
/// collisions grow the alias leftwards (`metav1`).
///
/// # Example
///
/// ```
/// use copygen_codegen::generation::ImportAliasTable;
///
/// let mut imports = ImportAliasTable::new("v1");
/// assert_eq!(imports.need("k8s.io/apimachinery/pkg/runtime"), "runtime");
/// assert_eq!(imports.need("k8s.io/apimachinery/pkg/apis/meta/v1"), "metav1");
/// assert_eq!(
///     imports.import_specs(),
///     vec![
///         "metav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"".to_string(),
///         "\"k8s.io/apimachinery/pkg/runtime\"".to_string(),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportAliasTable {
    /// Import path -> alias, ordered by path for rendering.
    by_path: BTreeMap<String, String>,
    /// Every alias in use, including reserved names.
    taken: HashSet<String>,
}

impl ImportAliasTable {
    /// Create a table for a package, reserving the package's own name.
    pub fn new(package_name: &str) -> Self {
        let mut table = Self::default();
        table.reserve(package_name);
        table
    }

    /// Make `name` unavailable as an alias.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Return the alias for `import_path`, allocating one on first use.
    ///
    /// Everything up to and including a `/vendor/` segment is ignored.
    pub fn need(&mut self, import_path: &str) -> String {
        let path = strip_vendor(import_path);
        if let Some(alias) = self.by_path.get(path) {
            return alias.clone();
        }

        let alias = self.allocate(path);
        self.taken.insert(alias.clone());
        self.by_path.insert(path.to_string(), alias.clone());
        alias
    }

    /// Import lines for the file header, sorted by path.
    ///
    /// The alias is omitted when it equals the last path segment.
    pub fn import_specs(&self) -> Vec<String> {
        self.by_path
            .iter()
            .map(|(path, alias)| {
                let last = path.rsplit('/').next().unwrap_or(path);
                if alias == last {
                    format!("\"{}\"", path)
                } else {
                    format!("{} \"{}\"", alias, path)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    fn allocate(&self, path: &str) -> String {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).rev();
        let mut alias = String::new();

        loop {
            match segments.next() {
                Some(segment) => alias.insert_str(0, &sanitize(segment)),
                None => alias.push('x'),
            }
            if !alias.is_empty() && !self.taken.contains(&alias) && !is_keyword(&alias) {
                return alias;
            }
        }
    }
}

fn strip_vendor(path: &str) -> &str {
    match path.rfind("/vendor/") {
        Some(idx) => &path[idx + "/vendor/".len()..],
        None => path.strip_prefix("vendor/").unwrap_or(path),
    }
}

/// Drop leading digits and replace anything that can't appear in an
/// identifier with `_`.
fn sanitize(segment: &str) -> String {
    segment
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

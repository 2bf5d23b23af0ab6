//! The marker registry.

use std::collections::BTreeMap;

use crate::{MarkerDefinition, MarkerError, MarkerHelp, MarkerValues, Target, split_marker};

/// Registry of known markers.
///
/// Built once at startup and then shared by reference; nothing mutates it
/// once generation starts.
///
/// # Example
///
/// ```
/// use copygen_markers::{MarkerDefinition, MarkerHelp, MarkerRegistry, Shape, Target};
///
/// let def = MarkerDefinition::new("example:flag", Target::Package, Shape::Flag);
/// let mut registry = MarkerRegistry::new();
/// registry.register(def).unwrap();
/// registry.add_help(&def, MarkerHelp::simple("example", "toggles the example"));
///
/// assert_eq!(registry.describe("example:flag").unwrap().summary, "toggles the example");
/// assert!(registry.register(def).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    definitions: BTreeMap<(&'static str, Target), MarkerDefinition>,
    help: BTreeMap<(&'static str, Target), MarkerHelp>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::DuplicateDefinition`] if a definition with the
    /// same name is already registered for the same target.
    pub fn register(&mut self, definition: MarkerDefinition) -> Result<(), MarkerError> {
        let key = (definition.name, definition.target);
        if self.definitions.contains_key(&key) {
            return Err(MarkerError::DuplicateDefinition {
                name: definition.name.to_string(),
                target: definition.target,
            });
        }
        self.definitions.insert(key, definition);
        Ok(())
    }

    /// Register several definitions, stopping at the first collision.
    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = MarkerDefinition>,
    ) -> Result<(), MarkerError> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Attach help text to a registered definition.
    pub fn add_help(&mut self, definition: &MarkerDefinition, help: MarkerHelp) {
        self.help
            .insert((definition.name, definition.target), help);
    }

    /// Help text for a marker name, whatever its target.
    ///
    /// When a name is registered for several targets the package-level help
    /// is returned first.
    pub fn describe(&self, name: &str) -> Option<&MarkerHelp> {
        [Target::Package, Target::Type]
            .into_iter()
            .find_map(|target| self.describe_for(name, target))
    }

    /// Help text for a marker name on a specific target.
    pub fn describe_for(&self, name: &str, target: Target) -> Option<&MarkerHelp> {
        self.help
            .iter()
            .find(|((n, t), _)| *n == name && *t == target)
            .map(|(_, help)| help)
    }

    /// Look up the definition registered for `name` on `target`.
    pub fn lookup(&self, name: &str, target: Target) -> Option<&MarkerDefinition> {
        self.definitions
            .iter()
            .find(|((n, t), _)| *n == name && *t == target)
            .map(|(_, def)| def)
    }

    /// All definitions with their help text, ordered by name then target.
    pub fn definitions(&self) -> impl Iterator<Item = (&MarkerDefinition, Option<&MarkerHelp>)> {
        self.definitions
            .iter()
            .map(|(key, def)| (def, self.help.get(key)))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Parse the raw marker comments attached to one package or type.
    ///
    /// Markers not registered for `target` are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first payload that fails to parse.
    pub fn collect(&self, target: Target, raw: &[String]) -> Result<MarkerValues, MarkerError> {
        let mut values = MarkerValues::default();
        for comment in raw {
            let (name, payload) = split_marker(comment);
            let Some(definition) = self.lookup(name, target) else {
                continue;
            };
            values.push(definition.name, definition.parse(payload)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MarkerValue, Shape};

    const PKG: MarkerDefinition = MarkerDefinition::new("x:generate", Target::Package, Shape::Flag);
    const TYPE: MarkerDefinition = MarkerDefinition::new("x:generate", Target::Type, Shape::Flag);
    const IFACES: MarkerDefinition =
        MarkerDefinition::new("x:interfaces", Target::Type, Shape::String).legacy();

    fn registry() -> MarkerRegistry {
        let mut registry = MarkerRegistry::new();
        registry.register_all([PKG, TYPE, IFACES]).unwrap();
        registry
    }

    #[test]
    fn test_same_name_on_two_targets() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("x:generate", Target::Package), Some(&PKG));
        assert_eq!(registry.lookup("x:generate", Target::Type), Some(&TYPE));
        assert!(registry.lookup("x:interfaces", Target::Package).is_none());
    }

    #[test]
    fn test_duplicate_definition() {
        let mut registry = registry();
        let err = registry.register(TYPE).unwrap_err();
        assert_eq!(
            err,
            MarkerError::DuplicateDefinition {
                name: "x:generate".to_string(),
                target: Target::Type,
            }
        );
    }

    #[test]
    fn test_describe() {
        let mut registry = registry();
        registry.add_help(&TYPE, MarkerHelp::simple("object", "type help"));
        assert_eq!(registry.describe("x:generate").unwrap().summary, "type help");

        registry.add_help(&PKG, MarkerHelp::simple("object", "package help"));
        assert_eq!(
            registry.describe("x:generate").unwrap().summary,
            "package help"
        );
        assert_eq!(
            registry
                .describe_for("x:generate", Target::Type)
                .unwrap()
                .summary,
            "type help"
        );
        assert!(registry.describe("x:unknown").is_none());
    }

    #[test]
    fn test_collect_ignores_unknown_and_wrong_target() {
        let registry = registry();
        let raw = vec![
            "+x:generate=false".to_string(),
            "+x:interfaces=a.Object".to_string(),
            "+other:marker=1".to_string(),
        ];

        let pkg = registry.collect(Target::Package, &raw).unwrap();
        assert_eq!(pkg.get("x:generate"), Some(&MarkerValue::Flag(false)));
        assert!(pkg.get("x:interfaces").is_none());

        let ty = registry.collect(Target::Type, &raw).unwrap();
        assert_eq!(ty.all("x:interfaces").len(), 1);
    }

    #[test]
    fn test_collect_reports_bad_payload() {
        let registry = registry();
        let raw = vec!["+x:generate=maybe".to_string()];
        assert!(matches!(
            registry.collect(Target::Type, &raw),
            Err(MarkerError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_definitions_are_ordered() {
        let registry = registry();
        let names: Vec<_> = registry
            .definitions()
            .map(|(def, _)| (def.name, def.target))
            .collect();
        assert_eq!(
            names,
            vec![
                ("x:generate", Target::Package),
                ("x:generate", Target::Type),
                ("x:interfaces", Target::Type),
            ]
        );
    }
}

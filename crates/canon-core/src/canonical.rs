//! Canonical name generation and parsing.
//!
//! A canonical name is a deterministic string identifier encoding an
//! element's kind and its position in the model hierarchy, e.g.
//! `Container://Banking System.API`. Names are derived purely from the
//! model's structure and element names, so they are stable for a given model
//! shape and usable for lookups, diffing, and cross-references.
//!
//! The grammar is `<Kind>://` followed by sanitized name segments joined by
//! `.` (static structure) or `/` (deployment structure). Both separator
//! characters are stripped from raw names before embedding, which keeps
//! splitting a canonical name back into segments unambiguous.

use std::{collections::HashSet, fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    error::{NamingError, ParseNameError},
    model::{ContainerId, DeploymentNodeId, ElementKind, ElementRef, Model},
};

/// Separator between static structure segments (system, container,
/// component).
const STATIC_SEPARATOR: char = '.';

/// Separator between deployment structure segments (environment, deployment
/// nodes, hosted elements).
const DEPLOYMENT_SEPARATOR: char = '/';

const PERSON_PREFIX: &str = "Person://";
const SOFTWARE_SYSTEM_PREFIX: &str = "SoftwareSystem://";
const CONTAINER_PREFIX: &str = "Container://";
const COMPONENT_PREFIX: &str = "Component://";
const DEPLOYMENT_NODE_PREFIX: &str = "DeploymentNode://";
const INFRASTRUCTURE_NODE_PREFIX: &str = "InfrastructureNode://";
const SOFTWARE_SYSTEM_INSTANCE_PREFIX: &str = "SoftwareSystemInstance://";
const CONTAINER_INSTANCE_PREFIX: &str = "ContainerInstance://";

impl ElementKind {
    /// The fixed `<Kind>://` literal this kind's canonical names start with.
    pub fn prefix(&self) -> &'static str {
        match self {
            ElementKind::Person => PERSON_PREFIX,
            ElementKind::SoftwareSystem => SOFTWARE_SYSTEM_PREFIX,
            ElementKind::Container => CONTAINER_PREFIX,
            ElementKind::Component => COMPONENT_PREFIX,
            ElementKind::DeploymentNode => DEPLOYMENT_NODE_PREFIX,
            ElementKind::InfrastructureNode => INFRASTRUCTURE_NODE_PREFIX,
            ElementKind::SoftwareSystemInstance => SOFTWARE_SYSTEM_INSTANCE_PREFIX,
            ElementKind::ContainerInstance => CONTAINER_INSTANCE_PREFIX,
        }
    }
}

/// Remove the reserved separator characters (`.` and `/`) from a raw
/// element name so the name can be embedded as a single segment.
fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != STATIC_SEPARATOR && *c != DEPLOYMENT_SEPARATOR)
        .collect()
}

/// A generated canonical name: the element kind plus the full name string.
///
/// The string form is `<Kind>://` followed by sanitized hierarchy segments;
/// [`unqualified`](CanonicalName::unqualified) strips the prefix and
/// [`segments`](CanonicalName::segments) recovers the ordered segment list.
///
/// # Examples
///
/// ```
/// use canon_core::{CanonicalName, model::ElementKind};
///
/// let name: CanonicalName = "Container://Banking System.API".parse().unwrap();
/// assert_eq!(name.kind(), ElementKind::Container);
/// assert_eq!(name.unqualified(), "Banking System.API");
/// assert_eq!(name.segments(), vec!["Banking System", "API"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalName {
    kind: ElementKind,
    value: String,
}

impl CanonicalName {
    /// Get the kind of element this name identifies.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Get the full name string, including the `<Kind>://` prefix.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the name with its `<Kind>://` prefix stripped.
    pub fn unqualified(&self) -> &str {
        &self.value[self.kind.prefix().len()..]
    }

    /// Split the unqualified name into its ordered hierarchy segments.
    ///
    /// Sanitization guarantees that neither separator occurs inside a
    /// segment, so splitting on both `.` and `/` recovers the original
    /// segment list for every kind. Instance names keep their `[n]` suffix
    /// on the final segment.
    pub fn segments(&self) -> Vec<&str> {
        self.unqualified()
            .split([STATIC_SEPARATOR, DEPLOYMENT_SEPARATOR])
            .collect()
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for CanonicalName {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KINDS: [ElementKind; 8] = [
            ElementKind::Person,
            ElementKind::SoftwareSystem,
            ElementKind::Container,
            ElementKind::Component,
            ElementKind::DeploymentNode,
            ElementKind::InfrastructureNode,
            ElementKind::SoftwareSystemInstance,
            ElementKind::ContainerInstance,
        ];

        // No prefix is a prefix of another, so first match wins.
        for kind in KINDS {
            if s.starts_with(kind.prefix()) {
                return Ok(Self {
                    kind,
                    value: s.to_string(),
                });
            }
        }
        Err(ParseNameError {
            input: s.to_string(),
        })
    }
}

/// Generate the canonical name for `element`.
///
/// The model must be fully linked: every owner, parent, and instance
/// reference reachable from `element` has to resolve, and the deployment
/// parent chain has to terminate. A broken link yields
/// [`NamingError::DanglingReference`]; a deployment cycle yields
/// [`NamingError::HierarchyCycle`]. No partial name is produced on failure.
///
/// # Examples
///
/// ```
/// use canon_core::{canonical_name, model::{ElementRef, Model}};
///
/// let mut model = Model::new();
/// let system = model.add_software_system("Banking System");
/// let api = model.add_container("API", system);
///
/// let name = canonical_name(&model, ElementRef::Container(api)).unwrap();
/// assert_eq!(name.as_str(), "Container://Banking System.API");
/// ```
pub fn canonical_name(model: &Model, element: ElementRef) -> Result<CanonicalName, NamingError> {
    let kind = element.kind();
    let value = match element {
        ElementRef::Person(id) => {
            let person = model
                .person(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            format!("{}{}", PERSON_PREFIX, sanitize(person.name()))
        }
        ElementRef::SoftwareSystem(id) => {
            let system = model
                .software_system(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            format!("{}{}", SOFTWARE_SYSTEM_PREFIX, sanitize(system.name()))
        }
        ElementRef::Container(id) => {
            format!("{}{}", CONTAINER_PREFIX, container_path(model, id)?)
        }
        ElementRef::Component(id) => {
            let component = model
                .component(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            format!(
                "{}{}{}{}",
                COMPONENT_PREFIX,
                container_path(model, component.container())?,
                STATIC_SEPARATOR,
                sanitize(component.name())
            )
        }
        ElementRef::DeploymentNode(id) => {
            format!("{}{}", DEPLOYMENT_NODE_PREFIX, deployment_path(model, id)?)
        }
        ElementRef::InfrastructureNode(id) => {
            let node = model
                .infrastructure_node(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            format!(
                "{}{}{}{}",
                INFRASTRUCTURE_NODE_PREFIX,
                deployment_path(model, node.parent())?,
                DEPLOYMENT_SEPARATOR,
                sanitize(node.name())
            )
        }
        ElementRef::SoftwareSystemInstance(id) => {
            let instance = model
                .software_system_instance(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            let system = model.software_system(instance.software_system()).ok_or_else(|| {
                NamingError::dangling(
                    ElementKind::SoftwareSystem,
                    instance.software_system().index(),
                )
            })?;
            format!(
                "{}{}{}{}[{}]",
                SOFTWARE_SYSTEM_INSTANCE_PREFIX,
                deployment_path(model, instance.parent())?,
                DEPLOYMENT_SEPARATOR,
                sanitize(system.name()),
                instance.instance_id()
            )
        }
        ElementRef::ContainerInstance(id) => {
            let instance = model
                .container_instance(id)
                .ok_or_else(|| NamingError::dangling(kind, id.index()))?;
            format!(
                "{}{}{}{}[{}]",
                CONTAINER_INSTANCE_PREFIX,
                deployment_path(model, instance.parent())?,
                DEPLOYMENT_SEPARATOR,
                container_path(model, instance.container())?,
                instance.instance_id()
            )
        }
    };

    let canonical = CanonicalName { kind, value };
    trace!(canonical:%; "generated canonical name");
    Ok(canonical)
}

/// Build the unqualified static path for a container: sanitized owning
/// system name, the static separator, then the sanitized container name.
fn container_path(model: &Model, id: ContainerId) -> Result<String, NamingError> {
    let container = model
        .container(id)
        .ok_or_else(|| NamingError::dangling(ElementKind::Container, id.index()))?;
    let system = model.software_system(container.software_system()).ok_or_else(|| {
        NamingError::dangling(
            ElementKind::SoftwareSystem,
            container.software_system().index(),
        )
    })?;
    Ok(format!(
        "{}{}{}",
        sanitize(system.name()),
        STATIC_SEPARATOR,
        sanitize(container.name())
    ))
}

/// Build the unqualified deployment path for a node: its sanitized
/// environment, each ancestor from the immediate parent outward, then the
/// node's own sanitized name, joined by the deployment separator.
///
/// The parent chain is walked iteratively with a visited set, so a cycle in
/// the chain is rejected instead of looping forever.
fn deployment_path(model: &Model, id: DeploymentNodeId) -> Result<String, NamingError> {
    let node = model
        .deployment_node(id)
        .ok_or_else(|| NamingError::dangling(ElementKind::DeploymentNode, id.index()))?;

    let mut visited = HashSet::from([id]);
    let mut ancestors = Vec::new();
    let mut current = node.parent();
    while let Some(parent_id) = current {
        let parent = model
            .deployment_node(parent_id)
            .ok_or_else(|| NamingError::dangling(ElementKind::DeploymentNode, parent_id.index()))?;
        if !visited.insert(parent_id) {
            return Err(NamingError::HierarchyCycle {
                name: parent.name().to_string(),
            });
        }
        ancestors.push(sanitize(parent.name()));
        current = parent.parent();
    }

    let mut path = sanitize(node.environment());
    path.push(DEPLOYMENT_SEPARATOR);
    for ancestor in ancestors {
        path.push_str(&ancestor);
        path.push(DEPLOYMENT_SEPARATOR);
    }
    path.push_str(&sanitize(node.name()));
    Ok(path)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn raw_name_strategy() -> impl Strategy<Value = String> {
        // Raw display names: word characters, spaces, and the two reserved
        // separator characters that sanitization must remove.
        "[A-Za-z0-9 ./-]{1,24}"
    }

    fn chain_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(raw_name_strategy(), 1..6)
    }

    proptest! {
        #[test]
        fn sanitized_names_contain_no_separators(name in raw_name_strategy()) {
            let sanitized = sanitize(&name);
            prop_assert!(!sanitized.contains('.'));
            prop_assert!(!sanitized.contains('/'));
        }

        #[test]
        fn sanitize_is_identity_without_separators(name in "[A-Za-z0-9 -]{0,24}") {
            prop_assert_eq!(sanitize(&name), name);
        }

        #[test]
        fn component_segments_roundtrip(
            system in raw_name_strategy(),
            container in raw_name_strategy(),
            component in raw_name_strategy(),
        ) {
            let mut model = Model::new();
            let system_id = model.add_software_system(system.clone());
            let container_id = model.add_container(container.clone(), system_id);
            let component_id = model.add_component(component.clone(), container_id);

            let name = canonical_name(&model, ElementRef::Component(component_id)).unwrap();
            let segments: Vec<String> = name.segments().into_iter().map(str::to_string).collect();
            let expected = vec![sanitize(&system), sanitize(&container), sanitize(&component)];
            prop_assert_eq!(segments, expected);
        }

        #[test]
        fn deployment_segments_roundtrip(
            environment in raw_name_strategy(),
            chain in chain_strategy(),
        ) {
            let mut model = Model::new();
            let mut parent = None;
            let mut ids = Vec::new();
            for node_name in &chain {
                let id = model.add_deployment_node(node_name.clone(), environment.clone(), parent);
                ids.push(id);
                parent = Some(id);
            }

            let leaf = *ids.last().unwrap();
            let name = canonical_name(&model, ElementRef::DeploymentNode(leaf)).unwrap();
            let segments: Vec<String> = name.segments().into_iter().map(str::to_string).collect();

            // Environment first, ancestors from the immediate parent
            // outward, the leaf's own name last.
            let mut expected = vec![sanitize(&environment)];
            expected.extend(chain[..chain.len() - 1].iter().rev().map(|n| sanitize(n)));
            expected.push(sanitize(chain.last().unwrap()));
            prop_assert_eq!(segments, expected);
        }

        #[test]
        fn generated_names_parse_back(name in raw_name_strategy()) {
            let mut model = Model::new();
            let person = model.add_person(name);

            let generated = canonical_name(&model, ElementRef::Person(person)).unwrap();
            let parsed: CanonicalName = generated.as_str().parse().unwrap();
            prop_assert_eq!(parsed, generated);
        }

        #[test]
        fn distinct_paths_give_distinct_names(
            left in raw_name_strategy(),
            right in raw_name_strategy(),
        ) {
            prop_assume!(sanitize(&left) != sanitize(&right));

            let mut model = Model::new();
            let system = model.add_software_system("Shop");
            let a = model.add_container(left, system);
            let b = model.add_container(right, system);

            let name_a = canonical_name(&model, ElementRef::Container(a)).unwrap();
            let name_b = canonical_name(&model, ElementRef::Container(b)).unwrap();
            prop_assert_ne!(name_a, name_b);
        }
    }
}

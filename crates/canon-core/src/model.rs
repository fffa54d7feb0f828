//! Element types and the read-only model arena for C4-style architecture models.
//!
//! This module provides the structural side of the crate:
//!
//! - **Elements**: one struct per element kind ([`Person`], [`SoftwareSystem`],
//!   [`Container`], [`Component`], [`DeploymentNode`], [`InfrastructureNode`],
//!   [`SoftwareSystemInstance`], [`ContainerInstance`])
//! - **Handles**: `Copy` id newtypes addressing elements inside a [`Model`]
//! - **Dispatch**: the [`ElementRef`] sum type over all eight kinds
//!
//! Hierarchy links (a container's owning system, a deployment node's parent)
//! are stored as ids rather than references, so parent chains stay expressible
//! without shared ownership. The model is append-only: elements are added and
//! then only read.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// The raw arena index behind this handle.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

define_id!(
    /// Handle to a [`Person`] in a [`Model`].
    PersonId
);
define_id!(
    /// Handle to a [`SoftwareSystem`] in a [`Model`].
    SoftwareSystemId
);
define_id!(
    /// Handle to a [`Container`] in a [`Model`].
    ContainerId
);
define_id!(
    /// Handle to a [`Component`] in a [`Model`].
    ComponentId
);
define_id!(
    /// Handle to a [`DeploymentNode`] in a [`Model`].
    DeploymentNodeId
);
define_id!(
    /// Handle to an [`InfrastructureNode`] in a [`Model`].
    InfrastructureNodeId
);
define_id!(
    /// Handle to a [`SoftwareSystemInstance`] in a [`Model`].
    SoftwareSystemInstanceId
);
define_id!(
    /// Handle to a [`ContainerInstance`] in a [`Model`].
    ContainerInstanceId
);

/// A person who interacts with the modelled software.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    name: String,
}

impl Person {
    /// Get the person's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A top-level software system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareSystem {
    name: String,
}

impl SoftwareSystem {
    /// Get the system's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A deployable unit owned by a [`SoftwareSystem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    name: String,
    software_system: SoftwareSystemId,
}

impl Container {
    /// Get the container's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the owning software system.
    pub fn software_system(&self) -> SoftwareSystemId {
        self.software_system
    }
}

/// A code-level building block owned by a [`Container`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    name: String,
    container: ContainerId,
}

impl Component {
    /// Get the component's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the owning container.
    pub fn container(&self) -> ContainerId {
        self.container
    }
}

/// A node in the deployment hierarchy (a region, host, cluster, ...).
///
/// Deployment nodes form a tree per environment: each node carries its
/// environment name and an optional parent node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentNode {
    name: String,
    environment: String,
    parent: Option<DeploymentNodeId>,
}

impl DeploymentNode {
    /// Get the node's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the deployment environment this node belongs to (e.g. "Live").
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the parent deployment node, if this node is nested.
    pub fn parent(&self) -> Option<DeploymentNodeId> {
        self.parent
    }
}

/// Supporting infrastructure (a load balancer, firewall, ...) hosted on a
/// [`DeploymentNode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureNode {
    name: String,
    parent: DeploymentNodeId,
}

impl InfrastructureNode {
    /// Get the node's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the hosting deployment node.
    pub fn parent(&self) -> DeploymentNodeId {
        self.parent
    }
}

/// A deployed occurrence of a [`SoftwareSystem`] on a [`DeploymentNode`].
///
/// The `instance_id` disambiguates multiple instances of the same system
/// under the same deployment node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareSystemInstance {
    software_system: SoftwareSystemId,
    parent: DeploymentNodeId,
    instance_id: u32,
}

impl SoftwareSystemInstance {
    /// Get the software system this instance deploys.
    pub fn software_system(&self) -> SoftwareSystemId {
        self.software_system
    }

    /// Get the hosting deployment node.
    pub fn parent(&self) -> DeploymentNodeId {
        self.parent
    }

    /// Get the per-node instance number.
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }
}

/// A deployed occurrence of a [`Container`] on a [`DeploymentNode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInstance {
    container: ContainerId,
    parent: DeploymentNodeId,
    instance_id: u32,
}

impl ContainerInstance {
    /// Get the container this instance deploys.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Get the hosting deployment node.
    pub fn parent(&self) -> DeploymentNodeId {
        self.parent
    }

    /// Get the per-node instance number.
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }
}

/// The closed set of element kinds a model can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
    DeploymentNode,
    InfrastructureNode,
    SoftwareSystemInstance,
    ContainerInstance,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ElementKind::Person => "Person",
            ElementKind::SoftwareSystem => "SoftwareSystem",
            ElementKind::Container => "Container",
            ElementKind::Component => "Component",
            ElementKind::DeploymentNode => "DeploymentNode",
            ElementKind::InfrastructureNode => "InfrastructureNode",
            ElementKind::SoftwareSystemInstance => "SoftwareSystemInstance",
            ElementKind::ContainerInstance => "ContainerInstance",
        };
        write!(f, "{}", label)
    }
}

/// A typed reference to any element in a [`Model`].
///
/// This is the dispatch point for [`canonical_name`](crate::canonical_name):
/// one variant per element kind, matching the generation rule for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    Person(PersonId),
    SoftwareSystem(SoftwareSystemId),
    Container(ContainerId),
    Component(ComponentId),
    DeploymentNode(DeploymentNodeId),
    InfrastructureNode(InfrastructureNodeId),
    SoftwareSystemInstance(SoftwareSystemInstanceId),
    ContainerInstance(ContainerInstanceId),
}

impl ElementRef {
    /// Get the kind tag for this reference.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Person(_) => ElementKind::Person,
            ElementRef::SoftwareSystem(_) => ElementKind::SoftwareSystem,
            ElementRef::Container(_) => ElementKind::Container,
            ElementRef::Component(_) => ElementKind::Component,
            ElementRef::DeploymentNode(_) => ElementKind::DeploymentNode,
            ElementRef::InfrastructureNode(_) => ElementKind::InfrastructureNode,
            ElementRef::SoftwareSystemInstance(_) => ElementKind::SoftwareSystemInstance,
            ElementRef::ContainerInstance(_) => ElementKind::ContainerInstance,
        }
    }
}

/// An append-only arena of architecture model elements.
///
/// Elements are added through the `add_*` constructors, which return typed
/// handles, and read back through the per-kind getters. Hierarchy links are
/// plain ids, so a handle minted by one model is meaningless in another;
/// getters return `None` for such dangling ids rather than panicking.
///
/// # Examples
///
/// ```
/// use canon_core::model::Model;
///
/// let mut model = Model::new();
/// let system = model.add_software_system("Banking System");
/// let api = model.add_container("API", system);
///
/// assert_eq!(model.container(api).unwrap().name(), "API");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    people: Vec<Person>,
    software_systems: Vec<SoftwareSystem>,
    containers: Vec<Container>,
    components: Vec<Component>,
    deployment_nodes: Vec<DeploymentNode>,
    infrastructure_nodes: Vec<InfrastructureNode>,
    software_system_instances: Vec<SoftwareSystemInstance>,
    container_instances: Vec<ContainerInstance>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person.
    pub fn add_person(&mut self, name: impl Into<String>) -> PersonId {
        self.people.push(Person { name: name.into() });
        PersonId(self.people.len() - 1)
    }

    /// Add a software system.
    pub fn add_software_system(&mut self, name: impl Into<String>) -> SoftwareSystemId {
        self.software_systems.push(SoftwareSystem { name: name.into() });
        SoftwareSystemId(self.software_systems.len() - 1)
    }

    /// Add a container owned by `software_system`.
    pub fn add_container(
        &mut self,
        name: impl Into<String>,
        software_system: SoftwareSystemId,
    ) -> ContainerId {
        self.containers.push(Container {
            name: name.into(),
            software_system,
        });
        ContainerId(self.containers.len() - 1)
    }

    /// Add a component owned by `container`.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        container: ContainerId,
    ) -> ComponentId {
        self.components.push(Component {
            name: name.into(),
            container,
        });
        ComponentId(self.components.len() - 1)
    }

    /// Add a deployment node in `environment`, optionally nested under
    /// `parent`.
    pub fn add_deployment_node(
        &mut self,
        name: impl Into<String>,
        environment: impl Into<String>,
        parent: Option<DeploymentNodeId>,
    ) -> DeploymentNodeId {
        self.deployment_nodes.push(DeploymentNode {
            name: name.into(),
            environment: environment.into(),
            parent,
        });
        DeploymentNodeId(self.deployment_nodes.len() - 1)
    }

    /// Move a deployment node under a new parent (or to the root with
    /// `None`).
    ///
    /// Returns `false` if `node` is not in this model. Re-parenting can
    /// introduce a cycle; name generation detects and rejects cycles at
    /// traversal time rather than here.
    pub fn set_deployment_parent(
        &mut self,
        node: DeploymentNodeId,
        parent: Option<DeploymentNodeId>,
    ) -> bool {
        match self.deployment_nodes.get_mut(node.0) {
            Some(n) => {
                n.parent = parent;
                true
            }
            None => false,
        }
    }

    /// Add an infrastructure node hosted on `parent`.
    pub fn add_infrastructure_node(
        &mut self,
        name: impl Into<String>,
        parent: DeploymentNodeId,
    ) -> InfrastructureNodeId {
        self.infrastructure_nodes.push(InfrastructureNode {
            name: name.into(),
            parent,
        });
        InfrastructureNodeId(self.infrastructure_nodes.len() - 1)
    }

    /// Add an instance of `software_system` deployed on `parent`.
    pub fn add_software_system_instance(
        &mut self,
        software_system: SoftwareSystemId,
        parent: DeploymentNodeId,
        instance_id: u32,
    ) -> SoftwareSystemInstanceId {
        self.software_system_instances.push(SoftwareSystemInstance {
            software_system,
            parent,
            instance_id,
        });
        SoftwareSystemInstanceId(self.software_system_instances.len() - 1)
    }

    /// Add an instance of `container` deployed on `parent`.
    pub fn add_container_instance(
        &mut self,
        container: ContainerId,
        parent: DeploymentNodeId,
        instance_id: u32,
    ) -> ContainerInstanceId {
        self.container_instances.push(ContainerInstance {
            container,
            parent,
            instance_id,
        });
        ContainerInstanceId(self.container_instances.len() - 1)
    }

    /// Look up a person.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    /// Look up a software system.
    pub fn software_system(&self, id: SoftwareSystemId) -> Option<&SoftwareSystem> {
        self.software_systems.get(id.0)
    }

    /// Look up a container.
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0)
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    /// Look up a deployment node.
    pub fn deployment_node(&self, id: DeploymentNodeId) -> Option<&DeploymentNode> {
        self.deployment_nodes.get(id.0)
    }

    /// Look up an infrastructure node.
    pub fn infrastructure_node(&self, id: InfrastructureNodeId) -> Option<&InfrastructureNode> {
        self.infrastructure_nodes.get(id.0)
    }

    /// Look up a software system instance.
    pub fn software_system_instance(
        &self,
        id: SoftwareSystemInstanceId,
    ) -> Option<&SoftwareSystemInstance> {
        self.software_system_instances.get(id.0)
    }

    /// Look up a container instance.
    pub fn container_instance(&self, id: ContainerInstanceId) -> Option<&ContainerInstance> {
        self.container_instances.get(id.0)
    }
}

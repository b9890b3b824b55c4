use crate::workflow::{PortKind, WorkflowNode};
use ahash::AHashMap;

mod builtin;

/// One declared input slot on a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDecl {
    pub kind: PortKind,
    pub required: bool,
}

impl PortDecl {
    pub fn required(kind: PortKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }

    pub fn optional(kind: PortKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }
}

/// One output slot of a resolved node instance: its kind and branch index.
///
/// Fixed-output types always yield the same list; branch-bearing types
/// derive the branch count from the node's own parameters, so the list is
/// per-instance, not per-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPort {
    pub kind: PortKind,
    pub branch: u32,
}

impl OutputPort {
    pub fn new(kind: PortKind, branch: u32) -> Self {
        Self { kind, branch }
    }

    pub fn main(branch: u32) -> Self {
        Self::new(PortKind::Main, branch)
    }
}

/// Defines the contract for a registered node type: its port shape and how
/// many output branches a concrete node configuration implies.
///
/// Implement this to register plugin types with
/// [`NodeTypeRegistryBuilder::with_node_type`]; the validator never needs to
/// change when new types are added.
pub trait NodeType: Send + Sync {
    fn type_id(&self) -> &str;
    fn version(&self) -> u32;

    /// Declared input slots, in slot order.
    fn input_ports(&self) -> Vec<PortDecl>;

    /// Output ports for a node instance carrying `parameters`. For
    /// conditional/selector types the branch count follows the configured
    /// case list of that specific node.
    fn output_ports(&self, parameters: &serde_json::Value) -> Vec<OutputPort>;

    /// Whether this type is a workflow entry point.
    fn is_trigger(&self) -> bool {
        false
    }

    /// Runtime context this type makes available to downstream nodes
    /// (e.g. `"request"` for a webhook's incoming payload).
    fn provides_context(&self) -> Option<&str> {
        None
    }
}

pub(crate) type TypeMap = AHashMap<String, AHashMap<u32, Box<dyn NodeType>>>;

/// Lookup table from `(type_id, version)` to a registered [`NodeType`].
///
/// The catalog is intentionally open: looking up an unregistered type is not
/// inherently fatal. [`ValidationOptions`](crate::validator::ValidationOptions)
/// decides whether an unknown type downgrades to a warning (the default) or
/// escalates to an error.
pub struct NodeTypeRegistry {
    types: TypeMap,
}

impl NodeTypeRegistry {
    /// Starts a builder pre-loaded with the built-in catalog.
    pub fn builder() -> NodeTypeRegistryBuilder {
        let mut types = TypeMap::new();
        builtin::register_builtin_types(&mut types);
        NodeTypeRegistryBuilder { types }
    }

    /// A registry with no types at all. Mostly useful for tests and for
    /// callers that supply a fully custom catalog.
    pub fn empty() -> Self {
        Self {
            types: TypeMap::new(),
        }
    }

    pub fn lookup(&self, type_id: &str, version: u32) -> Option<&dyn NodeType> {
        self.types.get(type_id)?.get(&version).map(|t| t.as_ref())
    }

    pub fn contains(&self, type_id: &str, version: u32) -> bool {
        self.lookup(type_id, version).is_some()
    }

    /// Resolves the type of a concrete node.
    pub fn resolve(&self, node: &WorkflowNode) -> Option<&dyn NodeType> {
        self.lookup(&node.type_id, node.type_version)
    }

    pub fn len(&self) -> usize {
        self.types.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builder for assembling a [`NodeTypeRegistry`] from the built-in catalog,
/// plugin types, and aliases for foreign type identifiers.
pub struct NodeTypeRegistryBuilder {
    types: TypeMap,
}

impl NodeTypeRegistryBuilder {
    /// Registers a plugin node type, replacing any earlier registration of
    /// the same `(type_id, version)`.
    pub fn with_node_type(mut self, node_type: Box<dyn NodeType>) -> Self {
        insert(&mut self.types, node_type);
        self
    }

    /// Registers `user_type_id` as an alias for a built-in type, so
    /// documents produced by other tools resolve against the built-in port
    /// shape. Unknown built-in names are ignored.
    pub fn with_alias(mut self, user_type_id: &str, builtin_type_id: &str, version: u32) -> Self {
        if let Some(inner) = builtin::create_builtin(builtin_type_id, version) {
            insert(
                &mut self.types,
                Box::new(AliasedNodeType {
                    alias: user_type_id.to_string(),
                    inner,
                }),
            );
        }
        self
    }

    pub fn build(self) -> NodeTypeRegistry {
        NodeTypeRegistry { types: self.types }
    }
}

fn insert(types: &mut TypeMap, node_type: Box<dyn NodeType>) {
    let type_id = node_type.type_id().to_string();
    let version = node_type.version();
    types.entry(type_id).or_default().insert(version, node_type);
}

/// Wraps a built-in type under a foreign identifier.
struct AliasedNodeType {
    alias: String,
    inner: Box<dyn NodeType>,
}

impl NodeType for AliasedNodeType {
    fn type_id(&self) -> &str {
        &self.alias
    }

    fn version(&self) -> u32 {
        self.inner.version()
    }

    fn input_ports(&self) -> Vec<PortDecl> {
        self.inner.input_ports()
    }

    fn output_ports(&self, parameters: &serde_json::Value) -> Vec<OutputPort> {
        self.inner.output_ports(parameters)
    }

    fn is_trigger(&self) -> bool {
        self.inner.is_trigger()
    }

    fn provides_context(&self) -> Option<&str> {
        self.inner.provides_context()
    }
}

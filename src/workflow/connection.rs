use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of port kinds a node can expose.
///
/// `Main` carries item data between processing nodes; every other kind wires
/// an auxiliary capability (a model, a tool, a memory store, ...) into a node
/// that consumes it. Kinds never coerce into one another: a connection is
/// only legal between ports whose kinds the compatibility table accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortKind {
    Main,
    Model,
    Tool,
    Memory,
    OutputParser,
    Embedding,
    VectorStore,
    Document,
    TextSplitter,
}

impl PortKind {
    pub const COUNT: usize = 9;

    pub const ALL: [PortKind; PortKind::COUNT] = [
        PortKind::Main,
        PortKind::Model,
        PortKind::Tool,
        PortKind::Memory,
        PortKind::OutputParser,
        PortKind::Embedding,
        PortKind::VectorStore,
        PortKind::Document,
        PortKind::TextSplitter,
    ];

    pub fn is_main(self) -> bool {
        self == PortKind::Main
    }

    /// Whether an output of this kind may feed an input of `target`.
    ///
    /// Expressed as a table so that a future kind is a data change here, not
    /// a code change in the validator.
    pub fn accepts(self, target: PortKind) -> bool {
        COMPATIBILITY[self as usize][target as usize]
    }
}

const fn identity_table() -> [[bool; PortKind::COUNT]; PortKind::COUNT] {
    let mut table = [[false; PortKind::COUNT]; PortKind::COUNT];
    let mut i = 0;
    while i < PortKind::COUNT {
        table[i][i] = true;
        i += 1;
    }
    table
}

/// Kind-compatibility table. Currently strict: a kind only accepts itself.
const COMPATIBILITY: [[bool; PortKind::COUNT]; PortKind::COUNT] = identity_table();

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortKind::Main => "main",
            PortKind::Model => "model",
            PortKind::Tool => "tool",
            PortKind::Memory => "memory",
            PortKind::OutputParser => "outputParser",
            PortKind::Embedding => "embedding",
            PortKind::VectorStore => "vectorStore",
            PortKind::Document => "document",
            PortKind::TextSplitter => "textSplitter",
        };
        write!(f, "{}", name)
    }
}

/// The receiving end of one connection edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    /// Target node, addressed by its workflow-unique name.
    pub node: String,
    #[serde(rename = "type")]
    pub kind: PortKind,
    /// Which declared input slot of `kind` on the target receives the edge.
    pub index: u32,
}

impl ConnectionTarget {
    pub fn new(node: impl Into<String>, kind: PortKind, index: u32) -> Self {
        Self {
            node: node.into(),
            kind,
            index,
        }
    }

    pub fn main(node: impl Into<String>) -> Self {
        Self::new(node, PortKind::Main, 0)
    }
}

/// The parallel connection arrays of one `(source node, output kind)` group.
///
/// Slot `i` holds the edges leaving branch `i` of the source output; an empty
/// slot is a configured branch with nothing attached, which is legal. The
/// slot count itself must match the branch count the node's configuration
/// implies, which the validator checks against the type registry.
pub type BranchSlots = Vec<Vec<ConnectionTarget>>;

/// All connections of a workflow, keyed by source node name, then output
/// port kind. `BTreeMap` keeps the canonical document ordering stable so
/// serialized diffs only reflect semantic changes.
pub type ConnectionMap = BTreeMap<String, BTreeMap<PortKind, BranchSlots>>;

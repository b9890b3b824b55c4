//! The built-in node type catalog.
//!
//! Fixed-shape types are declared through `define_fixed_node_types!`; the
//! branch-bearing `switch` type is written by hand because its output list
//! depends on the parameters of each concrete node.

use super::{NodeType, OutputPort, PortDecl, TypeMap};
use crate::workflow::PortKind;

/// Master macro declaring a fixed-shape node type per entry, plus bulk
/// registration and by-name construction over all of them.
macro_rules! define_fixed_node_types {
    ( $( ($struct_name:ident, $type_id:expr, $version:expr, $trigger:expr, $context:expr,
          [ $($input:expr),* ], [ $($output:expr),* ]) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl NodeType for $struct_name {
                fn type_id(&self) -> &str { $type_id }
                fn version(&self) -> u32 { $version }
                fn is_trigger(&self) -> bool { $trigger }
                fn provides_context(&self) -> Option<&str> { $context }
                fn input_ports(&self) -> Vec<PortDecl> { vec![ $($input),* ] }
                fn output_ports(&self, _parameters: &serde_json::Value) -> Vec<OutputPort> {
                    vec![ $($output),* ]
                }
            }
        )*

        fn register_fixed_types(types: &mut TypeMap) {
            $(
                types
                    .entry($type_id.to_string())
                    .or_default()
                    .insert($version, Box::new($struct_name) as Box<dyn NodeType>);
            )*
        }

        fn create_fixed(type_id: &str, version: u32) -> Option<Box<dyn NodeType>> {
            $(
                if type_id == $type_id && version == $version {
                    return Some(Box::new($struct_name));
                }
            )*
            None
        }
    };
}

define_fixed_node_types! {
    // Triggers (workflow entry points)
    (ManualTriggerType, "manualTrigger", 1, true, None, [], [OutputPort::main(0)]),
    (ScheduleTriggerType, "scheduleTrigger", 1, true, None, [], [OutputPort::main(0)]),
    (WebhookType, "webhook", 1, true, Some("request"), [], [OutputPort::main(0)]),

    // Processing and action types
    (HttpRequestType, "httpRequest", 1, false, None,
        [PortDecl::required(PortKind::Main)], [OutputPort::main(0)]),
    (SetType, "set", 1, false, None,
        [PortDecl::required(PortKind::Main)], [OutputPort::main(0)]),
    (CodeType, "code", 1, false, None,
        [PortDecl::required(PortKind::Main)], [OutputPort::main(0)]),
    (NoOpType, "noOp", 1, false, None,
        [PortDecl::required(PortKind::Main)], [OutputPort::main(0)]),
    (FilterType, "filter", 1, false, None,
        [PortDecl::required(PortKind::Main)], [OutputPort::main(0)]),
    (MergeType, "merge", 1, false, None,
        [PortDecl::required(PortKind::Main), PortDecl::required(PortKind::Main)],
        [OutputPort::main(0)]),

    // Binary conditional: always exactly two main branches (true, false)
    (IfType, "if", 1, false, None,
        [PortDecl::required(PortKind::Main)],
        [OutputPort::main(0), OutputPort::main(1)]),

    // AI-capability types
    (AgentType, "agent", 1, false, None,
        [PortDecl::required(PortKind::Main), PortDecl::required(PortKind::Model),
         PortDecl::optional(PortKind::Tool), PortDecl::optional(PortKind::Memory),
         PortDecl::optional(PortKind::OutputParser)],
        [OutputPort::main(0)]),
    (ChatModelType, "chatModel", 1, false, None,
        [], [OutputPort::new(PortKind::Model, 0)]),
    (HttpToolType, "httpTool", 1, false, None,
        [], [OutputPort::new(PortKind::Tool, 0)]),
    (BufferMemoryType, "bufferMemory", 1, false, None,
        [], [OutputPort::new(PortKind::Memory, 0)]),
    (StructuredOutputParserType, "structuredOutputParser", 1, false, None,
        [], [OutputPort::new(PortKind::OutputParser, 0)]),
    (EmbeddingsType, "embeddings", 1, false, None,
        [], [OutputPort::new(PortKind::Embedding, 0)]),
    (TextSplitterType, "textSplitter", 1, false, None,
        [], [OutputPort::new(PortKind::TextSplitter, 0)]),
    (DocumentLoaderType, "documentLoader", 1, false, None,
        [PortDecl::optional(PortKind::TextSplitter)],
        [OutputPort::new(PortKind::Document, 0)]),
    (VectorStoreType, "vectorStore", 1, false, None,
        [PortDecl::required(PortKind::Embedding), PortDecl::optional(PortKind::Document)],
        [OutputPort::new(PortKind::VectorStore, 0)]),
}

/// Multi-branch selector. One main branch per configured case, plus one more
/// when `fallbackOutput` is set, so the branch count tracks each node's own
/// configuration rather than the type.
struct SwitchType;

impl NodeType for SwitchType {
    fn type_id(&self) -> &str {
        "switch"
    }

    fn version(&self) -> u32 {
        1
    }

    fn input_ports(&self) -> Vec<PortDecl> {
        vec![PortDecl::required(PortKind::Main)]
    }

    fn output_ports(&self, parameters: &serde_json::Value) -> Vec<OutputPort> {
        let cases = parameters
            .get("cases")
            .and_then(|v| v.as_array())
            .map(|cases| cases.len())
            .unwrap_or(1);
        let fallback = parameters
            .get("fallbackOutput")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        (0..cases + usize::from(fallback))
            .map(|branch| OutputPort::main(branch as u32))
            .collect()
    }
}

pub(super) fn register_builtin_types(types: &mut TypeMap) {
    register_fixed_types(types);
    types
        .entry("switch".to_string())
        .or_default()
        .insert(1, Box::new(SwitchType) as Box<dyn NodeType>);
}

pub(super) fn create_builtin(type_id: &str, version: u32) -> Option<Box<dyn NodeType>> {
    if type_id == "switch" && version == 1 {
        return Some(Box::new(SwitchType));
    }
    create_fixed(type_id, version)
}

use uuid::Uuid;

use scenebridge_shared::{ContextMenuAction, ContextMenuRequest, FrameNumber, NodeMessage, ShowAs};

use crate::session::ExecutionState;

/// Everything the remote graph can tell the bridge
#[derive(Clone, Debug, PartialEq)]
pub enum InboundEvent {
    Connected { app_node: NodeMessage },
    Disconnected,
    NodeSelected { node_id: Uuid },
    NodeValueChanged {
        pin_id: Uuid,
        data: Vec<u8>,
        reset: bool,
        frame: FrameNumber,
    },
    PinShowAsChanged { pin_id: Uuid, show_as: ShowAs },
    FunctionCalled { node_id: Uuid, function: NodeMessage },
    ContextMenuRequested(ContextMenuRequest),
    ContextMenuCommand(ContextMenuAction),
    /// The remote side pushes a saved graph for the bridge to adopt
    NodeImported { app_node: NodeMessage },
    /// The bridge's node was deleted on the remote side
    NodeRemoved,
    StateChanged(ExecutionState),
    LoadNodesOnPaths { paths: Vec<String> },
}

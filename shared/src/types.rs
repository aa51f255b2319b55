use serde::{Deserialize, Serialize};

/// Frame counter of the simulation context
pub type FrameNumber = u64;

/// Opaque handle to an object of the live model. Handles may go stale at any
/// frame boundary, so they are never held across frames without revalidation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ObjectKey(u64);

impl ObjectKey {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// How a pin is presented on the remote node
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ShowAs {
    None,
    InputPin,
    OutputPin,
    Property,
}

/// The set of `ShowAs` modes a pin may legally be presented as
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum CanShowAs {
    InputPinOnly,
    OutputPinOnly,
    InputOutput,
    PropertyOnly,
    InputPinOrProperty,
    OutputPinOrProperty,
    InputOutputProperty,
}

impl CanShowAs {
    pub fn allows(&self, show_as: ShowAs) -> bool {
        match show_as {
            ShowAs::None => false,
            ShowAs::InputPin => matches!(
                self,
                Self::InputPinOnly
                    | Self::InputOutput
                    | Self::InputPinOrProperty
                    | Self::InputOutputProperty
            ),
            ShowAs::OutputPin => matches!(
                self,
                Self::OutputPinOnly
                    | Self::InputOutput
                    | Self::OutputPinOrProperty
                    | Self::InputOutputProperty
            ),
            ShowAs::Property => matches!(
                self,
                Self::PropertyOnly
                    | Self::InputPinOrProperty
                    | Self::OutputPinOrProperty
                    | Self::InputOutputProperty
            ),
        }
    }
}

//! Change notifications
//!
//! Observers run synchronously once a mutating call has finished, one event
//! per call. Writes that change nothing notify nobody.

use crate::control::ControlId;

/// What a mutating call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A set or patch changed at least one leaf below `control`
    ValueChanged { control: ControlId },
    /// An element was appended to a sequence
    Pushed {
        sequence: ControlId,
        index: usize,
        element: ControlId,
    },
    /// An element was removed from a sequence
    Removed {
        sequence: ControlId,
        index: usize,
        element: ControlId,
    },
    /// A subtree was restored to its initial snapshot
    Reset { control: ControlId },
    /// A control was flagged dirty explicitly
    MarkedDirty { control: ControlId },
    /// A control was flagged touched
    Touched { control: ControlId },
}

impl FormEvent {
    /// The control the call was addressed to
    pub fn target(&self) -> ControlId {
        match self {
            FormEvent::ValueChanged { control }
            | FormEvent::Reset { control }
            | FormEvent::MarkedDirty { control }
            | FormEvent::Touched { control } => *control,
            FormEvent::Pushed { sequence, .. } | FormEvent::Removed { sequence, .. } => *sequence,
        }
    }
}

/// Token returned by [`crate::Form::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Observer = Box<dyn FnMut(&FormEvent) + Send>;

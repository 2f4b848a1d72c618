use iced::widget::scrollable::RelativeOffset;
use neurobridge_core::Variant;

mod appearance;
mod core;
mod loading;
mod runtime;
mod scroll;
#[cfg(test)]
mod testing;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::app) enum Effect {
    StartFrameLoad(Variant),
    SnapScroll(RelativeOffset),
    /// Ask the runtime for the real window size; the configured size is only
    /// a request.
    QueryWindowSize,
}

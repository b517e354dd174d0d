//! Mutually exclusive interaction sessions.

use crate::drag::DragSession;
use crate::measure::MeasureSession;

/// At most one session runs at a time: starting one while another is live
/// is rejected at the engine level, and mode switches tear the live one
/// down first.
#[derive(Debug, Clone, Default)]
pub enum ActiveSession {
    #[default]
    Idle,
    Drag(DragSession),
    Measure(MeasureSession),
}

impl ActiveSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveSession::Idle)
    }
}

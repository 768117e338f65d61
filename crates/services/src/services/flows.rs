//! Composed timeline view consumed by the UI.

use domain::models::document::{CommercialFlow, DocumentKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::advisor::{NextAction, next_action};
use super::timeline::{StageView, sequence};

/// Everything the flow timeline widget renders: the four stage states and
/// the optional next-action button.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct FlowTimeline {
    pub stages: Vec<StageView>,
    pub next_action: Option<NextAction>,
}

pub fn derive_timeline(flow: &CommercialFlow, current: Option<DocumentKind>) -> FlowTimeline {
    FlowTimeline {
        stages: sequence(flow, current).into_iter().collect(),
        next_action: next_action(flow),
    }
}

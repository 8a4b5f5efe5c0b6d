use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// Input device that produced the latest pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Where the tooltip guide line is drawn horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuideAnchor {
    /// Guide follows the raw pointer x.
    #[default]
    Pointer,
    /// Guide snaps to the resolved sample's x.
    DataPoint,
}

/// Sample resolved for the tooltip plus its plot-relative placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPoint {
    pub index: usize,
    pub point: DataPoint,
    /// Guide line x, per the active [`GuideAnchor`].
    pub x: f64,
    /// Price scale applied to `point.price`.
    pub y: f64,
    /// Time scale applied to `point.time`.
    pub point_x: f64,
}

/// Tooltip visibility state machine.
///
/// `Hidden --move--> Visible`, `Visible --move--> Visible` with a fresh
/// payload, and `leave` always returns to `Hidden`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible(TooltipPoint),
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    #[must_use]
    pub fn payload(&self) -> Option<&TooltipPoint> {
        match self {
            Self::Hidden => None,
            Self::Visible(payload) => Some(payload),
        }
    }

    #[must_use]
    pub fn active_point(&self) -> Option<&DataPoint> {
        self.payload().map(|payload| &payload.point)
    }

    #[must_use]
    pub fn pixel_x(&self) -> Option<f64> {
        self.payload().map(|payload| payload.x)
    }

    #[must_use]
    pub fn pixel_y(&self) -> Option<f64> {
        self.payload().map(|payload| payload.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    pointer: Option<(f64, f64)>,
    pointer_source: Option<PointerSource>,
    tooltip: TooltipState,
}

impl InteractionState {
    /// Last pointer position in canvas pixels, if the pointer is inside.
    #[must_use]
    pub fn pointer(self) -> Option<(f64, f64)> {
        self.pointer
    }

    #[must_use]
    pub fn pointer_source(self) -> Option<PointerSource> {
        self.pointer_source
    }

    #[must_use]
    pub fn tooltip(self) -> TooltipState {
        self.tooltip
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, source: PointerSource) {
        self.pointer = Some((x, y));
        self.pointer_source = Some(source);
    }

    /// Publishes the result of one pointer resolution.
    ///
    /// `None` means nothing could be resolved, which hides the tooltip.
    pub fn set_tooltip(&mut self, resolved: Option<TooltipPoint>) {
        self.tooltip = match resolved {
            Some(payload) => TooltipState::Visible(payload),
            None => TooltipState::Hidden,
        };
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.pointer_source = None;
        self.tooltip = TooltipState::Hidden;
    }

    pub fn clear_tooltip(&mut self) {
        self.tooltip = TooltipState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionState, PointerSource, TooltipPoint, TooltipState};
    use crate::core::DataPoint;

    fn payload() -> TooltipPoint {
        TooltipPoint {
            index: 1,
            point: DataPoint::parse("2021-01-02", 110.0).expect("point"),
            x: 50.0,
            y: 10.0,
            point_x: 50.0,
        }
    }

    #[test]
    fn starts_hidden() {
        let state = InteractionState::default();
        assert_eq!(state.tooltip(), TooltipState::Hidden);
        assert_eq!(state.pointer(), None);
    }

    #[test]
    fn leave_hides_visible_tooltip_and_forgets_pointer() {
        let mut state = InteractionState::default();
        state.on_pointer_move(50.0, 20.0, PointerSource::Touch);
        state.set_tooltip(Some(payload()));
        assert!(state.tooltip().is_visible());

        state.on_pointer_leave();
        assert_eq!(state.tooltip(), TooltipState::Hidden);
        assert_eq!(state.pointer_source(), None);
    }

    #[test]
    fn flat_accessors_mirror_payload() {
        let state = TooltipState::Visible(payload());
        assert_eq!(state.pixel_x(), Some(50.0));
        assert_eq!(state.pixel_y(), Some(10.0));
        assert_eq!(state.active_point().map(|point| point.price), Some(110.0));
        assert_eq!(TooltipState::Hidden.active_point(), None);
    }
}

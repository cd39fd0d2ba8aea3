//! Which dashboard panel, if any, fills the screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKey {
    Holiday,
    Notifications,
    Attendance,
}

impl PanelKey {
    pub const ALL: [PanelKey; 3] = [PanelKey::Holiday, PanelKey::Attendance, PanelKey::Notifications];

    pub fn title(self) -> &'static str {
        match self {
            PanelKey::Holiday => "Holiday & Events",
            PanelKey::Notifications => "Notification",
            PanelKey::Attendance => "Attendance Confirmation",
        }
    }

    /// Header colour class.
    pub fn tone(self) -> &'static str {
        match self {
            PanelKey::Holiday | PanelKey::Attendance => "tone-teal",
            PanelKey::Notifications => "tone-purple",
        }
    }
}

/// What a coordinator call did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing was maximized, now one panel is.
    Opened,
    /// A different panel replaced the maximized one.
    Switched,
    /// The maximized panel was dismissed.
    Closed,
    Unchanged,
}

/// What the browser side of the overlay must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    End,
}

impl Transition {
    /// Switching panels keeps the running session.
    pub fn session_action(self) -> Option<SessionAction> {
        match self {
            Transition::Opened => Some(SessionAction::Start),
            Transition::Closed => Some(SessionAction::End),
            Transition::Switched | Transition::Unchanged => None,
        }
    }
}

/// At most one maximized panel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelCoordinator {
    maximized: Option<PanelKey>,
}

impl PanelCoordinator {
    pub fn maximized(&self) -> Option<PanelKey> {
        self.maximized
    }

    pub fn is_maximized(&self, key: PanelKey) -> bool {
        self.maximized == Some(key)
    }

    pub fn is_open(&self) -> bool {
        self.maximized.is_some()
    }

    /// Maximize `key`, or dismiss it if it is already maximized.
    pub fn toggle(&mut self, key: PanelKey) -> Transition {
        match self.maximized.replace(key) {
            None => Transition::Opened,
            Some(previous) if previous == key => {
                self.maximized = None;
                Transition::Closed
            }
            Some(_) => Transition::Switched,
        }
    }

    pub fn close(&mut self) -> Transition {
        match self.maximized.take() {
            Some(_) => Transition::Closed,
            None => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggling_twice_closes() {
        let mut panels = PanelCoordinator::default();
        assert_eq!(panels.toggle(PanelKey::Holiday), Transition::Opened);
        assert!(panels.is_maximized(PanelKey::Holiday));
        assert_eq!(panels.toggle(PanelKey::Holiday), Transition::Closed);
        assert_eq!(panels.maximized(), None);
    }

    #[test]
    fn another_panel_replaces_the_maximized_one() {
        let mut panels = PanelCoordinator::default();
        panels.toggle(PanelKey::Holiday);
        assert_eq!(panels.toggle(PanelKey::Notifications), Transition::Switched);

        let open: Vec<_> = PanelKey::ALL
            .into_iter()
            .filter(|k| panels.is_maximized(*k))
            .collect();
        assert_eq!(open, [PanelKey::Notifications]);
    }

    #[test]
    fn close_without_a_panel_is_a_no_op() {
        let mut panels = PanelCoordinator::default();
        assert_eq!(panels.close(), Transition::Unchanged);
        assert!(!panels.is_open());

        panels.toggle(PanelKey::Attendance);
        assert_eq!(panels.close(), Transition::Closed);
        assert_eq!(panels.close(), Transition::Unchanged);
    }

    #[test]
    fn one_session_spans_switches() {
        let mut panels = PanelCoordinator::default();
        let actions: Vec<_> = [
            panels.toggle(PanelKey::Holiday),
            panels.toggle(PanelKey::Notifications),
            panels.toggle(PanelKey::Attendance),
            panels.close(),
        ]
        .into_iter()
        .filter_map(Transition::session_action)
        .collect();
        assert_eq!(actions, [SessionAction::Start, SessionAction::End]);
    }

    #[test]
    fn closing_nothing_touches_no_session() {
        let mut panels = PanelCoordinator::default();
        assert_eq!(panels.close().session_action(), None);

        panels.toggle(PanelKey::Holiday);
        panels.close();
        assert_eq!(panels.close().session_action(), None);
    }
}

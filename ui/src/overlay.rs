use dioxus::{document::Eval, prelude::*};

use crate::panel::{PanelCoordinator, PanelKey, SessionAction, Transition};

/// Runs for as long as a panel is maximized: locks page scrolling, reports
/// Escape, and on the close message restores the previous `overflow`.
const SESSION_JS: &str = r#"
const previous = document.body.style.overflow;
document.body.style.overflow = "hidden";
const onKey = (event) => {
    if (event.key === "Escape") dioxus.send("escape");
};
window.addEventListener("keydown", onKey);
await dioxus.recv();
window.removeEventListener("keydown", onKey);
document.body.style.overflow = previous;
dioxus.send("closed");
"#;

/// Panel state shared by a dashboard and its panels.
#[derive(Clone, Copy)]
pub struct Panels {
    coordinator: Signal<PanelCoordinator>,
    session: Signal<Option<Eval>>,
}

impl Panels {
    pub fn maximized(&self) -> Option<PanelKey> {
        self.coordinator.read().maximized()
    }

    pub fn is_maximized(&self, key: PanelKey) -> bool {
        self.coordinator.read().is_maximized(key)
    }

    pub fn toggle(&mut self, key: PanelKey) -> Transition {
        let transition = self.coordinator.write().toggle(key);
        tracing::debug!(?key, ?transition, "panel toggled");
        self.follow(transition);
        transition
    }

    pub fn close(&mut self) -> Transition {
        let transition = self.coordinator.write().close();
        self.follow(transition);
        transition
    }

    fn follow(&mut self, transition: Transition) {
        match transition.session_action() {
            Some(SessionAction::Start) => self.start_session(),
            Some(SessionAction::End) => {
                if let Some(eval) = self.session.write().take() {
                    end_session(eval);
                }
            }
            None => {}
        }
    }

    fn start_session(&mut self) {
        let mut eval = document::eval(SESSION_JS);
        if let Some(stale) = self.session.write().replace(eval) {
            end_session(stale);
        }

        let mut panels = *self;
        spawn(async move {
            while let Ok(message) = eval.recv::<String>().await {
                match message.as_str() {
                    "escape" => {
                        panels.close();
                    }
                    _ => break,
                }
            }
        });
    }
}

/// Create the panel state for a dashboard.
///
/// The browser side of an overlay session starts on [`Transition::Opened`],
/// ends on [`Transition::Closed`], and is torn down if the component unmounts
/// first.
pub fn use_panels() -> Panels {
    let coordinator = use_signal(PanelCoordinator::default);
    let session = use_signal(|| None::<Eval>);

    use_drop(move || {
        if let Ok(Some(eval)) = session.try_peek().map(|s| *s) {
            end_session(eval);
        }
    });

    Panels {
        coordinator,
        session,
    }
}

fn end_session(eval: Eval) {
    if let Err(error) = eval.send(()) {
        tracing::debug!(?error, "overlay session already finished");
    }
}

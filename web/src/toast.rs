use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    id: u64,
    pub tone: Tone,
    pub message: String,
}

/// Global notice banner state - use `use_toast()` to access
#[derive(Clone, Copy)]
pub struct ToastState {
    current: Signal<Option<Toast>>,
    next_id: Signal<u64>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            current: Signal::new(None),
            next_id: Signal::new(0),
        }
    }

    fn show(&mut self, tone: Tone, message: String) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        self.current.set(Some(Toast { id, tone, message }));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Tone::Success, message.into());
    }

    pub fn error(&mut self, error: impl std::fmt::Display) {
        self.show(Tone::Error, error.to_string());
    }

    pub fn clear(&mut self) {
        self.current.set(None);
    }
}

pub fn use_toast() -> ToastState {
    use_context::<ToastState>()
}

#[component]
pub fn ToastBanner() -> Element {
    let mut state = use_toast();

    // Each notice clears itself unless a newer one replaced it.
    use_effect(move || {
        let Some(id) = state.current.read().as_ref().map(|t| t.id) else {
            return;
        };
        spawn(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            if state.current.peek().as_ref().is_some_and(|t| t.id == id) {
                state.clear();
            }
        });
    });

    let current = state.current.read().clone();
    let Some(toast) = current else {
        return rsx! {};
    };
    let tone = match toast.tone {
        Tone::Success => "toast-success",
        Tone::Error => "toast-error",
    };

    rsx! {
        div {
            class: "toast-banner {tone}",
            role: "status",
            span { class: "toast-message", "{toast.message}" }
            button {
                class: "toast-close",
                aria_label: "Dismiss",
                onclick: move |_| state.clear(),
                "×"
            }
        }
    }
}

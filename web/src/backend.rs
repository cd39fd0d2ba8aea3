use std::{ops::Deref, rc::Rc};

use api::{ApiConfig, FallbackRepository, HttpRepository, LocalRepository, SNAPSHOT_KEY, Store};
use dioxus::prelude::*;

const TOKEN_KEY: &str = "authToken";

/// The repository every screen talks to, provided as context by the layout.
#[derive(Clone)]
pub struct Backend(Rc<FallbackRepository<HttpRepository>>);

impl PartialEq for Backend {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Backend {
    type Target = FallbackRepository<HttpRepository>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Backend {
    /// Restore local data and the bearer token from browser storage, then
    /// connect.
    pub async fn bootstrap() -> Self {
        let snapshot = read_local(SNAPSHOT_KEY).await;
        let token = read_local(TOKEN_KEY).await;
        let local = LocalRepository::restore(snapshot.as_deref(), Rc::new(BrowserStore));

        let repository = match ApiConfig::from_env() {
            Ok(config) => {
                tracing::info!(
                    base_url = %config.base_url,
                    demo = config.demo_mode,
                    "connecting to campus backend"
                );
                api::connect(config.with_token(token), local)
            }
            Err(error) => {
                tracing::error!(%error, "bad backend configuration, using local data only");
                FallbackRepository::new(None, local)
            }
        };
        Self(Rc::new(repository))
    }
}

pub fn use_backend() -> Backend {
    use_context::<Backend>()
}

/// `localStorage`, reached through `eval`.
struct BrowserStore;

impl Store for BrowserStore {
    fn save(&self, key: &str, value: String) {
        let js = format!(
            r#"
            try {{
                localStorage.setItem({}, {});
                dioxus.send(null);
            }} catch (e) {{
                dioxus.send(String(e));
            }}
            "#,
            js_string(key),
            js_string(&value),
        );
        let key = key.to_string();
        spawn(async move {
            match document::eval(&js).recv::<Option<String>>().await {
                Ok(None) => {}
                Ok(Some(error)) => tracing::error!(%key, %error, "failed to persist local data"),
                Err(error) => tracing::error!(%key, ?error, "failed to persist local data"),
            }
        });
    }
}

async fn read_local(key: &str) -> Option<String> {
    let js = format!("dioxus.send(localStorage.getItem({}));", js_string(key));
    match document::eval(&js).recv::<Option<String>>().await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%key, ?error, "could not read browser storage");
            None
        }
    }
}

/// A JSON string literal is also a valid JavaScript string literal.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

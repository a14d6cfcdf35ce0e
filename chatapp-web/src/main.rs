mod app;
mod components;
mod config;
mod containers;
mod firebase;
mod hooks;
mod models;
mod pages;
mod routes;
mod storage;
mod telemetry;


use app::App;
use config::FrontendConfig;
use tracing::info;
use yew::Renderer;
use yew::{Html, function_component, html};
use yewdux::YewduxRoot;

#[function_component(Root)]
fn root() -> Html {
    html! {
        <YewduxRoot>
            <App />
        </YewduxRoot>
    }
}

fn install_panic_hook() {
    // Disable truncation of panic payloads to debug any panics
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied());
        match payload {
            Some(message) => web_sys::console::error_1(&format!("Panic: {message}").into()),
            None => web_sys::console::error_1(&"Unknown panic".into()),
        }
        if let Some(location) = info.location() {
            web_sys::console::error_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));
}

/// The configured host element, or `<body>` when it is missing.
fn mount_point(id: &str) -> Option<web_sys::Element> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(id)
        .or_else(|| document.body().map(Into::into))
}

fn main() {
    install_panic_hook();

    let config = FrontendConfig::new();
    telemetry::init(&config.log_level);
    info!("starting ChatApp");

    // a backend that cannot start leaves nothing to render
    if let Err(err) = firebase::shared().initialize() {
        panic!("backend initialization failed: {err}");
    }

    match mount_point(&config.mount_id) {
        Some(element) => {
            Renderer::<Root>::with_root(element).render();
        }
        None => panic!("no element to mount into"),
    }
}

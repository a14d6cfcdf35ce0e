use crate::containers::header::Header;
use crate::routes::HomeRoute;
use strum::IntoEnumIterator;
use tracing::warn;
use web_sys::window;
use yew::{Children, Html, Properties, classes, function_component, html, use_effect_with};
use yew_router::prelude::Link;

/// Theme every page is rendered with.
const THEME: &str = "dark";

/// Set `data-theme` on the root element so DaisyUI picks up `theme`.
fn apply_theme(theme: &str) {
    let Some(root) = window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    if let Err(err) = root.set_attribute("data-theme", theme) {
        warn!(error = ?err, theme, "could not apply theme");
    }
}

#[derive(Properties, PartialEq)]
pub struct PageProps {
    #[prop_or_default]
    pub children: Children,
}

/// Frame shared by every page: header, content and footer.
#[function_component(Page)]
pub fn page(props: &PageProps) -> Html {
    use_effect_with((), |_| {
        apply_theme(THEME);
        || {}
    });

    html! {
        <>
            <Header />
            <div class="min-h-screen bg-base-100 flex flex-col">
                <main class={classes!("flex-grow", "p-4", "transition-all", "duration-300")}>
                    {props.children.clone()}
                </main>
                <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                    <p>{"ChatApp · Powered by Rust, Yew and DaisyUI"}</p>
                </footer>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct HomeLayoutProps {
    /// Tab currently shown, `None` on `/home` itself
    #[prop_or_default]
    pub active: Option<HomeRoute>,
    #[prop_or_default]
    pub children: Children,
}

/// `/home` and its tabs.
#[function_component(HomeLayout)]
pub fn home_layout(props: &HomeLayoutProps) -> Html {
    html! {
        <Page>
            <div role="tablist" class="tabs tabs-boxed mb-4">
                { for HomeRoute::iter().map(|tab| {
                    let class = classes!("tab", (props.active == Some(tab)).then_some("tab-active"));
                    html! {
                        <Link<HomeRoute> to={tab} classes={class}>{tab.label()}</Link<HomeRoute>>
                    }
                }) }
            </div>
            if props.children.is_empty() {
                <p class="text-base-content/70">{"Pick a tab to get started."}</p>
            } else {
                {props.children.clone()}
            }
        </Page>
    }
}

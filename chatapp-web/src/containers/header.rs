use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

/// Top bar with the app title and, when signed in, profile and group links.
#[function_component(Header)]
pub fn header() -> Html {
    let label = use_selector(|state: &AppState| {
        state.current_session().map(|session| session.label().to_string())
    });

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-lg">
                {"ChatApp"}
            </Link<MainRoute>>
            if let Some(label) = (*label).clone() {
                <ul class="menu menu-horizontal gap-2">
                    <li>
                        <Link<MainRoute> to={MainRoute::CreateGroup}>{"New group"}</Link<MainRoute>>
                    </li>
                    <li>
                        <Link<MainRoute> to={MainRoute::Profile}>
                            <i class="fa-solid fa-user"></i>
                            <span>{label}</span>
                        </Link<MainRoute>>
                    </li>
                </ul>
            } else {
                <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary btn-sm">
                    {"Sign in"}
                </Link<MainRoute>>
            }
        </nav>
    }
}

use crate::containers::layout::Page;
use crate::routes::MainRoute;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

/// Landing page shown on the first visit and to signed out users.
#[function_component(WelcomingPage)]
pub fn welcoming_page() -> Html {
    html! {
        <Page>
            <div class="hero min-h-[60vh]">
                <div class="hero-content text-center">
                    <div class="max-w-md space-y-6">
                        <h1 class="text-4xl font-bold">{"Welcome to ChatApp"}</h1>
                        <p>{"Talk with your contacts one to one or in groups."}</p>
                        <div class="flex justify-center gap-4">
                            <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary">
                                {"Sign in"}
                            </Link<MainRoute>>
                            <Link<MainRoute> to={MainRoute::Register} classes="btn btn-outline">
                                {"Register"}
                            </Link<MainRoute>>
                        </div>
                    </div>
                </div>
            </div>
        </Page>
    }
}

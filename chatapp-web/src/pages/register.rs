use crate::pages::login::{CredentialsForm, CredentialsMode};
use yew::{Html, function_component, html};

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    html! { <CredentialsForm mode={CredentialsMode::Register} /> }
}

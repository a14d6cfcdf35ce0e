use crate::firebase;
use crate::routes::MainRoute;
use shared::BackendError;
use shared::backend::AuthService;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Link;

/// Which auth call the form makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsMode {
    SignIn,
    Register,
}

impl CredentialsMode {
    fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Create account",
        }
    }

    fn busy(self) -> &'static str {
        match self {
            Self::SignIn => "Signing in...",
            Self::Register => "Creating account...",
        }
    }
}

/// User-facing text for a failed sign in or registration.
pub fn describe_auth_error(error: &BackendError) -> String {
    let BackendError::Sdk { message, .. } = error else {
        return "Unable to reach the server".to_string();
    };
    match message.as_str() {
        "auth/invalid-credential" | "auth/wrong-password" | "auth/user-not-found" => {
            "Invalid credentials".to_string()
        }
        "auth/email-already-in-use" => "An account already exists for this email".to_string(),
        "auth/weak-password" => "Password must be at least 6 characters".to_string(),
        "auth/invalid-email" => "That email address is not valid".to_string(),
        "auth/network-request-failed" => "Unable to reach the server".to_string(),
        other => format!("Request failed: {other}"),
    }
}

#[derive(Properties, PartialEq)]
pub struct CredentialsFormProps {
    pub mode: CredentialsMode,
}

/// Email and password form shared by the login and register pages.
#[function_component(CredentialsForm)]
pub fn credentials_form(props: &CredentialsFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let mode = props.mode;

    let onsubmit = {
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email_value = (*email_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                let result = match firebase::shared().auth_handle() {
                    Ok(auth) => match mode {
                        CredentialsMode::SignIn => auth.sign_in(&email_value, &password_value).await,
                        CredentialsMode::Register => {
                            auth.register(&email_value, &password_value).await
                        }
                    },
                    Err(err) => Err(err),
                };
                match result {
                    Ok(session) => {
                        tracing::info!(uid = %session.uid, "signed in");
                        if let Some(ref nav) = navigator_handle {
                            nav.push(&MainRoute::Home);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, "authentication failed");
                        error_ref.set(Some(describe_auth_error(&err)));
                    }
                }
                loading_ref.set(false);
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = (*email).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{mode.title()}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { mode.busy() } else { mode.title() }}
                        </button>
                    </div>
                    {match mode {
                        CredentialsMode::SignIn => html! {
                            <p class="text-sm">
                                {"No account yet? "}
                                <Link<MainRoute> to={MainRoute::Register} classes="link">{"Register"}</Link<MainRoute>>
                            </p>
                        },
                        CredentialsMode::Register => html! {
                            <p class="text-sm">
                                {"Already registered? "}
                                <Link<MainRoute> to={MainRoute::Login} classes="link">{"Sign in"}</Link<MainRoute>>
                            </p>
                        },
                    }}
                </form>
            </div>
        </div>
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    html! { <CredentialsForm mode={CredentialsMode::SignIn} /> }
}

use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// What is being waited on
    #[prop_or("Loading".into())]
    pub label: yew::AttrValue,
}

/// Placeholder shown while a lazily loaded page or the session is pending.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex items-center justify-center h-full p-6" role="status">
            <span class="loading loading-dots loading-md text-primary"></span>
            <span class="ml-3 text-base-content/70">{ props.label.clone() }</span>
        </div>
    }
}

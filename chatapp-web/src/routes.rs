use crate::components::loading::Loading;
use crate::containers::layout::HomeLayout;
use crate::pages::*;
use shared::routing::{
    LoadStrategy, MatchedRoute, NavigationGuard, NavigationOutcome, NavigationRequest, RouteName,
};
use std::rc::Rc;
use strum::EnumIter;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew::suspense::Suspense;
use yew_router::prelude::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Welcoming,
    #[at("/register")]
    Register,
    #[at("/login")]
    Login,
    #[at("/home")]
    Home,
    #[at("/home/*")]
    HomeTabs,
    #[at("/ProfileView")]
    Profile,
    #[at("/chat/:chat_id")]
    Chat { chat_id: String },
    #[at("/chat/group/:group_id")]
    GroupChat { group_id: String },
    #[at("/CreateGroup")]
    CreateGroup,
    #[at("/GroupInfos/:group_id")]
    GroupInfos { group_id: String },
}

/// The tabs below `/home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum HomeRoute {
    #[at("/home/discover")]
    Discover,
    #[at("/home/contacts")]
    Contacts,
    #[at("/home/groups")]
    Groups,
}

impl MainRoute {
    /// Name of the route in the shared route table. `HomeTabs` is only a
    /// mount point for [`HomeRoute`] and resolves to its parent.
    pub fn route_name(&self) -> RouteName {
        match self {
            Self::Welcoming => RouteName::Welcoming,
            Self::Register => RouteName::RegisterPage,
            Self::Login => RouteName::Login,
            Self::Home | Self::HomeTabs => RouteName::Home,
            Self::Profile => RouteName::ProfileView,
            Self::Chat { .. } => RouteName::ChatView,
            Self::GroupChat { .. } => RouteName::GroupChatView,
            Self::CreateGroup => RouteName::CreateGroup,
            Self::GroupInfos { .. } => RouteName::GroupInfos,
        }
    }
}

impl HomeRoute {
    pub fn route_name(self) -> RouteName {
        match self {
            Self::Discover => RouteName::Discover,
            Self::Contacts => RouteName::Contacts,
            Self::Groups => RouteName::Groups,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Discover => "Discover",
            Self::Contacts => "Contacts",
            Self::Groups => "Groups",
        }
    }
}

/// Shared handle to the app's single navigation guard.
#[derive(Clone)]
pub struct RouterHandle(pub Rc<NavigationGuard>);

impl PartialEq for RouterHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardedSwitchProps {
    pub guard: RouterHandle,
}

/// Runs the guard on every location change and renders the page once the
/// navigation is allowed.
#[function_component(GuardedSwitch)]
pub fn guarded_switch(props: &GuardedSwitchProps) -> Html {
    let location = use_location();
    let navigator = use_navigator();
    let allowed = use_state(|| None::<(String, MatchedRoute)>);
    let previous = use_mut_ref(|| None::<String>);

    let path = location
        .as_ref()
        .map(|location| location.path().to_string())
        .unwrap_or_else(|| "/".to_string());

    {
        let guard = props.guard.0.clone();
        let allowed = allowed.clone();
        use_effect_with(path.clone(), move |path| {
            let mut request = NavigationRequest::new(path.clone());
            if let Some(from) = previous.borrow_mut().replace(path.clone()) {
                request = request.from(from);
            }
            let requested = path.clone();
            spawn_local(async move {
                match guard.resolve(request).await {
                    NavigationOutcome::Allowed(target) => {
                        scroll_to_top();
                        allowed.set(Some((requested, target)));
                    }
                    NavigationOutcome::Redirected { to, reason } => {
                        debug!(%to, %reason, "redirecting");
                        if let Some(navigator) = navigator {
                            let route = MainRoute::recognize(&to).unwrap_or(MainRoute::Welcoming);
                            navigator.replace(&route);
                        }
                    }
                    NavigationOutcome::Superseded => {}
                }
            });
            || ()
        });
    }

    match &*allowed {
        Some((requested, target)) if *requested == path => render_route(&props.guard.0, target),
        _ => html! { <Loading label="Checking your session" /> },
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn is_lazy(guard: &NavigationGuard, name: RouteName) -> bool {
    fn find(routes: &[shared::routing::RouteDescriptor], name: RouteName) -> Option<LoadStrategy> {
        routes.iter().find_map(|route| {
            if route.name == name {
                Some(route.load)
            } else {
                find(&route.children, name)
            }
        })
    }
    find(guard.table().routes(), name) == Some(LoadStrategy::Lazy)
}

/// Render the page for an allowed navigation.
pub fn render_route(guard: &NavigationGuard, target: &MatchedRoute) -> Html {
    let param = |key: &str| AttrValue::from(target.param(key).unwrap_or_default().to_string());
    let page = match target.name() {
        RouteName::Welcoming => html! { <WelcomingPage /> },
        RouteName::RegisterPage => html! { <RegisterPage /> },
        RouteName::Login => html! { <LoginPage /> },
        RouteName::Home => html! { <HomeLayout /> },
        RouteName::Discover => html! { <HomeLayout active={HomeRoute::Discover}><DiscoverList /></HomeLayout> },
        RouteName::Contacts => html! { <HomeLayout active={HomeRoute::Contacts}><ContactsList /></HomeLayout> },
        RouteName::Groups => html! { <HomeLayout active={HomeRoute::Groups}><GroupsList /></HomeLayout> },
        RouteName::ProfileView => html! { <ProfilePage /> },
        RouteName::ChatView => html! { <ChatView chat_id={param("chatId")} /> },
        RouteName::GroupChatView => html! { <GroupChatView group_id={param("groupId")} /> },
        RouteName::CreateGroup => html! { <CreateGroupPage /> },
        RouteName::GroupInfos => html! { <GroupInfosPage group_id={param("groupId")} /> },
    };

    if is_lazy(guard, target.name()) {
        html! {
            <Suspense fallback={html! { <Loading /> }}>
                { page }
            </Suspense>
        }
    } else {
        page
    }
}

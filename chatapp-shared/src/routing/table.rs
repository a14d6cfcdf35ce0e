use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Name of every navigable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteName {
    Welcoming,
    RegisterPage,
    Login,
    Home,
    Discover,
    Contacts,
    Groups,
    ProfileView,
    ChatView,
    GroupChatView,
    CreateGroup,
    GroupInfos,
}

impl RouteName {
    /// Stable string form used in logs and links.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcoming => "Welcoming",
            Self::RegisterPage => "RegisterPage",
            Self::Login => "Login",
            Self::Home => "Home",
            Self::Discover => "Discover",
            Self::Contacts => "Contacts",
            Self::Groups => "Groups",
            Self::ProfileView => "ProfileView",
            Self::ChatView => "ChatView",
            Self::GroupChatView => "GroupChatView",
            Self::CreateGroup => "CreateGroup",
            Self::GroupInfos => "GroupInfos",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only signed in users may enter this route or any route below it
    pub requires_auth: bool,
}

/// When the page's code is fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Bundled with the app
    #[default]
    Eager,
    /// Loaded on first visit
    Lazy,
}

/// One entry in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Absolute for top-level routes, relative for children
    pub path: &'static str,
    /// Unique name used for links and redirects
    pub name: RouteName,
    /// Page component rendered for the route
    pub component: &'static str,
    /// Guard flags
    pub meta: RouteMeta,
    /// When the page's code is fetched
    pub load: LoadStrategy,
    /// Routes nested below this one
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    /// A public, eagerly loaded route without children.
    #[must_use]
    pub const fn new(path: &'static str, name: RouteName, component: &'static str) -> Self {
        Self {
            path,
            name,
            component,
            meta: RouteMeta {
                requires_auth: false,
            },
            load: LoadStrategy::Eager,
            children: Vec::new(),
        }
    }

    /// Restrict the route and everything below it to signed in users.
    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Load the page on first visit.
    #[must_use]
    pub fn lazy(mut self) -> Self {
        self.load = LoadStrategy::Lazy;
        self
    }

    /// Nest `children` below this route.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// A path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// Normalized path without query or fragment
    pub path: String,
    /// Matched routes from the outermost parent down to the leaf
    pub chain: Vec<RouteName>,
    /// Parameter bindings, e.g. `chatId -> "c-1"`
    pub params: BTreeMap<String, String>,
    requires_auth: bool,
}

impl MatchedRoute {
    /// The leaf route.
    #[must_use]
    pub fn name(&self) -> RouteName {
        // chain is never empty for a match
        self.chain.last().copied().unwrap_or(RouteName::Welcoming)
    }

    /// Whether any route in the chain, ancestors included, requires auth.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// The value bound to a path parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Problems found while building a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// Two routes would both match some path
    #[error("{first} and {second} both match {pattern}")]
    Ambiguous {
        /// Route declared first
        first: RouteName,
        /// Route declared later
        second: RouteName,
        /// Full pattern of the later route
        pattern: String,
    },

    /// Two routes share a name
    #[error("route name {name} is declared twice")]
    DuplicateName {
        /// The repeated name
        name: RouteName,
    },
}

/// Static mapping from URL paths to pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate names and patterns that would
    /// match the same paths. A parameter segment matches any static segment,
    /// so `/chat/:chatId` and `/chat/group` overlap.
    ///
    /// # Errors
    /// Returns the first [`RouteTableError`] found.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut seen: Vec<(String, RouteName)> = Vec::new();
        for (pattern, chain) in flatten(&routes) {
            let Some(leaf) = chain.last() else { continue };
            if !names.insert(leaf.name) {
                return Err(RouteTableError::DuplicateName { name: leaf.name });
            }
            if let Some((_, first)) = seen.iter().find(|(other, _)| overlaps(other, &pattern)) {
                return Err(RouteTableError::Ambiguous {
                    first: *first,
                    second: leaf.name,
                    pattern,
                });
            }
            seen.push((pattern, leaf.name));
        }
        Ok(Self { routes })
    }

    /// The application's route table.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            routes: standard_routes(),
        }
    }

    /// Top-level routes in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Resolve a location (path with optional query and fragment).
    ///
    /// Static segments compare case-insensitively; parameters keep the
    /// caller's spelling.
    #[must_use]
    pub fn resolve(&self, location: &str) -> Option<MatchedRoute> {
        let path = normalize(location);
        let wanted: Vec<&str> = segments(&path).collect();
        flatten(&self.routes).into_iter().find_map(|(pattern, chain)| {
            let params = match_segments(&pattern, &wanted)?;
            Some(MatchedRoute {
                path: path.clone(),
                requires_auth: chain.iter().any(|route| route.meta.requires_auth),
                chain: chain.iter().map(|route| route.name).collect(),
                params,
            })
        })
    }

    /// Build the path for a named route, substituting `params`.
    ///
    /// Returns `None` for an unknown name or a missing parameter.
    #[must_use]
    pub fn href(&self, name: RouteName, params: &[(&str, &str)]) -> Option<String> {
        let (pattern, _) = flatten(&self.routes)
            .into_iter()
            .find(|(_, chain)| chain.last().is_some_and(|route| route.name == name))?;
        let mut parts = Vec::new();
        for segment in segments(&pattern) {
            match segment.strip_prefix(':') {
                Some(key) => {
                    let (_, value) = params.iter().find(|(k, _)| *k == key)?;
                    parts.push((*value).to_string());
                }
                None => parts.push(segment.to_string()),
            }
        }
        Some(format!("/{}", parts.join("/")))
    }
}

/// Routes of the chat client.
#[must_use]
pub fn standard_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("/GroupInfos/:groupId", RouteName::GroupInfos, "GroupInfos"),
        RouteDescriptor::new("/CreateGroup", RouteName::CreateGroup, "CreateGroup"),
        RouteDescriptor::new("/chat/group/:groupId", RouteName::GroupChatView, "GroupChatView"),
        RouteDescriptor::new("/ProfileView", RouteName::ProfileView, "ProfilePage").requires_auth(),
        RouteDescriptor::new("/", RouteName::Welcoming, "WelcomingPage"),
        RouteDescriptor::new("/register", RouteName::RegisterPage, "RegisterPage"),
        RouteDescriptor::new("/login", RouteName::Login, "LoginPage"),
        RouteDescriptor::new("/chat/:chatId", RouteName::ChatView, "ChatView"),
        RouteDescriptor::new("/home", RouteName::Home, "HomePage")
            .requires_auth()
            .lazy()
            .with_children(vec![
                RouteDescriptor::new("discover", RouteName::Discover, "DiscoverList").lazy(),
                RouteDescriptor::new("contacts", RouteName::Contacts, "ContactsList").lazy(),
                RouteDescriptor::new("groups", RouteName::Groups, "GroupsList").lazy(),
            ]),
    ]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn normalize(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let joined = segments(&location[..end]).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return normalize(child);
    }
    normalize(&format!("{parent}/{child}"))
}

/// Every route paired with its full pattern and ancestor chain, parents
/// before their children, in declaration order.
fn flatten(routes: &[RouteDescriptor]) -> Vec<(String, Vec<&RouteDescriptor>)> {
    fn walk<'a>(
        routes: &'a [RouteDescriptor],
        prefix: &str,
        ancestors: &[&'a RouteDescriptor],
        out: &mut Vec<(String, Vec<&'a RouteDescriptor>)>,
    ) {
        for route in routes {
            let pattern = join(prefix, route.path);
            let mut chain = ancestors.to_vec();
            chain.push(route);
            out.push((pattern.clone(), chain.clone()));
            walk(&route.children, &pattern, &chain, out);
        }
    }

    let mut out = Vec::new();
    walk(routes, "/", &[], &mut out);
    out
}

/// Whether some path matches both patterns.
fn overlaps(first: &str, second: &str) -> bool {
    let first: Vec<&str> = segments(first).collect();
    let second: Vec<&str> = segments(second).collect();
    first.len() == second.len()
        && first.iter().zip(&second).all(|(a, b)| {
            a.starts_with(':') || b.starts_with(':') || a.eq_ignore_ascii_case(b)
        })
}

fn match_segments(pattern: &str, wanted: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected: Vec<&str> = segments(pattern).collect();
    if expected.len() != wanted.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (expected, actual) in expected.iter().zip(wanted) {
        match expected.strip_prefix(':') {
            Some(key) => {
                params.insert(key.to_string(), (*actual).to_string());
            }
            None if expected.eq_ignore_ascii_case(actual) => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_unambiguous() {
        assert_eq!(RouteTable::new(standard_routes()), Ok(RouteTable::standard()));
    }

    #[test]
    fn test_duplicate_chat_patterns_are_rejected() {
        let routes = vec![
            RouteDescriptor::new("/chat/:groupId", RouteName::GroupChatView, "GroupChatView"),
            RouteDescriptor::new("/chat/:chatId", RouteName::ChatView, "ChatView"),
        ];
        assert_eq!(
            RouteTable::new(routes),
            Err(RouteTableError::Ambiguous {
                first: RouteName::GroupChatView,
                second: RouteName::ChatView,
                pattern: "/chat/:chatId".to_string(),
            })
        );
    }

    #[test]
    fn test_parameter_overlapping_static_segment_is_rejected() {
        let routes = vec![
            RouteDescriptor::new("/chat/:chatId", RouteName::ChatView, "ChatView"),
            RouteDescriptor::new("/chat/group", RouteName::GroupChatView, "GroupChatView"),
        ];
        assert_eq!(
            RouteTable::new(routes),
            Err(RouteTableError::Ambiguous {
                first: RouteName::ChatView,
                second: RouteName::GroupChatView,
                pattern: "/chat/group".to_string(),
            })
        );

        let reversed = vec![
            RouteDescriptor::new("/Chat/Group", RouteName::GroupChatView, "GroupChatView"),
            RouteDescriptor::new("/chat/:chatId", RouteName::ChatView, "ChatView"),
        ];
        assert!(RouteTable::new(reversed).is_err());
    }

    #[test]
    fn test_deeper_static_prefix_does_not_overlap() {
        let routes = vec![
            RouteDescriptor::new("/chat/:chatId", RouteName::ChatView, "ChatView"),
            RouteDescriptor::new("/chat/group/:groupId", RouteName::GroupChatView, "GroupChatView"),
        ];
        assert!(RouteTable::new(routes).is_ok());
    }

    #[test]
    fn test_nested_child_overlap_is_rejected() {
        let routes = vec![
            RouteDescriptor::new("/home/:tab", RouteName::Contacts, "ContactsList"),
            RouteDescriptor::new("/home", RouteName::Home, "HomePage").with_children(vec![
                RouteDescriptor::new("discover", RouteName::Discover, "DiscoverList"),
            ]),
        ];
        assert!(matches!(
            RouteTable::new(routes),
            Err(RouteTableError::Ambiguous {
                first: RouteName::Contacts,
                second: RouteName::Discover,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let routes = vec![
            RouteDescriptor::new("/a", RouteName::Login, "A"),
            RouteDescriptor::new("/b", RouteName::Login, "B"),
        ];
        assert_eq!(
            RouteTable::new(routes).unwrap_err().to_string(),
            "route name Login is declared twice"
        );
    }

    #[test]
    fn test_resolve_top_level_routes() {
        let table = RouteTable::standard();
        for (path, name) in [
            ("/", RouteName::Welcoming),
            ("/register", RouteName::RegisterPage),
            ("/login", RouteName::Login),
            ("/home", RouteName::Home),
            ("/ProfileView", RouteName::ProfileView),
            ("/CreateGroup", RouteName::CreateGroup),
        ] {
            let matched = table.resolve(path).map(|matched| matched.name());
            assert_eq!(matched, Some(name), "{path}");
        }
    }

    #[test]
    fn test_resolve_nested_child_keeps_ancestors() {
        let table = RouteTable::standard();
        let matched = table.resolve("/home/discover").unwrap();
        assert_eq!(matched.name(), RouteName::Discover);
        assert_eq!(matched.chain, vec![RouteName::Home, RouteName::Discover]);
        assert!(matched.requires_auth());
    }

    #[test]
    fn test_leaf_without_metadata_is_public() {
        let table = RouteTable::standard();
        assert!(!table.resolve("/login").unwrap().requires_auth());
        assert!(!table.resolve("/chat/c-1").unwrap().requires_auth());
        assert!(table.resolve("/ProfileView").unwrap().requires_auth());
    }

    #[test]
    fn test_params_are_extracted() {
        let table = RouteTable::standard();
        let chat = table.resolve("/chat/c-42").unwrap();
        assert_eq!(chat.name(), RouteName::ChatView);
        assert_eq!(chat.param("chatId"), Some("c-42"));

        let group = table.resolve("/chat/group/g-7").unwrap();
        assert_eq!(group.name(), RouteName::GroupChatView);
        assert_eq!(group.param("groupId"), Some("g-7"));

        let info = table.resolve("/GroupInfos/g-7").unwrap();
        assert_eq!(info.name(), RouteName::GroupInfos);
        assert_eq!(info.param("groupId"), Some("g-7"));
    }

    #[test]
    fn test_static_segments_ignore_case_params_do_not() {
        let table = RouteTable::standard();
        let name = |path: &str| table.resolve(path).map(|matched| matched.name());
        assert_eq!(name("/profileview"), Some(RouteName::ProfileView));
        assert_eq!(name("/HOME/Groups"), Some(RouteName::Groups));
        let chat = table.resolve("/Chat/AbC").unwrap();
        assert_eq!(chat.param("chatId"), Some("AbC"));
    }

    #[test]
    fn test_query_fragment_and_trailing_slash_are_ignored() {
        let table = RouteTable::standard();
        let matched = table.resolve("/home/contacts/?tab=1#top").unwrap();
        assert_eq!(matched.name(), RouteName::Contacts);
        assert_eq!(matched.path, "/home/contacts");
    }

    #[test]
    fn test_unknown_paths_do_not_resolve() {
        let table = RouteTable::standard();
        assert!(table.resolve("/nope").is_none());
        assert!(table.resolve("/home/unknown").is_none());
        assert!(table.resolve("/chat").is_none());
    }

    #[test]
    fn test_href_builds_paths() {
        let table = RouteTable::standard();
        assert_eq!(table.href(RouteName::Welcoming, &[]).as_deref(), Some("/"));
        assert_eq!(table.href(RouteName::Groups, &[]).as_deref(), Some("/home/groups"));
        assert_eq!(
            table.href(RouteName::ChatView, &[("chatId", "c-1")]).as_deref(),
            Some("/chat/c-1")
        );
        assert_eq!(table.href(RouteName::GroupInfos, &[]), None);
    }

    #[test]
    fn test_home_children_are_lazy() {
        let table = RouteTable::standard();
        let home = table
            .routes()
            .iter()
            .find(|route| route.name == RouteName::Home)
            .unwrap();
        assert_eq!(home.children.len(), 3);
        assert!(home.children.iter().all(|child| child.load == LoadStrategy::Lazy));
        assert!(home.children.iter().all(|child| !child.meta.requires_auth));
    }
}

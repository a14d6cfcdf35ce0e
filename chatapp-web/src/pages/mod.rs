mod chat;
mod create_group;
mod group_infos;
mod home;
pub mod login;
mod profile;
mod register;
mod welcoming;

pub use chat::{ChatView, GroupChatView};
pub use create_group::CreateGroupPage;
pub use group_infos::GroupInfosPage;
pub use home::{ContactsList, DiscoverList, GroupsList};
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use welcoming::WelcomingPage;

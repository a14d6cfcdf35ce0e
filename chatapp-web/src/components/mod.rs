pub(crate) mod loading;
pub(crate) mod toaster;

pub use toaster::{StoreToasts, Toaster};

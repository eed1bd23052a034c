pub mod redirect;
pub mod shorten;

pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{CreateRequest, CreateResponse, ShortenService, shorten_routes};

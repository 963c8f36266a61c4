pub mod article;
pub mod cookie;
pub mod redirect;
pub mod section;

pub use article::Article;
pub use cookie::{consent_cookies, SiteCookie};
pub use redirect::Redirect;
pub use section::Section;

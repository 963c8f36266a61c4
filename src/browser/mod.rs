pub mod http;
pub mod traits;
pub mod webdriver;

pub use http::HttpSession;
pub use traits::Browser;
pub use webdriver::WebDriverSession;

#[cfg(test)]
pub use traits::MockBrowser;

#[cfg(test)]
pub(crate) mod test_server;

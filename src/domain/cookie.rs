use url::Url;

use crate::errors::{ScraperError, ScraperResult};

const CONSENT_COOKIE_NAME: &str = "euconsent-v2";
const CONSENT_COOKIE_VALUE: &str =
    "CPu_hvvPu_hvvExAAAPLDNCgAAAAAAAAAAAAJiwAATFgAAAA.YAAAAAAAAAAA";
const POPUP_COOKIE_NAME: &str = "_popup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub domain: String,
    pub secure: bool,
}

impl SiteCookie {
    /// Render as a `Set-Cookie` header value
    pub fn to_header(&self) -> String {
        let mut header = format!(
            "{}={}; Domain={}; Path={}",
            self.name, self.value, self.domain, self.path
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Cookies that suppress the consent banner and the newsletter popup
pub fn consent_cookies(base_url: &str) -> ScraperResult<Vec<SiteCookie>> {
    let parsed = Url::parse(base_url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ScraperError::InvalidUrl(format!("Missing host: {}", base_url)))?;
    let domain = format!(".{}", host);

    Ok(vec![
        SiteCookie {
            name: CONSENT_COOKIE_NAME.to_string(),
            value: CONSENT_COOKIE_VALUE.to_string(),
            path: "/".to_string(),
            domain: domain.clone(),
            secure: true,
        },
        SiteCookie {
            name: POPUP_COOKIE_NAME.to_string(),
            value: "0".to_string(),
            path: "/".to_string(),
            domain,
            secure: false,
        },
    ])
}

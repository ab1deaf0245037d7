use once_cell::sync::Lazy;
use url::Url;

pub static BASE_URL_ENV: &str = "PULSEBACK_BASE_URL";
pub static DEFAULT_BASE_URL: Lazy<Url> = Lazy::new(|| {
    // Builds default to the production service. Internal builds can point
    // somewhere else by setting PULSEBACK_DEFAULT_BASE_URL at compile time.
    let url_str = std::option_env!("PULSEBACK_DEFAULT_BASE_URL")
        .unwrap_or("https://api.pulseback.me");
    Url::parse(url_str).expect("DEFAULT_BASE_URL")
});

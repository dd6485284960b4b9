use secstr::SecUtf8;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_github_api")]
    pub github_api: String,
    #[serde(default, deserialize_with = "deserialize_opt_secutf8")]
    pub github_token: Option<SecUtf8>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

fn deserialize_opt_secutf8<'de, D>(de: D) -> Result<Option<SecUtf8>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(|o| o.map(SecUtf8::from))
}

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    http::HttpClient,
    provider::{DEFAULT_API_URL, GitHubProvider, RepoId},
    runtime::Runtime,
};

/// Project whose releases the site presents.
pub const DEFAULT_REPO: &str = "Anneardysa/ArdysaModsTools";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub repo: RepoId,
    pub http_client: HttpClient,
    pub provider: GitHubProvider,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, repo: RepoId, api_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
        }

        let client = Client::builder()
            .user_agent("ghsite-cli")
            .default_headers(headers)
            .build()?;

        let http_client = HttpClient::new(client);
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let provider = GitHubProvider::from_http_client(http_client.clone(), &api_url);
        debug!("Using API at {} for {}", provider.api_url(), repo);

        Ok(Self {
            runtime,
            repo,
            http_client,
            provider,
        })
    }
}

/// Keeps the first 8 and last 4 characters of long tokens.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

// API client module: a small blocking HTTP client for one WordPress site.
// It creates draft posts through the core REST API and sets the article
// description through the site's custom plugin endpoint.

use crate::config::Credentials;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Every request gives up after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
const ACF_PATH: &str = "/wp-json/frebull/v1/acf";

/// The two remote operations a push needs. `WpClient` is the real
/// implementation; tests substitute a recording fake.
pub trait Publisher {
    /// Create a post in draft status and return its id.
    fn create_draft_post(&self, title: &str, content_html: &str) -> Result<u64>;

    /// Attach the article description custom field to an existing post.
    fn set_article_description(&self, post_id: u64, description: &str) -> Result<()>;
}

/// Body of `POST /wp-json/wp/v2/posts`.
#[derive(Serialize, Debug)]
pub struct CreatePostRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub status: &'a str,
}

/// The only part of the created post we read back.
#[derive(Deserialize, Debug)]
pub struct CreatedPost {
    pub id: u64,
}

/// Body of `POST /wp-json/frebull/v1/acf`.
#[derive(Serialize, Debug)]
pub struct ArticleDescriptionRequest<'a> {
    pub post_id: u64,
    pub article_description: &'a str,
}

/// Holds the reqwest blocking client, reused for every call in a run,
/// together with the Basic auth pair.
#[derive(Clone)]
pub struct WpClient {
    client: Client,
    posts_url: String,
    acf_url: String,
    username: String,
    app_password: String,
}

impl WpClient {
    pub fn new(creds: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(WpClient {
            client,
            posts_url: format!("{}{}", creds.site_url, POSTS_PATH),
            acf_url: format!("{}{}", creds.site_url, ACF_PATH),
            username: creds.username.clone(),
            app_password: creds.app_password.clone(),
        })
    }

    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }

    pub fn acf_url(&self) -> &str {
        &self.acf_url
    }

    /// POST `body` as JSON with Basic auth. Any non-2xx status becomes an
    /// error carrying the status and the response body.
    fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T, what: &str) -> Result<Response> {
        let res = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.app_password))
            .json(body)
            .send()
            .with_context(|| format!("Failed to send {} request to {}", what, url))?;
        let status = res.status();
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            anyhow::bail!("{} failed: {} - {}", what, status, txt);
        }
        Ok(res)
    }
}

impl Publisher for WpClient {
    fn create_draft_post(&self, title: &str, content_html: &str) -> Result<u64> {
        let req = CreatePostRequest {
            title,
            content: content_html,
            status: "draft",
        };
        tracing::debug!(url = %self.posts_url, title, "creating draft post");
        let res = self.post_json(&self.posts_url, &req, "Create post")?;
        let created: CreatedPost = res.json().context("Parsing create post response json")?;
        Ok(created.id)
    }

    fn set_article_description(&self, post_id: u64, description: &str) -> Result<()> {
        let req = ArticleDescriptionRequest {
            post_id,
            article_description: description,
        };
        tracing::debug!(url = %self.acf_url, post_id, "setting article description");
        self.post_json(&self.acf_url, &req, "Set article description")?;
        Ok(())
    }
}

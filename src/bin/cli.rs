// TVDB Client - Rust client for TheTVDB JSON API
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tvdb_client::api::client::DEFAULT_BASE_URL;
use tvdb_client::{ClientConfig, LoginCredentials, Method, TvdbClient};

#[derive(Parser)]
#[command(name = "tvdb-cli")]
#[command(about = "TheTVDB CLI - Desktop testing tool", long_about = None)]
struct Cli {
    /// API key used to log in
    #[arg(long, env = "TVDB_API_KEY")]
    api_key: Option<String>,

    /// User key (user-scoped routes only)
    #[arg(long, env = "TVDB_USER_KEY")]
    user_key: Option<String>,

    /// Username (user-scoped routes only)
    #[arg(long, env = "TVDB_USERNAME")]
    username: Option<String>,

    /// Existing bearer token, skips login
    #[arg(long, env = "TVDB_TOKEN")]
    token: Option<String>,

    /// Accepted language, most preferred first (repeatable)
    #[arg(short, long = "language", default_value = "en")]
    languages: Vec<String>,

    /// API version (x.y.z)
    #[arg(long, default_value = tvdb_client::api::credentials::DEFAULT_VERSION)]
    api_version: String,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a path and print the decoded payload, errors and links
    Get { path: String },
    /// GET a path and print status and body untouched
    Raw { path: String },
    /// HEAD a path and print the response headers
    Headers { path: String },
    /// List available languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::builder()
        .base_url(cli.base_url.clone())
        .version(cli.api_version.clone())
        .languages(cli.languages.clone())
        .build();
    let mut client = TvdbClient::new(config).context("Failed to create client")?;

    if let Some(token) = cli.token {
        client.set_token(token);
    } else if let Some(api_key) = cli.api_key {
        let mut credentials = LoginCredentials::new(api_key);
        if let (Some(username), Some(user_key)) = (cli.username, cli.user_key) {
            credentials = credentials.with_user(username, user_key);
        }
        client.login(&credentials).await.context("Login failed")?;
    }

    match cli.command {
        Commands::Get { path } => {
            let envelope = client
                .fetch_envelope(Method::GET, &path)
                .await
                .with_context(|| format!("GET {} failed", path))?;
            println!("{}", serde_json::to_string_pretty(&envelope.payload)?);
            for (name, message) in &envelope.errors {
                eprintln!("error {}: {}", name, message);
            }
            for (relation, page) in &envelope.links {
                eprintln!("link {}: {}", relation, page);
            }
        }
        Commands::Raw { path } => {
            let response = client
                .perform_api_call(Method::GET, &path)
                .await
                .with_context(|| format!("GET {} failed", path))?;
            println!("HTTP {}", response.status);
            println!("{}", response.text());
        }
        Commands::Headers { path } => {
            let headers = client
                .request_headers(Method::HEAD, &path)
                .await
                .with_context(|| format!("HEAD {} failed", path))?;
            for (name, value) in &headers {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
        }
        Commands::Languages => {
            for language in client.languages().await.context("Failed to list languages")? {
                println!("{:>4}  {}  {}", language.id, language.abbreviation, language.name);
            }
        }
    }

    Ok(())
}

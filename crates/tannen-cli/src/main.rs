mod files;
mod session;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tannen_client::{BackendClient, Credentials, Session};
use tannen_core::constants::{REFRESH_DELAY, SIZE_WARN_THRESHOLD};
use tannen_core::models::{EndpointUploadResponse, PhotoListResponse};
use tannen_core::{Config, StorageBackend};
use tannen_intake::{IntakeTray, Rejection};
use tannen_storage::{create_store, PhotoStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tannen",
    version,
    about = "Decorate the virtual christmas tree with your photos"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account on the hosted backend
    Signup {
        email: String,
        /// Password; falls back to TANNEN_PASSWORD, then to a prompt
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in and store the session locally
    Login {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Upload a cover photo and body photos to the tree
    Upload {
        /// Cover photo shown at the apex of the tree
        #[arg(long)]
        top: PathBuf,
        /// Body photos, in display order
        body: Vec<PathBuf>,
        /// Accept photos over the size guideline without asking
        #[arg(long)]
        yes: bool,
        /// POST one multipart form to a tannen-api server instead of the
        /// hosted bucket
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },
    /// Print manual move-to-folder instructions instead of uploading
    Instructions {
        #[arg(long)]
        top: Option<PathBuf>,
        body: Vec<PathBuf>,
    },
    /// List stored photo names
    List {
        /// Read from a tannen-api server instead of the hosted bucket
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Signup { email, password } => signup(&config, email, password).await,
        Command::Login { email, password } => login(&config, email, password).await,
        Command::Logout => logout(&config).await,
        Command::Whoami => whoami(&config).await,
        Command::Upload {
            top,
            body,
            yes,
            endpoint,
        } => upload(&config, &top, &body, yes, endpoint).await,
        Command::Instructions { top, body } => instructions(&config, top.as_deref(), &body),
        Command::List { endpoint } => list(&config, endpoint).await,
    }
}

fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if let Ok(password) = std::env::var("TANNEN_PASSWORD") {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read password")?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

async fn signup(config: &Config, email: String, password: Option<String>) -> Result<()> {
    let client = BackendClient::from_config(config)?;
    let credentials = Credentials::new(email, resolve_password(password)?);

    client.sign_up(&credentials).await?;
    println!("Account created. Check your email for the confirmation link before logging in.");
    Ok(())
}

async fn login(config: &Config, email: String, password: Option<String>) -> Result<()> {
    let client = BackendClient::from_config(config)?;
    let credentials = Credentials::new(email, resolve_password(password)?);

    let new_session = client.sign_in(&credentials).await?;
    session::save(&new_session)?;

    println!(
        "Signed in as {}.",
        new_session.email.as_deref().unwrap_or("(no email)")
    );
    Ok(())
}

async fn logout(config: &Config) -> Result<()> {
    match session::load()? {
        Some(current) => {
            let client = BackendClient::from_config(config)?;
            // Clear the local session even if the backend call fails; the
            // token simply expires on its own.
            if let Err(err) = client.sign_out(&current).await {
                eprintln!("Warning: sign-out request failed: {}", err);
            }
            session::clear()?;
            println!("Signed out.");
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

async fn whoami(config: &Config) -> Result<()> {
    let current = session::require()?;
    let client = BackendClient::from_config(config)?;
    let user = client.get_user(&current).await?;

    println!(
        "{} ({})",
        user.email.as_deref().unwrap_or("(no email)"),
        user.id
    );
    Ok(())
}

/// Asks on stderr; used for every photo over the size guideline.
fn confirm_policy(assume_yes: bool) -> impl FnMut(&str, usize) -> bool {
    move |file_name: &str, size: usize| {
        if assume_yes {
            return true;
        }
        eprint!(
            "{} is {} KiB, over the {} KiB guideline; large photos can make the tree stutter. Continue? [y/N] ",
            file_name,
            size / 1024,
            SIZE_WARN_THRESHOLD / 1024
        );
        std::io::stderr().flush().ok();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

fn fill_tray(top: Option<&Path>, body: &[PathBuf], assume_yes: bool) -> Result<IntakeTray> {
    let mut tray = IntakeTray::new();
    let mut confirm = confirm_policy(assume_yes);

    if let Some(top) = top {
        let candidate = files::read_candidate(top)?;
        if let Err(rejection) = tray.set_top(candidate, &mut confirm) {
            match rejection {
                Rejection::NotAnImage { .. } => bail!("{}", rejection),
                Rejection::Declined { .. } => bail!("Cover photo declined; nothing to upload"),
            }
        }
    }

    let mut candidates = Vec::with_capacity(body.len());
    for path in body {
        candidates.push(files::read_candidate(path)?);
    }

    for rejection in tray.add_body(candidates, &mut confirm) {
        eprintln!("Skipped: {}", rejection);
    }

    Ok(tray)
}

/// Open the configured photo store. The bucket backend needs the stored
/// session; the local backend writes straight into the photos directory.
async fn open_store(config: &Config) -> Result<Arc<dyn PhotoStore>> {
    let session: Option<Session> = match config.storage_backend {
        StorageBackend::Bucket => Some(session::require()?),
        StorageBackend::Local => None,
    };
    Ok(create_store(config, session.as_ref()).await?)
}

async fn upload(
    config: &Config,
    top: &Path,
    body: &[PathBuf],
    assume_yes: bool,
    endpoint: Option<String>,
) -> Result<()> {
    let mut tray = fill_tray(Some(top), body, assume_yes)?;

    if let Some(endpoint) = endpoint {
        let count = post_to_endpoint(&endpoint, &tray).await?;
        println!("Uploaded 1 cover photo and {} body photos to {}.", count, endpoint);
        return Ok(());
    }

    let store = open_store(config).await?;

    match tray.submit(store.as_ref()).await {
        Ok(report) => {
            println!(
                "Uploaded 1 cover photo and {} body photos.",
                report.body_count
            );

            // Give the backend a moment before re-listing, the same pause
            // the web flow takes before reloading the view.
            tokio::time::sleep(REFRESH_DELAY).await;
            match store.list().await {
                Ok(photos) => {
                    println!("Stored photos: {}", photos.join(", "));
                }
                Err(err) => eprintln!("Warning: could not refresh the photo list: {}", err),
            }
            Ok(())
        }
        Err(err) => {
            let hint = err.hint().map(|h| format!(" ({})", h)).unwrap_or_default();
            bail!("{}{}", err, hint);
        }
    }
}

/// The alternate persistence path: bundle everything into one multipart
/// POST against the upload endpoint.
async fn post_to_endpoint(endpoint: &str, tray: &IntakeTray) -> Result<usize> {
    let mut form = reqwest::multipart::Form::new();

    if let Some(top) = tray.top() {
        form = form.part(
            "top",
            reqwest::multipart::Part::bytes(top.bytes().to_vec())
                .file_name(top.file_name().to_string())
                .mime_str(top.content_type())?,
        );
    }

    for (index, photo) in tray.body().iter().enumerate() {
        form = form.part(
            format!("photo_{}", index + 1),
            reqwest::multipart::Part::bytes(photo.bytes().to_vec())
                .file_name(photo.file_name().to_string())
                .mime_str(photo.content_type())?,
        );
    }

    let url = format!("{}/api/upload-photos", endpoint.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Upload endpoint returned {}", status);
    }

    let body: EndpointUploadResponse = response
        .json()
        .await
        .context("Unexpected response from the upload endpoint")?;
    Ok(body.count)
}

fn instructions(config: &Config, top: Option<&Path>, body: &[PathBuf]) -> Result<()> {
    let tray = fill_tray(top, body, true)?;

    match tray.move_instructions(&config.photos_dir) {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => bail!("Select at least one photo first"),
    }
}

async fn list(config: &Config, endpoint: Option<String>) -> Result<()> {
    let photos = match endpoint {
        Some(endpoint) => {
            let url = format!("{}/api/photos", endpoint.trim_end_matches('/'));
            let response: PhotoListResponse = reqwest::Client::new()
                .get(&url)
                .send()
                .await
                .with_context(|| format!("Failed to reach {}", url))?
                .error_for_status()?
                .json()
                .await?;
            response.photos
        }
        None => {
            let store = open_store(config).await?;
            store.list().await?
        }
    };

    if photos.is_empty() {
        println!("No photos stored yet.");
    } else {
        for name in photos {
            println!("{}", name);
        }
    }
    Ok(())
}

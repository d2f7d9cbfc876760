#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Assemble a directory from a JSON fixture and print the published view
//! state as JSON.
//!
//! # Examples
//! ```sh
//! CONTACT_DIRECTORY_GROUPING_FIELD=name \
//!   cargo run --manifest-path directory/Cargo.toml --bin directory-snapshot -- \
//!   --fixture-path directory/fixtures/contacts.json
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_directory::DirectorySettings;
use contact_directory::domain::DirectoryService;
use contact_directory::domain::ports::ContactSource;
use contact_directory::inbound::DirectoryScreen;
use contact_directory::outbound::ContactFixture;

#[tokio::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load_from_iter(std::env::args_os())
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let fixture_path = Utf8PathBuf::try_from(settings.fixture_path())
        .map_err(|error| io::Error::other(format!("fixture path: {error}")))?;

    let fixture = ContactFixture::load(&fixture_path).map_err(io::Error::other)?;
    let directory = Arc::new(fixture.into_directory());
    let service = settings
        .configure(DirectoryService::builder(
            Arc::clone(&directory) as Arc<dyn ContactSource>
        ))
        .map_err(io::Error::other)?
        .build();

    let screen = DirectoryScreen::open(service, &*directory)
        .await
        .map_err(io::Error::other)?;
    let Some(view) = screen.view_state() else {
        return Err(io::Error::other("directory session published no snapshot"));
    };
    info!(
        fixture = %fixture_path,
        sections = view.sections().len(),
        "directory snapshot assembled"
    );

    screen.close().await;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &*view).map_err(io::Error::other)?;
    writeln!(stdout)?;
    Ok(())
}

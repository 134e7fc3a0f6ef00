//! gbsproj-migrate - upgrade a project file to the current schema.
//!
//! Usage: `gbsproj-migrate <input.gbsproj> [output.gbsproj]`
//!
//! Without an output path the input file is rewritten in place.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gbsproj_engine::infrastructure::settings::RunnerSettings;
use gbsproj_engine::{Migrator, ProjectLoader};

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gbsproj_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: gbsproj-migrate <input.gbsproj> [output.gbsproj]");
    };
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| input.clone());
    if args.next().is_some() {
        bail!("usage: gbsproj-migrate <input.gbsproj> [output.gbsproj]");
    }

    let settings = RunnerSettings::from_env();
    let catalog = settings
        .load_catalog()
        .context("Failed to load command catalog")?;
    let migrator = Migrator::new(&catalog);
    tracing::info!(
        current = %migrator.current_version(),
        commands = catalog.len(),
        "Starting gbsproj migration"
    );

    let loader = ProjectLoader::new(migrator).with_unique_symbols(settings.ensure_unique_symbols);
    let report = loader
        .upgrade_file(&input, &output)
        .with_context(|| format!("Failed to migrate {}", input.display()))?;

    if report.is_noop() {
        tracing::info!(version = %report.to, "Project already up to date");
    } else {
        tracing::info!(
            from = %report.from,
            to = %report.to,
            stages = ?report.applied,
            events = report.events,
            output = %output.display(),
            "Project migrated"
        );
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

mod popup;
mod view;

use clap::{Parser, Subcommand, ValueEnum};
use ninja_core::{
    config::{self, BundleSourceKind, Config},
    shellexpand,
    traits::BundleSource,
};
use ninja_locale::{
    system_languages, BundleMessages, FsBundleSource, HttpBundleSource, LocaleResolver,
};
use ninja_platform::{ConsoleNotifier, FileTokenCache, JsonFileSettingsStore, TabRegistry};
use popup::{Popup, PopupServices};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "ninja",
    version,
    about = "Schedule Ninja — popup settings and Google Calendar sign-in"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the popup.
    Show,
    /// Flip a preference switch.
    ///
    /// No browser tabs are attached to the CLI, so the auto-detect broadcast
    /// reaches no content scripts; only the stored setting changes.
    Toggle {
        #[arg(value_enum)]
        which: ToggleArg,
    },
    /// Set the display language (e.g. `en`, `ko`).
    Language { locale: String },
    /// Set the calendar timezone (IANA id, e.g. `Asia/Seoul`).
    Timezone { timezone: String },
    /// Sign in to Google Calendar.
    Login,
    /// Sign out and clear cached tokens.
    Disconnect {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Resolve a message key in the current locale.
    T {
        key: String,
        /// Positional substitutions for `$1`..`$9`.
        #[arg(trailing_var_arg = true)]
        substitutions: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ToggleArg {
    Source,
    AutoDetect,
    DarkMode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.ninja.log_level)),
        )
        .init();

    let mut popup = build_popup(&cfg).await?;
    popup.open().await?;

    match cli.command {
        Commands::Show => {}
        Commands::Toggle { which } => {
            match which {
                ToggleArg::Source => popup.toggle_source_info().await?,
                ToggleArg::AutoDetect => popup.toggle_auto_detect().await?,
                ToggleArg::DarkMode => popup.toggle_dark_mode().await?,
            };
        }
        Commands::Language { locale } => {
            popup.update_language(&locale).await?;
        }
        Commands::Timezone { timezone } => {
            if timezone.trim().is_empty() {
                anyhow::bail!("no timezone provided. Usage: ninja timezone <IANA id>");
            }
            popup.update_timezone(&timezone).await?;
        }
        Commands::Login => {
            if !popup.login().await {
                anyhow::bail!(
                    "sign-in failed. Set {} to an OAuth token and retry.",
                    cfg.auth.token_env
                );
            }
        }
        Commands::Disconnect { yes } => {
            let confirmed = yes || confirm(&popup.confirm_prompt())?;
            popup.disconnect(confirmed).await?;
        }
        Commands::T { key, substitutions } => {
            let subs: Vec<&str> = substitutions.iter().map(String::as_str).collect();
            println!("{}", popup.locale().resolve_message(&key, &subs));
            return Ok(());
        }
    }

    print!("{}", popup.view().render());
    Ok(())
}

/// Build a popup session from config.
async fn build_popup(cfg: &Config) -> anyhow::Result<Popup> {
    let source: Arc<dyn BundleSource> = match cfg.locale.source {
        BundleSourceKind::Fs => {
            Arc::new(FsBundleSource::new(shellexpand(&cfg.locale.locales_dir)))
        }
        BundleSourceKind::Http => {
            if cfg.locale.base_url.is_empty() {
                anyhow::bail!(
                    "locale source is http but base_url is empty. Set it in config.toml."
                );
            }
            Arc::new(HttpBundleSource::new(cfg.locale.base_url.clone()))
        }
    };

    let mut resolver = LocaleResolver::new(source.clone(), cfg.locale.fallback.clone());
    if !cfg.locale.native_default.is_empty() {
        match BundleMessages::load(source.as_ref(), &cfg.locale.native_default).await {
            Ok(native) => resolver = resolver.with_native(Arc::new(native)),
            Err(e) => warn!("native messages unavailable: {e}"),
        }
    }

    let services = PopupServices {
        settings: Arc::new(JsonFileSettingsStore::new(cfg.settings_path())?),
        identity: Arc::new(FileTokenCache::new(cfg.token_path(), cfg.auth.token_env.clone())),
        // Host tabs are not attached; broadcasts from this session go nowhere.
        tabs: Arc::new(TabRegistry::new()),
        notifier: Arc::new(ConsoleNotifier),
    };

    Ok(Popup::new(services, resolver)
        .with_ui_languages(system_languages())
        .with_transition_delay(Duration::from_millis(cfg.popup.transition_delay_ms)))
}

/// Ask a yes/no question on the terminal.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

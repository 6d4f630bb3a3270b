use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use galeria::application::{Backoff, EnlargedViewUseCase, LoadGalleryUseCase, SingleImageLoader};
use galeria::infrastructure::{
    AltTextCatalog, AppConfig, CliArgs, GallerySettings, HttpImageFetcher, HttpMetadataClient,
    MemoryImageCache, StorageManager,
};
use galeria::presentation::widgets::ImageManager;
use galeria::presentation::{App, LogRenderer};

fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let file_layer = match config.effective_log_path() {
        Some(log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(false),
            )
        }
        None => None,
    };

    // The TUI owns the terminal, so stderr only gets logs in headless mode.
    let stderr_layer = headless.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if let Some(log_path) = config.effective_log_path() {
        info!(path = %log_path.display(), "Logging initialized");
    }

    Ok(())
}

fn load_alt_texts(settings: &GallerySettings) -> AltTextCatalog {
    let Some(path) = &settings.alt_text_path else {
        return AltTextCatalog::default();
    };
    AltTextCatalog::load(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring alt-text file");
        AltTextCatalog::default()
    })
}

fn build_use_cases(
    settings: &GallerySettings,
) -> Result<(Arc<LoadGalleryUseCase>, Arc<EnlargedViewUseCase>)> {
    let memory_cache = Arc::new(MemoryImageCache::new(settings.memory_cache_size));
    let fetcher = Arc::new(HttpImageFetcher::new(settings.request_timeout(), memory_cache)?);
    let loader = Arc::new(SingleImageLoader::new(
        fetcher,
        settings.strategy(),
        Backoff::new(settings.backoff_policy()),
    ));

    let metadata = HttpMetadataClient::new(settings.metadata_url(), settings.request_timeout())?
        .with_alt_texts(Arc::new(load_alt_texts(settings)));

    info!(
        url = %metadata.url(),
        source = settings.strategy().label(),
        batch_size = settings.batch_size,
        "Gallery configured"
    );

    let load_gallery = LoadGalleryUseCase::new(
        Arc::new(metadata),
        Arc::clone(&loader),
        settings.coordinator(),
    );

    Ok((
        Arc::new(load_gallery),
        Arc::new(EnlargedViewUseCase::new(loader)),
    ))
}

async fn run_headless(load_gallery: &LoadGalleryUseCase) -> Result<()> {
    let renderer = LogRenderer::new();
    let result = load_gallery.execute(&renderer).await;

    for line in renderer.summary_lines() {
        println!("{line}");
    }

    match result {
        Ok(summary) => {
            println!("{summary}");
            Ok(())
        }
        Err(e) => Err(eyre!(e.user_message())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config, args.headless)?;
    info!(version = galeria::VERSION, "Starting Galeria");

    let settings = config.gallery.clone().sanitized();
    let (load_gallery, enlarged_view) = build_use_cases(&settings)?;

    if args.headless {
        return run_headless(&load_gallery).await;
    }

    let mut terminal = ratatui::init();

    let images = ImageManager::new();
    let app = App::new(load_gallery, enlarged_view, images);

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}

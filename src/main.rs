mod api;
mod config;
mod error;
mod frame;
mod scene;
mod server;

use anyhow::Context;
use api::OpenAiClient;
use clap::Parser;
use config::Settings;
use error::Result;
use frame::FrameStore;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "storyframes")]
#[command(about = "Generate storyboard frames from a story using AI", long_about = None)]
struct Args {
    /// Story text to break into frames
    #[arg(short, long)]
    text: Option<String>,

    /// Path to a text file containing the story
    #[arg(short, long)]
    file: Option<String>,

    /// Directory the numbered frame files are written to
    #[arg(short = 'd', long, default_value = frame::DEFAULT_FRAMES_DIR)]
    frames_dir: String,

    /// Image resolution requested from the image backend
    #[arg(short, long, default_value = frame::DEFAULT_IMAGE_SIZE)]
    size: String,

    /// OpenAI API key (overrides OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Run the HTTP service instead of a one-shot generation
    #[arg(long)]
    serve: bool,

    /// Port for the HTTP service
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::from_env();
    if args.api_key.is_some() {
        settings.api_key = args.api_key.clone();
    }

    let client = match settings.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let store = FrameStore::new(&args.frames_dir);

    if args.serve {
        let state = server::AppState {
            client: Arc::new(client),
            store,
            image_size: args.size.clone(),
        };
        server::serve(state, args.port).await?;
        return Ok(());
    }

    let story = if let Some(text) = args.text {
        text
    } else if let Some(file_path) = args.file {
        tokio::fs::read_to_string(&file_path)
            .await
            .context(format!("Story file not found: {}", file_path))?
    } else {
        eprintln!("Error: Either --text or --file must be provided");
        std::process::exit(1);
    };

    info!("Input story length: {} characters", story.len());

    match run_generation(&client, &store, &args.size, &story).await {
        Ok(num_scenes) => {
            info!(
                "Generated {} frames in the {}/ directory",
                num_scenes,
                store.dir().display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Frame generation failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Generate frames for a story and return the number of scenes created.
async fn run_generation(
    client: &OpenAiClient,
    store: &FrameStore,
    size: &str,
    story: &str,
) -> Result<usize> {
    info!("Step 1/2: Breaking story into scenes...");
    let scenes = scene::break_story_into_scenes(story, client).await?;

    info!("Step 2/2: Generating an image for each scene...");
    let scene_count = scenes.len();
    for (idx, scene_text) in scenes.iter().enumerate() {
        info!("[scene {}/{}] {}", idx + 1, scene_count, scene_text);
        frame::render_frame(scene_text, Some(idx + 1), size, client, store).await?;
    }

    Ok(scene_count)
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scenevox_speech::playback::{AudioOutput, PlaybackController, SilentOutput};
use scenevox_speech::providers::gemini::GeminiTTS;
use scenevox_speech::{Gender, TTSSpeechProvider, VoiceOption};
use scenevox_studio::{Studio, StudioConfig};
use std::path::PathBuf;
use std::sync::Arc;

mod session;

#[derive(Parser)]
#[command(name = "scenevox")]
#[command(about = "SceneVox - Narrate scenes with text-to-speech", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available voices grouped by gender
    Voices,
    /// Edit, generate, play and export scenes interactively
    Session {
        /// Path to a TOML studio configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory WAV files are written to (overrides the configuration)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Play audio silently instead of opening the sound device
        #[arg(long)]
        no_audio: bool,
    },
    /// Generate every scene and save them all as WAV files
    Render {
        /// Path to a TOML studio configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory WAV files are written to (overrides the configuration)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Voice to narrate with (overrides the configuration)
        #[arg(short, long)]
        voice: Option<String>,

        /// Play the rendered scenes in order once they are saved
        #[arg(long)]
        play: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Voices => list_voices(),
        Commands::Session {
            config,
            out_dir,
            no_audio,
        } => {
            let config = load_config(config, out_dir, None)?;
            let studio = build_studio(&config, audio_output(no_audio))?;
            session::Session::new(studio, config.output_dir).run().await?;
        }
        Commands::Render {
            config,
            out_dir,
            voice,
            play,
        } => {
            let config = load_config(config, out_dir, voice)?;
            render(config, play).await?;
        }
    }

    Ok(())
}

fn list_voices() {
    let default = VoiceOption::default();
    for gender in Gender::all() {
        println!("{gender}:");
        for voice in VoiceOption::by_gender(*gender) {
            let marker = if *voice == default { " (default)" } else { "" };
            println!("  {voice}{marker}");
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    voice: Option<String>,
) -> Result<StudioConfig> {
    let mut config = match path {
        Some(path) => StudioConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StudioConfig::default(),
    };
    if let Some(out_dir) = out_dir {
        config.output_dir = out_dir;
    }
    if let Some(voice) = voice {
        config.voice = voice;
        config.validate()?;
    }
    Ok(config)
}

fn audio_output(no_audio: bool) -> Arc<dyn AudioOutput> {
    #[cfg(feature = "audio")]
    if !no_audio {
        return Arc::new(scenevox_speech::playback::RodioOutput::new());
    }
    #[cfg(not(feature = "audio"))]
    if !no_audio {
        log::warn!("Built without audio support; playback will be silent");
    }
    Arc::new(SilentOutput::new())
}

fn build_studio(config: &StudioConfig, output: Arc<dyn AudioOutput>) -> Result<Arc<Studio>> {
    let provider = GeminiTTS::new(config.provider.clone().with_env_api_key())
        .context("Failed to create the Gemini client")?;
    if !provider.has_api_key() {
        log::warn!("No API key in the environment; generation will fail until API_KEY is set");
    }

    let player =
        Arc::new(PlaybackController::new(output).with_sample_rate(provider.default_sample_rate()));
    let studio = Studio::from_config(config, Arc::new(provider), player)?;
    Ok(Arc::new(studio))
}

async fn render(config: StudioConfig, play: bool) -> Result<()> {
    let output: Arc<dyn AudioOutput> = if play {
        audio_output(false)
    } else {
        Arc::new(SilentOutput::new())
    };
    let studio = build_studio(&config, output)?;
    log::info!(
        "Rendering with voice {} into {}",
        studio.selected_voice().await,
        config.output_dir.display()
    );

    let report = studio.generate_all().await;
    for id in &report.generated {
        println!("Generated scene {id}");
    }
    for (id, e) in &report.failed {
        eprintln!("Scene {id} failed: {e}");
    }

    let saved = studio.download_all(&config.output_dir).await?;
    for path in &saved {
        println!("Saved {}", path.display());
    }

    if play {
        for scene in studio.scenes().await {
            if !scene.has_audio() {
                continue;
            }
            println!("Playing scene {}", scene.id());
            studio.play_scene(scene.id()).await?;
            studio.player().wait_until_idle().await;
        }
    }

    if !report.is_success() {
        anyhow::bail!("{} scene(s) failed to generate", report.failed.len());
    }
    Ok(())
}

//! Interactive session: one command per line on stdin.

use anyhow::{Result, bail};
use scenevox_studio::{SceneStatus, Studio};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  list                 Show scenes and their status
  voices               List voices by gender
  voice <name>         Select the voice used for generation
  preview <name>       Play the preview sentence in a voice
  add <id> <text>      Append a scene
  edit <id> <text>     Replace a scene's text (clears its audio)
  generate <id>        Synthesize a scene in the background
  generate-all         Synthesize every scene without audio, in order
  play <id>            Play a scene, or stop it if it is playing
  stop                 Stop playback
  download <id>        Save a scene as <id>.wav
  download-all         Save every scene that has audio
  help                 Show this help
  quit                 Leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Voices,
    Voice(String),
    Preview(String),
    Add { id: String, text: String },
    Edit { id: String, text: String },
    Generate(String),
    GenerateAll,
    Play(String),
    Stop,
    Download(String),
    DownloadAll,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        let arg = |usage: &str| -> Result<String> {
            if rest.is_empty() {
                bail!("Usage: {usage}");
            }
            Ok(rest.to_string())
        };
        let id_and_text = |usage: &str| -> Result<(String, String)> {
            match rest.split_once(char::is_whitespace) {
                Some((id, text)) if !text.trim().is_empty() => {
                    Ok((id.to_string(), text.trim().to_string()))
                }
                _ => bail!("Usage: {usage}"),
            }
        };

        let command = match name {
            "list" | "ls" => Command::List,
            "voices" => Command::Voices,
            "voice" => Command::Voice(arg("voice <name>")?),
            "preview" => Command::Preview(arg("preview <name>")?),
            "add" => {
                let (id, text) = id_and_text("add <id> <text>")?;
                Command::Add { id, text }
            }
            "edit" => {
                let (id, text) = id_and_text("edit <id> <text>")?;
                Command::Edit { id, text }
            }
            "generate" | "gen" => Command::Generate(arg("generate <id>")?),
            "generate-all" => Command::GenerateAll,
            "play" => Command::Play(arg("play <id>")?),
            "stop" => Command::Stop,
            "download" => Command::Download(arg("download <id>")?),
            "download-all" => Command::DownloadAll,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command '{other}'. Type 'help' for a list of commands."),
        };
        Ok(command)
    }
}

pub struct Session {
    studio: Arc<Studio>,
    out_dir: PathBuf,
}

impl Session {
    pub fn new(studio: Arc<Studio>, out_dir: PathBuf) -> Self {
        Self { studio, out_dir }
    }

    pub async fn run(&self) -> Result<()> {
        println!("{HELP}");
        self.print_scenes().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.execute(command).await {
                eprintln!("Error: {e}");
            }
        }

        self.studio.stop().await;
        Ok(())
    }

    async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::List => self.print_scenes().await,
            Command::Voices => {
                let selected = self.studio.selected_voice().await;
                for (gender, voices) in self.studio.voices() {
                    println!("{gender}:");
                    for voice in voices {
                        let marker = if voice == selected { "*" } else { " " };
                        println!("  {marker} {voice}");
                    }
                }
            }
            Command::Voice(name) => {
                let voice = self.studio.select_voice(&name).await?;
                println!("Voice set to {voice}");
            }
            Command::Preview(name) => {
                let studio = Arc::clone(&self.studio);
                tokio::spawn(async move {
                    if let Err(e) = studio.preview_voice(&name).await {
                        eprintln!("Preview failed: {e}");
                    }
                });
            }
            Command::Add { id, text } => {
                self.studio.add_scene(id.as_str(), text).await?;
                println!("Added scene {id}");
            }
            Command::Edit { id, text } => {
                self.studio.edit_text(&id, text).await?;
                println!("Updated scene {id}");
            }
            Command::Generate(id) => {
                let studio = Arc::clone(&self.studio);
                println!("Generating scene {id}...");
                tokio::spawn(async move {
                    match studio.generate(&id).await {
                        Ok(()) => println!("Scene {id} is ready"),
                        Err(e) => eprintln!("Scene {id} failed: {e}"),
                    }
                });
            }
            Command::GenerateAll => {
                let studio = Arc::clone(&self.studio);
                println!("Generating all scenes...");
                tokio::spawn(async move {
                    let report = studio.generate_all().await;
                    println!(
                        "Generated {}, skipped {}, failed {}",
                        report.generated.len(),
                        report.skipped.len(),
                        report.failed.len()
                    );
                    for (id, e) in &report.failed {
                        eprintln!("  {id}: {e}");
                    }
                });
            }
            Command::Play(id) => {
                if self.studio.toggle_scene(&id).await? {
                    println!("Playing scene {id}");
                } else {
                    println!("Stopped scene {id}");
                }
            }
            Command::Stop => self.studio.stop().await,
            Command::Download(id) => {
                let path = self.studio.download(&id, &self.out_dir).await?;
                println!("Saved {}", path.display());
            }
            Command::DownloadAll => {
                let saved = self.studio.download_all(&self.out_dir).await?;
                println!("Saved {} file(s) to {}", saved.len(), self.out_dir.display());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    async fn print_scenes(&self) {
        println!("Voice: {}", self.studio.selected_voice().await);
        for scene in self.studio.scenes().await {
            let status = match scene.status() {
                SceneStatus::Idle => "idle",
                SceneStatus::Generating => "generating",
                SceneStatus::Ready => "ready",
            };
            let playing = if scene.is_playing() { " (playing)" } else { "" };
            let audio = scene
                .audio()
                .map(|a| format!(" [{:.1} KiB, {} ms]", a.size_kib(), a.duration_ms()))
                .unwrap_or_default();
            println!("  {:>4} {status}{playing}{audio}: {}", scene.id(), scene.text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("  stop  ".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!(
            "generate-all".parse::<Command>().unwrap(),
            Command::GenerateAll
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            "generate C3".parse::<Command>().unwrap(),
            Command::Generate("C3".to_string())
        );
        assert_eq!(
            "voice Kore".parse::<Command>().unwrap(),
            Command::Voice("Kore".to_string())
        );
        assert_eq!(
            "edit 2   Một câu mới cho cảnh này".parse::<Command>().unwrap(),
            Command::Edit {
                id: "2".to_string(),
                text: "Một câu mới cho cảnh này".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = "generate".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("Usage: generate <id>"));

        assert!("add C4".parse::<Command>().is_err());

        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("Unknown command 'dance'"));
    }
}

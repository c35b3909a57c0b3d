use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use conversor::converters::http::{BackendConfig, HttpConverter, DEFAULT_BACKEND_HOST};
use conversor::models::role::Role;
use conversor::models::turn::FileRef;
use conversor::providers::configs::{OpenAiConfig, DEFAULT_HOST, DEFAULT_MODEL};
use conversor::providers::openai::OpenAiProvider;
use conversor::session::ChatSession;

#[derive(Parser)]
#[command(author, version, about = "Assistente de conversão de arquivos", long_about = None)]
struct Cli {
    /// OpenAI API key (can also be set via OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model endpoint host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Conversion backend host
    #[arg(long, default_value = DEFAULT_BACKEND_HOST)]
    backend: String,

    /// Model to use
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .context("API key must be provided via --api-key or OPENAI_API_KEY")?;

    let provider = OpenAiProvider::new(OpenAiConfig::new(cli.host, api_key, cli.model))?;

    let converter = HttpConverter::new(BackendConfig::new(
        cli.backend,
        env::temp_dir().join("conversor"),
    ))?;

    let mut session = ChatSession::new(Box::new(provider), Box::new(converter));
    let mut rendered = 0;
    let mut staged: Vec<FileRef> = Vec::new();

    println!(
        "Assistente de conversão de arquivos {}",
        style("- \"sair\" encerra, \"/arquivo <caminho>\" anexa um arquivo").dim()
    );

    prompt()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        if input.eq_ignore_ascii_case("sair") {
            break;
        }

        if let Some(path) = input.strip_prefix("/arquivo ") {
            match read_file(path.trim()) {
                Ok(file) => {
                    staged.push(file);
                    // classify right away, but keep the file staged so the
                    // next text submission carries it
                    session.submit("", staged.clone()).await;
                    render_new(&session, &mut rendered);
                }
                Err(e) => {
                    eprintln!("{}", style(format!("não foi possível ler {}: {}", path, e)).red());
                }
            }
            prompt()?;
            continue;
        }

        if input.is_empty() {
            prompt()?;
            continue;
        }

        session.submit(input, std::mem::take(&mut staged)).await;
        render_new(&session, &mut rendered);
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("{} ", style(">").bold());
    io::stdout().flush()?;
    Ok(())
}

fn render_new(session: &ChatSession, rendered: &mut usize) {
    for turn in &session.turns()[*rendered..] {
        let label = match turn.role {
            Role::User => style("você".to_string()).green(),
            Role::Assistant => style("assistente".to_string()).cyan(),
            Role::Function => {
                style(turn.capability.clone().unwrap_or_else(|| "função".to_string())).yellow()
            }
        }
        .bold();

        println!("{}: {}", label, turn.content);
        if let Some(artifact) = &turn.artifact {
            println!("  {} {}", style("download:").dim(), artifact.path.display());
        }
    }
    *rendered = session.turns().len();
}

fn read_file(path: &str) -> Result<FileRef> {
    let data = std::fs::read(path)?;
    let name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("arquivo")
        .to_string();
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(FileRef::new(name, media_type, data))
}

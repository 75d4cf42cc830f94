use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::session::PromptState;

#[derive(Parser)]
#[command(name = "prompt-console")]
#[command(version = "0.1.0")]
#[command(about = "Manage projects and prompts on a remote console API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all projects
    List,
    /// Search projects by name or description
    Search {
        /// Query text; empty clears the filter
        query: String,
    },
    /// Create a new project
    Create {
        name: String,
        description: String,
    },
    /// Update an existing project
    Update {
        id: String,
        name: String,
        description: String,
    },
    /// Delete a project
    Delete {
        id: String,
    },
    /// Show a project's prompt details
    Show {
        id: String,
        /// Also fetch and print the prompt's credentials
        #[arg(long)]
        reveal: bool,
    },
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prompt_console=info")),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let console = Console::from_env().context("failed to initialize the console")?;

    match command {
        Commands::List => {
            list_projects(&console).await?;
        }
        Commands::Search { query } => {
            search_projects(&console, &query).await?;
        }
        Commands::Create { name, description } => {
            let project = console.store().create(&name, &description).await?;
            println!("Created project {} ({})", project.name, project.id);
        }
        Commands::Update { id, name, description } => {
            console.store().update(&id, &name, &description).await?;
            println!("Updated project {id}");
        }
        Commands::Delete { id } => {
            console.store().delete(&id).await?;
            println!("Deleted project {id}");
        }
        Commands::Show { id, reveal } => {
            show_project(&console, &id, reveal).await?;
        }
    }

    Ok(())
}

async fn list_projects(console: &Console) -> Result<()> {
    console.store().refresh().await?;
    let projects = console.store().projects();

    if projects.is_empty() {
        println!("No projects found");
        return Ok(());
    }
    for project in projects {
        println!(
            "{}  {}  {}  {}",
            project.id,
            project.name,
            project.description,
            project.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

async fn search_projects(console: &Console, query: &str) -> Result<()> {
    console.search().set_query(query).await?;
    let suggestions = console.search().suggestions();

    if suggestions.is_empty() {
        println!("No matches for \"{}\"", query.trim());
        return Ok(());
    }
    for project in suggestions {
        println!("{}  {}  {}", project.id, project.name, project.description);
    }
    Ok(())
}

async fn show_project(console: &Console, id: &str, reveal: bool) -> Result<()> {
    let session = console.open_project(id);
    session.load().await;

    match session.state() {
        PromptState::NoPrompt => {
            println!("Project {id} has no prompt");
        }
        PromptState::Viewing | PromptState::Editing => {
            if let Some(prompt) = session.prompt() {
                println!("Prompt: {} ({})", prompt.name, prompt.id);
                println!("Description: {}", prompt.description);
                println!("Confidence score: {}", prompt.confidence_score);

                if reveal {
                    let credentials = session.reveal_credentials().await?;
                    println!("Secret key: {}", credentials.secret_key);
                }
            }
        }
    }

    session.close();
    Ok(())
}

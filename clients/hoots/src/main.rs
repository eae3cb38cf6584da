use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use common::{
    config::ClientConfig,
    models::{Category, CommentDraft, Hoot, HootDraft, SignInForm, SignUpForm},
    storage::FileStorage,
};
use hoots::{AppController, View};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command-line front end for the hoots API
#[derive(Parser)]
#[command(name = "hoots", version, about)]
struct Cli {
    /// API base URL (overrides HOOTS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and sign in
    Signup {
        username: String,
        password: String,
        password_conf: String,
    },
    /// Sign in and store the session token
    Signin { username: String, password: String },
    /// Forget the stored session token
    Signout,
    /// Show the signed-in user
    Whoami,
    /// List hoots
    List,
    /// Show one hoot with its comments
    Show { id: String },
    /// Post a new hoot
    Create {
        title: String,
        text: String,
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// Edit one of your hoots
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Delete one of your hoots
    Delete { id: String },
    /// Comment on a hoot
    Comment { id: String, text: String },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = ClientConfig {
            token_path: config.token_path,
            ..ClientConfig::with_base_url(base_url)
        };
    }
    debug!("Using API at {}", config.base_url);

    let storage = Arc::new(FileStorage::new(&config.token_path));
    let mut app = AppController::new(&config, storage);

    match cli.command {
        Command::Signup {
            username,
            password,
            password_conf,
        } => {
            let form = SignUpForm {
                username,
                password,
                password_conf,
            };
            let user = app.sign_up(&form).await?;
            println!("Signed up as {}", user.username);
            print_view(&app);
        }
        Command::Signin { username, password } => {
            let user = app.sign_in(&SignInForm { username, password }).await?;
            println!("Signed in as {}", user.username);
            print_view(&app);
        }
        Command::Signout => {
            app.sign_out()?;
            println!("Signed out");
        }
        Command::Whoami => match app.session().get_user() {
            Some(user) => println!("{} ({})", user.username, user.id),
            None => println!("Not signed in"),
        },
        command => {
            app.start().await?;
            if !app.state().is_authenticated() {
                bail!("Not signed in; run `hoots signin` first");
            }
            run_authenticated(&mut app, command).await?;
            print_view(&app);
        }
    }

    Ok(())
}

async fn run_authenticated(app: &mut AppController, command: Command) -> Result<()> {
    match command {
        Command::List => app.navigate(View::HootList),
        Command::Show { id } => {
            app.show_hoot(&id).await?;
        }
        Command::Create {
            title,
            text,
            category,
        } => {
            let hoot = app.add_hoot(&HootDraft::new(title, text, category)).await?;
            println!("Created {}", hoot.id);
        }
        Command::Edit {
            id,
            title,
            text,
            category,
        } => {
            let current = app.show_hoot(&id).await?.clone();
            if !app.can_modify(&current) {
                bail!("Only the author can edit this hoot");
            }
            let mut draft = HootDraft::from(&current);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(text) = text {
                draft.text = text;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            app.update_hoot(&id, &draft).await?;
        }
        Command::Delete { id } => {
            let current = app.show_hoot(&id).await?.clone();
            if !app.can_modify(&current) {
                bail!("Only the author can delete this hoot");
            }
            let deleted = app.delete_hoot(&id).await?;
            println!("Deleted {}", deleted.id);
        }
        Command::Comment { id, text } => {
            app.show_hoot(&id).await?;
            app.add_comment(&CommentDraft::new(text)).await?;
        }
        Command::Signup { .. } | Command::Signin { .. } | Command::Signout | Command::Whoami => {}
    }
    Ok(())
}

fn print_view(app: &AppController) {
    match app.view() {
        View::Dashboard | View::HootList => match app.hoots() {
            Some(hoots) if hoots.is_empty() => println!("No hoots yet."),
            Some(hoots) => hoots.iter().for_each(|hoot| print_summary(app, hoot)),
            None => println!("Hoots not loaded."),
        },
        View::HootDetail(_) => {
            if let Some(hoot) = app.detail() {
                print_detail(app, hoot);
            }
        }
        View::Landing | View::SignIn | View::SignUp | View::NewHoot | View::EditHoot(_) => {}
    }
}

fn print_summary(app: &AppController, hoot: &Hoot) {
    let marker = if app.can_modify(hoot) { "*" } else { " " };
    println!(
        "{} {}  [{}] {} by {}",
        marker,
        hoot.id,
        hoot.category.as_str().to_uppercase(),
        hoot.title,
        hoot.author.username
    );
}

fn print_detail(app: &AppController, hoot: &Hoot) {
    println!("{}", hoot.category.as_str().to_uppercase());
    println!("{}", hoot.title);
    println!(
        "{} posted on {}",
        hoot.author.username,
        hoot.created_at.format("%Y-%m-%d")
    );
    println!();
    println!("{}", hoot.text);
    println!();
    println!("Comments");
    if hoot.comments.is_empty() {
        println!("  There are no comments.");
    }
    for comment in &hoot.comments {
        println!(
            "  {} posted on {}: {}",
            comment.author.username,
            comment.created_at.format("%Y-%m-%d"),
            comment.text
        );
    }
    if app.can_modify(hoot) {
        println!();
        println!("You can edit or delete this hoot.");
    }
}

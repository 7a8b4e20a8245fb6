use clap::{Parser, Subcommand};
use userboard::client::HttpUsersApi;
use userboard::config::{ServerConfig, ViewConfig};
use userboard::view::UserListView;
use userboard::{console, server};

/// With no subcommand the service is served, and the `serve` flags are
/// accepted directly.
#[derive(Parser)]
#[command(
    name = "userboard",
    version,
    about = "Users REST service and console view",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServerConfig,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the users API (default)
    Serve(ServerConfig),
    /// Open the users view against a running API
    View(ViewConfig),
}

impl Cli {
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().into_command() {
        Command::Serve(config) => server::run(config).await,
        Command::View(config) => {
            let mut view = UserListView::new(HttpUsersApi::new(&config.base_url));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console::run(&mut view, stdin, tokio::io::stdout()).await
        }
    }
}

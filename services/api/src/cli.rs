use crate::commands::{
    run_cards, run_compare, run_credit, run_merchant, run_optimize, run_recommend, CardsArgs,
    CompareArgs, CreditArgs, MerchantArgs, OptimizeArgs, RecommendArgs,
};
use crate::server;
use card_optimizer::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Card Optimizer",
    about = "Rank credit cards for a spending profile and pick the best card per purchase",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the catalog for a monthly spend profile
    Recommend(RecommendArgs),
    /// Pick the best card for a single purchase at a merchant
    Optimize(OptimizeArgs),
    /// Compare straight category rates across every card for one purchase
    Compare(CompareArgs),
    /// List the cards in the catalog
    Cards(CardsArgs),
    /// Show how a merchant name resolves to a category and MCC
    Merchant(MerchantArgs),
    /// Estimate a credit score from a self-reported profile
    Credit(CreditArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Optimize(args) => run_optimize(args),
        Command::Compare(args) => run_compare(args),
        Command::Cards(args) => run_cards(args),
        Command::Merchant(args) => run_merchant(args).await,
        Command::Credit(args) => run_credit(args),
    }
}

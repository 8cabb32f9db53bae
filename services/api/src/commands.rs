use crate::infra::{build_mcc_directory, build_optimizer, parse_spend_entry};
use card_optimizer::catalog::find_card;
use card_optimizer::config::AppConfig;
use card_optimizer::credit::{card_eligibility, estimate_score, CreditProfile, PaymentHistory};
use card_optimizer::error::AppError;
use card_optimizer::merchant::MccDirectory;
use card_optimizer::rewards::{Card, SpendVector};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Card catalog CSV (defaults to APP_CARDS_PATH)
    #[arg(long)]
    pub(crate) cards_path: Option<PathBuf>,
    /// Merchant table CSV (defaults to APP_MERCHANTS_PATH)
    #[arg(long)]
    pub(crate) merchants_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Monthly spend as CATEGORY=AMOUNT; repeat for each category
    #[arg(long = "spend", value_parser = parse_spend_entry, required = true)]
    pub(crate) spend: Vec<(String, f64)>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct OptimizeArgs {
    /// Merchant name as it appears on the statement
    #[arg(long)]
    pub(crate) merchant: String,
    /// Purchase amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Card suggested by an external model, if any
    #[arg(long)]
    pub(crate) prediction: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Spending category label, e.g. Dining or Groceries
    #[arg(long)]
    pub(crate) category: String,
    /// Purchase amount
    #[arg(long)]
    pub(crate) amount: f64,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CardsArgs {
    /// Show the full reward rules for one card
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct MerchantArgs {
    /// Merchant name to resolve
    pub(crate) name: String,
    /// Also fetch MCC metadata from the configured directory
    #[arg(long)]
    pub(crate) details: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CreditArgs {
    /// Annual income
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Years of credit history
    #[arg(long)]
    pub(crate) history_years: Option<u32>,
    /// Number of open cards
    #[arg(long)]
    pub(crate) existing_cards: Option<u32>,
    /// Payment history: good, fair, or poor
    #[arg(long)]
    pub(crate) payment_history: Option<PaymentHistory>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

fn load_config(data: DataArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data.cards_path {
        config.data.cards_path = path;
    }
    if let Some(path) = data.merchants_path {
        config.data.merchants_path = path;
    }
    Ok(config)
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs { spend, data } = args;
    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;
    let spend: SpendVector = spend.into_iter().collect();

    let recommendation = optimizer.recommend_for_spend(&spend)?;

    println!(
        "Card ranking for ${:.2}/month",
        recommendation.total_monthly_spend()
    );
    for (position, card) in recommendation.ranked().iter().enumerate() {
        println!(
            "{:>2}. {} ({}) | first year ${:.2} | net ${:.2}/year | {:.2}% effective",
            position + 1,
            card.card_name,
            card.issuer,
            card.first_year_value,
            card.rewards.net_annual_rewards,
            card.rewards.overall_rate * 100.0
        );
        for category in &card.rewards.categories {
            println!(
                "      - {}: ${:.2} on ${:.2} ({:.2}%)",
                category.category,
                category.reward_amount,
                category.spend_amount,
                category.effective_rate * 100.0
            );
        }
    }
    println!("\n{}", recommendation.explanation());
    Ok(())
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let OptimizeArgs {
        merchant,
        amount,
        prediction,
        data,
    } = args;
    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;

    let recommendation = optimizer.optimize(&merchant, amount, prediction.as_deref(), None)?;

    println!("Purchase: ${:.2} at {}", amount, merchant);
    println!(
        "- Category: {} (MCC {})",
        recommendation.merchant_category,
        recommendation.mcc_code.as_deref().unwrap_or("unknown")
    );
    println!(
        "- Use {} for ${:.2} back | confidence {:.0}%",
        recommendation.best_card,
        recommendation.reward_value,
        recommendation.confidence * 100.0
    );
    println!("- {}", recommendation.explanation);
    if !recommendation.alternatives_ranked.is_empty() {
        println!("Alternatives:");
        for alternative in &recommendation.alternatives_ranked {
            println!(
                "  - {}: ${:.2} ({:.2}%)",
                alternative.card_name,
                alternative.reward_amount,
                alternative.reward_rate * 100.0
            );
        }
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        category,
        amount,
        data,
    } = args;
    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;

    let evaluations = optimizer.compare(&category, amount)?;

    println!("{} purchase of ${:.2}", category, amount);
    for (position, evaluation) in evaluations.iter().enumerate() {
        println!(
            "{:>2}. {}: ${:.2} ({:.2}%)",
            position + 1,
            evaluation.card_name,
            evaluation.reward_amount,
            evaluation.reward_rate * 100.0
        );
    }
    Ok(())
}

pub(crate) fn run_cards(args: CardsArgs) -> Result<(), AppError> {
    let CardsArgs { name, data } = args;
    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;
    let cards = optimizer.cards()?;

    if let Some(name) = name {
        match find_card(&cards, &name) {
            Some(card) => render_card_details(card),
            None => println!("No card named '{}' in {}", name, config.data.cards_path.display()),
        }
        return Ok(());
    }

    if cards.is_empty() {
        println!("No cards found in {}", config.data.cards_path.display());
        return Ok(());
    }

    println!("{} cards in catalog", cards.len());
    for card in &cards {
        println!(
            "- {} ({}) | base {:.2}% | fee ${:.2}",
            card.name,
            card.issuer,
            card.base_reward * 100.0,
            card.annual_fee
        );
    }
    Ok(())
}

fn render_card_details(card: &Card) {
    println!("{} ({})", card.name, card.issuer);
    println!("- Base reward: {:.2}%", card.base_reward * 100.0);
    for (category, rate) in &card.category_rewards {
        match card.category_caps.get(category) {
            Some(cap) => println!(
                "- {}: {:.2}% up to ${:.2}/month",
                category,
                rate * 100.0,
                cap
            ),
            None => println!("- {}: {:.2}%", category, rate * 100.0),
        }
    }
    println!("- Annual fee: ${:.2}", card.annual_fee);
    if card.signup_bonus > 0.0 {
        println!(
            "- Signup bonus: ${:.2} after ${:.2} spend",
            card.signup_bonus, card.signup_bonus_spend_requirement
        );
    }
}

pub(crate) async fn run_merchant(args: MerchantArgs) -> Result<(), AppError> {
    let MerchantArgs {
        name,
        details,
        data,
    } = args;
    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;

    let resolution = optimizer.resolve(&name);
    println!("Merchant: {}", name);
    println!("- Normalized: {}", resolution.merchant);
    println!("- Category: {}", resolution.category);
    println!(
        "- MCC: {}",
        resolution.mcc_code.as_deref().unwrap_or("unknown")
    );
    println!("- Source: {}", resolution.source.label());

    if details {
        let Some(code) = resolution.mcc_code.as_deref() else {
            println!("  MCC details: no code to look up");
            return Ok(());
        };
        let directory = build_mcc_directory(&config)?;
        match directory.describe(code).await {
            Some(value) => match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("  MCC details:\n{}", json),
                Err(err) => println!("  MCC details unavailable: {}", err),
            },
            None => println!("  MCC details unavailable"),
        }
    }
    Ok(())
}

pub(crate) fn run_credit(args: CreditArgs) -> Result<(), AppError> {
    let CreditArgs {
        income,
        history_years,
        existing_cards,
        payment_history,
        data,
    } = args;
    let profile = CreditProfile {
        income,
        credit_history_years: history_years,
        existing_cards,
        payment_history,
    };

    let estimate = estimate_score(&profile);
    println!(
        "Estimated score: {} ({}) | eligible for {} cards | confidence {:.0}%",
        estimate.estimated_score,
        estimate.tier,
        estimate.eligible_cards,
        estimate.confidence * 100.0
    );

    let config = load_config(data)?;
    let optimizer = build_optimizer(&config)?;
    let cards = optimizer.cards()?;
    if cards.is_empty() {
        return Ok(());
    }

    println!("Card eligibility:");
    for card in &cards {
        let eligibility = card_eligibility(&card.name, estimate.estimated_score);
        println!(
            "  - {}: {} | {:.0}% approval odds",
            eligibility.card_name,
            if eligibility.eligible {
                "apply"
            } else {
                "improve score first"
            },
            eligibility.approval_probability * 100.0
        );
    }
    Ok(())
}

//! Pantry command-line entrypoint.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use pantry::cache::{BackingStore, CacheLayer};
use pantry::config::Config;
use pantry::context::GenerationContext;
use pantry::corpus::RecipeCorpus;
use pantry::filter::CollaborativeFilter;
use pantry::profile::{JsonFileStore, UserProfileManager};
use pantry::recommend::{RecommendationEngine, parse_detected_ingredients};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "pantry")]
#[command(version)]
#[command(about = "Find recipes for the ingredients you have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank recipes by how many of the given ingredients they use
    Search {
        /// Comma-separated ingredient names, e.g. "egg, flour, milk"
        ingredients: String,
        /// User id, for personalized affinity logging and preferences
        #[arg(long)]
        user: Option<String>,
        /// Number of results (defaults to PANTRY_TOP_K)
        #[arg(long)]
        top_k: Option<usize>,
        /// Print the text-generation context instead of JSON results
        #[arg(long)]
        context: bool,
    },

    /// Record a rating for a recipe
    Rate {
        #[arg(long)]
        user: String,
        #[arg(long)]
        recipe: String,
        /// Rating between 1 and 5
        #[arg(long)]
        rating: f64,
        #[arg(long, default_value = "")]
        feedback: String,
    },

    /// Rate the recipe currently being viewed
    SubmitRating {
        #[arg(long)]
        user: String,
        #[arg(long)]
        rating: f64,
    },

    /// Show a user's rating statistics
    Stats {
        #[arg(long)]
        user: String,
    },

    /// Show backing cache statistics
    CacheStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let cache_config = config.cache_config();
    let store = BackingStore::connect(config.redis_url.as_deref(), &cache_config).await;
    tracing::info!(store = store.name(), "Cache backing store ready");
    let cache = Arc::new(CacheLayer::with_config(store, cache_config));

    match cli.command {
        Commands::Search {
            ingredients,
            user,
            top_k,
            context,
        } => {
            config.validate()?;

            let corpus = Arc::new(RecipeCorpus::load(&config.recipes_path)?);
            let filter = Arc::new(CollaborativeFilter::new(config.factor_dims())?);
            if let Some(path) = &config.factors_path {
                filter.load_snapshot(path)?;
            }

            let engine = RecommendationEngine::new(corpus, cache.clone(), filter);
            let ingredients = parse_detected_ingredients(&ingredients);
            let results = engine
                .search_recipes(&ingredients, user.as_deref(), top_k.unwrap_or(config.top_k))
                .await?;

            if context {
                let preferences = match &user {
                    Some(user_id) => {
                        load_profiles(&config, cache)
                            .await?
                            .get_user_preferences(user_id)
                            .await
                    }
                    None => None,
                };
                let ctx = GenerationContext::new(ingredients, preferences, results);
                println!("{}", ctx.render()?);
            } else {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }
        Commands::Rate {
            user,
            recipe,
            rating,
            feedback,
        } => {
            let profiles = load_profiles(&config, cache).await?;
            let interaction = profiles
                .record_interaction(&user, &recipe, rating, &feedback)
                .await?;
            println!("{}", serde_json::to_string_pretty(&interaction)?);
        }
        Commands::SubmitRating { user, rating } => {
            let profiles = load_profiles(&config, cache).await?;
            let record = profiles.submit_rating(&user, rating).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Stats { user } => {
            let profiles = load_profiles(&config, cache).await?;
            match profiles.get_user_stats(&user).await {
                Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
                None => println!("No ratings recorded for '{user}'"),
            }
        }
        Commands::CacheStats => {
            let stats = cache.stats().await;
            println!("used_memory: {}", stats.used_memory);
            println!("hit_rate:    {:.2}%", stats.hit_rate * 100.0);
            println!("total_keys:  {}", stats.total_keys);
        }
    }

    Ok(())
}

async fn load_profiles(
    config: &Config,
    cache: Arc<CacheLayer<BackingStore>>,
) -> anyhow::Result<UserProfileManager<JsonFileStore, BackingStore>> {
    let store = JsonFileStore::new(&config.profile_path, &config.interactions_path);
    Ok(UserProfileManager::load(store, cache).await?)
}

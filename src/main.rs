use log::{debug, error};
use std::env;
use std::error::Error;
use std::process::ExitCode;

use recipe_browser::{
    repository_from_config, translation_service_from_config, AppConfig, DisplayLanguage,
    HomeUiState, HomeViewModel, RecipeDetailViewModel, RecipeError,
};

const USAGE: &str = "Usage:
  recipe-browser random [COUNT]
  recipe-browser search <QUERY>
  recipe-browser category <NAME>
  recipe-browser show <ID> [--translate]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    debug!("{:#?}", config);
    let repository = repository_from_config(&config)?;

    let (positional, translate) = split_args(args);
    let command = positional.first().copied();
    let argument = positional.get(1).copied();

    match (command, argument) {
        (Some("random"), count) => {
            let count = match count {
                Some(value) => value.parse::<usize>().map_err(|_| {
                    RecipeError::InvalidArgument(format!("COUNT must be a number, got {}", value))
                })?,
                None => config.home.random_count,
            };
            let home = HomeViewModel::with_random_count(repository, count);
            home.load_random_recipes().await;
            print_list(&home.state())
        }
        (Some("search"), Some(query)) => {
            let home = HomeViewModel::with_random_count(repository, config.home.random_count);
            home.search_recipes(query).await;
            print_list(&home.state())
        }
        (Some("category"), Some(category)) => {
            let home = HomeViewModel::with_random_count(repository, config.home.random_count);
            home.filter_by_category(category).await;
            print_list(&home.state())
        }
        (Some("show"), Some(id)) => {
            let translation = if translate {
                let mut config = config.clone();
                config.translation.enabled = true;
                translation_service_from_config(&config)?
            } else {
                None
            };

            let detail = RecipeDetailViewModel::new(repository, translation);
            detail.load_recipe_detail(id).await;
            if translate {
                detail.set_language(DisplayLanguage::Translated).await;
            }
            print_detail(&detail)
        }
        _ => Err(RecipeError::InvalidArgument(USAGE.to_string()).into()),
    }
}

/// Separate positional arguments from flags, wherever the flags appear.
fn split_args(args: &[String]) -> (Vec<&str>, bool) {
    let translate = args.iter().any(|a| a == "--translate");
    let positional = args
        .iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .collect();
    (positional, translate)
}

fn print_list(state: &HomeUiState) -> Result<(), Box<dyn Error>> {
    if let Some(message) = &state.error {
        return Err(message.clone().into());
    }
    if state.is_empty() {
        println!("No recipes to show.");
        return Ok(());
    }

    for recipe in &state.recipes {
        let category = recipe.category.as_deref().unwrap_or("-");
        println!("{:>6}  {}  [{}]", recipe.id, recipe.name, category);
    }
    Ok(())
}

fn print_detail(detail: &RecipeDetailViewModel) -> Result<(), Box<dyn Error>> {
    let state = detail.state();
    let Some(recipe) = &state.recipe else {
        let message = state.error.unwrap_or_else(|| "Recipe not found".to_string());
        return Err(message.into());
    };

    // Translation failures still leave the original recipe to show
    if let Some(message) = &state.error {
        eprintln!("{}", message);
    }

    println!("{}", recipe.name);
    let meta: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        println!("{}", meta.join(" / "));
    }

    println!("\nIngredients:");
    for ingredient in state.displayed_ingredients() {
        if ingredient.measure.trim().is_empty() {
            println!("  - {}", ingredient.name);
        } else {
            println!("  - {} ({})", ingredient.name, ingredient.measure.trim());
        }
    }

    println!("\nInstructions:");
    for (i, step) in state.displayed_instructions().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if let Some(video) = &recipe.youtube {
        println!("\nVideo: {}", video);
    }
    Ok(())
}

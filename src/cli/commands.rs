//! Command implementations for the Saffron CLI.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;
use serde_json::Value;

use crate::artifact::Outcome;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{Result, SaffronError};
use crate::index::Document;
use crate::search::SearchHit;

/// Execute a CLI command.
pub fn execute_command(args: SaffronArgs) -> Result<()> {
    let engine = Engine::new(load_config(&args)?)?;

    match &args.command {
        Command::TrainSearch(train_args) => train_search(&engine, train_args, &args),
        Command::TrainRecommend(train_args) => train_recommend(&engine, train_args, &args),
        Command::Search(search_args) => search(&engine, search_args, &args),
        Command::Related(related_args) => related(&engine, related_args, &args),
        Command::Recommend(recommend_args) => recommend(&engine, recommend_args, &args),
        Command::Status => output_result(&engine.status(), &args),
    }
}

/// Configuration file (if any) with command line overrides applied.
pub fn load_config(args: &SaffronArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    debug!("effective configuration: {config:?}");
    Ok(config)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not valid JSON", path.display()))?;
    Ok(value)
}

fn train_search(engine: &Engine, train_args: &TrainSearchArgs, args: &SaffronArgs) -> Result<()> {
    let value = read_json(&train_args.products_file)?;
    let documents: Vec<Document> = serde_json::from_value(value).map_err(|e| {
        SaffronError::malformed(format!(
            "'{}' is not a product array: {e}",
            train_args.products_file.display()
        ))
    })?;
    output_result(&engine.train_search(&documents), args)
}

fn train_recommend(
    engine: &Engine,
    train_args: &TrainRecommendArgs,
    args: &SaffronArgs,
) -> Result<()> {
    let value = read_json(&train_args.samples_file)?;
    output_result(&engine.train_recommend_json(&value), args)
}

fn search(engine: &Engine, search_args: &SearchArgs, args: &SaffronArgs) -> Result<()> {
    let hits = engine.search_hits(&search_args.query, search_args.limit);
    output_result(&hit_list(hits, search_args.scores), args)
}

fn related(engine: &Engine, related_args: &RelatedArgs, args: &SaffronArgs) -> Result<()> {
    let hits = engine.related_hits(related_args.product_id, related_args.limit)?;
    output_result(&hit_list(hits, related_args.scores), args)
}

fn recommend(engine: &Engine, recommend_args: &RecommendArgs, args: &SaffronArgs) -> Result<()> {
    let list = match engine.recommend(&recommend_args.purchase_history, recommend_args.limit) {
        Outcome::Ready(ids) => IdList {
            trained: true,
            ids,
            scores: None,
        },
        Outcome::Untrained => IdList {
            trained: false,
            ids: Vec::new(),
            scores: None,
        },
    };
    output_result(&list, args)
}

fn hit_list(hits: Outcome<Vec<SearchHit>>, with_scores: bool) -> IdList {
    match hits {
        Outcome::Ready(hits) => IdList {
            trained: true,
            ids: hits.iter().map(|h| h.id).collect(),
            scores: with_scores.then(|| hits.iter().map(|h| h.score).collect()),
        },
        Outcome::Untrained => IdList {
            trained: false,
            ids: Vec::new(),
            scores: None,
        },
    }
}

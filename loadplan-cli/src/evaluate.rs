//! Evaluate command implementation for the loadplan CLI.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use loadplan_core::{
    Booking, CapacityProfile, CapacityRegistry, EvaluatorConfig, Item, ItemId, RouteEvaluator,
    SequencingPolicy, TierComparison, TierName,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_EVALUATE_FLEET, ARG_EVALUATE_REQUEST, ARG_EVALUATE_SEQUENCING, ARG_EVALUATE_TIERS,
    CliError, ENV_EVALUATE_REQUEST,
};

/// CLI arguments for the `evaluate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Evaluate a route's bookings against service tiers. The \
                 request is a JSON file holding `bookings` and the item \
                 `catalog`; an optional fleet file replaces the built-in \
                 economy, standard and express profiles.",
    about = "Evaluate route capacity per service tier"
)]
#[ortho_config(prefix = "LOADPLAN")]
pub(crate) struct EvaluateArgs {
    /// Path to a JSON file containing bookings and the item catalogue.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON array of capacity profiles.
    #[arg(long = ARG_EVALUATE_FLEET, value_name = "path")]
    #[serde(default)]
    pub(crate) fleet: Option<Utf8PathBuf>,
    /// Comma-separated tiers to evaluate (defaults to every fleet tier).
    #[arg(long = ARG_EVALUATE_TIERS, value_name = "a,b,c")]
    #[serde(default)]
    pub(crate) tiers: Option<String>,
    /// Stop ordering: `batch` or `paired`.
    #[arg(long = ARG_EVALUATE_SEQUENCING, value_name = "policy")]
    #[serde(default)]
    pub(crate) sequencing: Option<String>,
}

impl EvaluateArgs {
    pub(crate) fn into_config(self) -> Result<EvaluateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EvaluateConfig::try_from(merged)
    }
}

/// Resolved `evaluate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EvaluateConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional fleet file; the built-in fleet applies when absent.
    pub(crate) fleet: Option<Utf8PathBuf>,
    /// Explicit tier selection; `None` means every registered tier.
    pub(crate) tiers: Option<Vec<TierName>>,
    pub(crate) sequencing: SequencingPolicy,
}

impl EvaluateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_EVALUATE_REQUEST)?;
        if let Some(fleet) = &self.fleet {
            Self::require_existing(fleet, ARG_EVALUATE_FLEET)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn evaluator(&self) -> RouteEvaluator {
        RouteEvaluator::new(EvaluatorConfig {
            sequencing: self.sequencing,
            ..EvaluatorConfig::default()
        })
    }
}

impl TryFrom<EvaluateArgs> for EvaluateConfig {
    type Error = CliError;

    fn try_from(args: EvaluateArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_EVALUATE_REQUEST,
            env: ENV_EVALUATE_REQUEST,
        })?;
        let tiers = args.tiers.as_deref().map(parse_tiers).transpose()?;
        let sequencing = args
            .sequencing
            .as_deref()
            .map(parse_sequencing)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            request_path,
            fleet: args.fleet,
            tiers,
            sequencing,
        })
    }
}

fn parse_tiers(raw: &str) -> Result<Vec<TierName>, CliError> {
    let mut tiers = Vec::new();
    for name in raw.split(',').map(str::trim) {
        if name.is_empty() {
            return Err(CliError::InvalidTiers {
                value: raw.to_owned(),
            });
        }
        tiers.push(TierName::from(name));
    }
    Ok(tiers)
}

fn parse_sequencing(raw: &str) -> Result<SequencingPolicy, CliError> {
    raw.parse::<SequencingPolicy>()
        .map_err(|_| CliError::InvalidSequencing {
            value: raw.to_owned(),
        })
}

/// JSON payload read from the request file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluateRequest {
    pub(crate) bookings: Vec<Booking>,
    pub(crate) catalog: Vec<Item>,
}

pub(super) fn run_evaluate(args: EvaluateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_evaluate_with(args, &mut stdout)
}

pub(super) fn run_evaluate_with(
    args: EvaluateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plans = execute_evaluate(args)?;
    write_plans(writer, &plans)
}

fn execute_evaluate(args: EvaluateArgs) -> Result<TierComparison, CliError> {
    let config = resolve_evaluate_config(args)?;
    let request = load_evaluate_request(&config.request_path)?;
    let catalog = index_catalog(&config.request_path, request.catalog)?;
    let registry = match &config.fleet {
        Some(path) => load_fleet(path)?,
        None => CapacityRegistry::default(),
    };
    let tiers = config
        .tiers
        .clone()
        .unwrap_or_else(|| registry.tiers().cloned().collect());
    let evaluator = config.evaluator();
    log::info!(
        "evaluating {} bookings on {} tiers with {} sequencing",
        request.bookings.len(),
        tiers.len(),
        evaluator.config().sequencing
    );
    let plans = evaluator.evaluate_all_tiers(&request.bookings, &tiers, &catalog, &registry)?;
    Ok(plans)
}

fn resolve_evaluate_config(args: EvaluateArgs) -> Result<EvaluateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`EvaluateRequest`] from disk.
pub(super) fn load_evaluate_request(path: &Utf8Path) -> Result<EvaluateRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a fleet file holding a JSON array of capacity profiles.
pub(super) fn load_fleet(path: &Utf8Path) -> Result<CapacityRegistry, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenFleet {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles: Vec<CapacityProfile> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| CliError::ParseFleet {
            path: path.to_path_buf(),
            source,
        })?;
    CapacityRegistry::new(profiles).map_err(|source| CliError::InvalidFleet {
        path: path.to_path_buf(),
        source,
    })
}

fn index_catalog(path: &Utf8Path, items: Vec<Item>) -> Result<HashMap<ItemId, Item>, CliError> {
    let mut catalog = HashMap::with_capacity(items.len());
    for item in items {
        match catalog.entry(item.id().clone()) {
            Entry::Occupied(entry) => {
                return Err(CliError::DuplicateCatalogItem {
                    path: path.to_path_buf(),
                    item_id: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
        }
    }
    Ok(catalog)
}

fn write_plans(writer: &mut dyn Write, plans: &TierComparison) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plans).map_err(CliError::SerialisePlans)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EvaluateConfig, CliError> {
    let merged = EvaluateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EvaluateConfig::try_from(merged)
}

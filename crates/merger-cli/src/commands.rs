use std::env;
use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use tracing::info;

use merger_cli::config::{API_KEY_ENV, ConfigFile, MappingSource, ResolvedConfig, resolve};
use merger_core::{Discovery, MergeConfig, MergePipeline, RunReport};
use merger_ingest::{DirectoryCatalog, FileRecordReader};
use merger_map::{ChatMappingProvider, FileMappingProvider, MappingProvider, StaticMappingProvider};
use merger_output::CsvChunkWriter;

use crate::cli::{FieldsArgs, RunArgs};

/// Outcome of `run`, with the settings it ran under.
pub struct RunOutcome {
    pub config: ResolvedConfig,
    pub report: RunReport,
}

pub fn run_merge(args: &RunArgs) -> Result<RunOutcome> {
    let file = ConfigFile::discover(args.config.as_deref()).context("load configuration")?;
    let config = resolve(file, args.overrides(), env::var(API_KEY_ENV).ok())
        .context("resolve configuration")?;
    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        rows_per_file = config.rows_per_file.get(),
        reuse_mapping = config.reuses_mapping(),
        "starting merge"
    );

    let provider: Box<dyn MappingProvider> = match &config.mapping_source {
        MappingSource::Reuse => Box::new(FileMappingProvider::new(&config.field_mapping_file)),
        MappingSource::Chat(chat) => {
            Box::new(ChatMappingProvider::new(chat.clone()).context("build mapping client")?)
        }
    };
    let pipeline = MergePipeline::new(
        MergeConfig::new(config.rows_per_file),
        Box::new(DirectoryCatalog::new(config.input_dir.clone())),
        Box::new(FileRecordReader),
        provider,
    );
    let writer = CsvChunkWriter::create(config.output_dir.clone())
        .with_context(|| format!("prepare output directory {}", config.output_dir.display()))?;

    let report = pipeline.run(writer)?;
    Ok(RunOutcome { config, report })
}

pub fn run_fields(args: &FieldsArgs) -> Result<Discovery> {
    let input_dir = match &args.input_dir {
        Some(dir) => dir.clone(),
        None => ConfigFile::discover(args.config.as_deref())
            .context("load configuration")?
            .input_dir_or_default(),
    };
    // Discovery never consults the provider or the chunk size.
    let pipeline = MergePipeline::new(
        MergeConfig::new(NonZeroUsize::MIN),
        Box::new(DirectoryCatalog::new(input_dir)),
        Box::new(FileRecordReader),
        Box::new(StaticMappingProvider::default()),
    );
    let mut discovery = pipeline.discover()?;
    discovery.fields.sort();
    Ok(discovery)
}

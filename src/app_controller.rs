use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TranslationProvider};
use crate::document::Document;
use crate::errors::AppError;
use crate::language_utils;
use crate::providers::google::GoogleTranslator;
use crate::providers::mock::MockTranslator;
use crate::providers::MarkupTranslator;
use crate::translation::glossary::{self, GlossaryMap};
use crate::translation::pipeline::{PipelineReport, TranslationPipeline};

// @module: Application controller for document translation

/// What a controller run did
#[derive(Debug)]
pub enum RunOutcome {
    /// The translated document was written
    Written {
        output_path: PathBuf,
        report: PipelineReport,
    },
    /// The output already existed and overwriting was not forced
    Skipped { output_path: PathBuf },
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    //
    // Empty Google credentials are filled from the environment before the
    // configuration is validated.
    pub fn with_config(mut config: Config) -> Result<Self> {
        config.apply_credential_fallbacks(|key| std::env::var(key).ok());
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default output path: `<stem>.<target>.json` next to the input
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        let stem = input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        let file_name = format!("{}.{}.json", stem, self.config.target_language.to_lowercase());
        input_file
            .parent()
            .unwrap_or(Path::new("."))
            .join(file_name)
    }

    /// Build the translator selected by the configuration
    pub fn build_translator(&self) -> Result<Box<dyn MarkupTranslator>, AppError> {
        let translator: Box<dyn MarkupTranslator> = match self.config.provider.provider_type {
            TranslationProvider::Google => {
                Box::new(GoogleTranslator::new_with_config(self.config.google_settings())?)
            }
            TranslationProvider::Mock => Box::new(MockTranslator::identity()),
        };
        Ok(translator)
    }

    /// Load the configured glossary, if any
    pub fn load_glossary(&self) -> Result<Option<GlossaryMap>, AppError> {
        let Some(path) = self
            .config
            .glossary_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
        else {
            return Ok(None);
        };

        let glossary = glossary::load_glossary(path)?;
        info!("Glossary: {} terms from {}", glossary.len(), path);
        Ok(Some(glossary))
    }

    /// Run the main workflow with the configured translator
    pub async fn run(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<RunOutcome> {
        let translator = self.build_translator()?;
        let outcome = self
            .run_with_translator(translator.as_ref(), input_file, output_file, force_overwrite)
            .await?;
        Ok(outcome)
    }

    /// Run the main workflow with an explicit translator
    pub async fn run_with_translator(
        &self,
        translator: &dyn MarkupTranslator,
        input_file: &Path,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<RunOutcome, AppError> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(AppError::File(format!(
                "Input file does not exist: {}",
                input_file.display()
            )));
        }

        let output_path = output_file.unwrap_or_else(|| self.output_path_for(input_file));
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {}, output already exists (use -f to force overwrite)",
                output_path.display()
            );
            return Ok(RunOutcome::Skipped { output_path });
        }

        // Everything that can fail before translation fails here
        let glossary = self.load_glossary()?;
        let mut document = Document::load(input_file)?;
        let (source_code, target_code) = self.service_codes()?;

        info!(
            "docxlate: {} ({} -> {})",
            self.config.provider.provider_type.display_name(),
            if source_code.is_empty() { "auto" } else { source_code.as_str() },
            target_code
        );

        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("#>-"));
        progress_bar.set_message("Translating");

        let pipeline = TranslationPipeline::new(self.config.pipeline_config(&source_code, &target_code));
        let result = pipeline
            .translate(translator, &mut document, glossary.as_ref(), |completed, total| {
                progress_bar.set_length(total as u64);
                progress_bar.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();
        let report = result?;

        if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        document.save(&output_path)?;

        info!(
            "Success: {} ({} items translated in {})",
            output_path.display(),
            report.translated_items,
            Self::format_duration(start_time.elapsed())
        );

        Ok(RunOutcome::Written {
            output_path,
            report,
        })
    }

    /// Source and target codes as the service expects them; an empty source means auto-detect
    fn service_codes(&self) -> Result<(String, String), AppError> {
        let source = self.config.source_language.trim();
        let source_code = if source.is_empty() {
            String::new()
        } else {
            language_utils::service_language_code(source)?
        };
        let target_code = language_utils::service_language_code(&self.config.target_language)?;
        Ok((source_code, target_code))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

use crate::infra::InMemoryListingRepository;
use clap::{Args, ValueEnum};
use listing_value::config::AppConfig;
use listing_value::error::AppError;
use listing_value::valuation::{
    listing_id_from_url, ListingCsvImporter, ListingId, Locale, ValuationReport,
    ValuationService, ValuationServiceError,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Ranked listing export (CSV) holding the target listing and its peers
    #[arg(long)]
    pub(crate) listings: PathBuf,
    #[command(flatten)]
    pub(crate) target: TargetListing,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Narrative language (en or zh); overrides APP_LOCALE
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct TargetListing {
    /// Marketplace URL carrying a `listing=<id>` fragment
    #[arg(long)]
    pub(crate) url: Option<String>,
    /// Listing id as it appears in the export
    #[arg(long)]
    pub(crate) listing_id: Option<String>,
}

impl TargetListing {
    fn resolve(&self) -> Result<ListingId, ValuationServiceError> {
        match (&self.listing_id, &self.url) {
            (Some(id), _) => Ok(ListingId(id.trim().to_string())),
            (None, Some(url)) => listing_id_from_url(url),
            (None, None) => Err(ValuationServiceError::InvalidUrl(String::new())),
        }
    }
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale '{raw}' (expected en or zh)"))
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        listings,
        target,
        format,
        locale,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(locale) = locale {
        config.valuation.locale = locale;
    }

    let rows = ListingCsvImporter::from_path(&listings)?;
    let repository = Arc::new(InMemoryListingRepository::from_rows(rows));
    let service = ValuationService::new(repository, config.valuation);

    let report = service.evaluate_by_listing_id(&target.resolve()?)?;
    println!("{}", render(&report, format)?);
    Ok(())
}

pub(crate) fn render(report: &ValuationReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

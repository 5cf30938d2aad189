use chrono::NaiveDate;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::sds::domain::{AdvancedSearch, SearchQuery, SearchType, DEFAULT_PAGE_SIZE};

/// Search, inspect and upload Safety Data Sheets through the SDS API
#[derive(Parser, Debug)]
#[command(name = "sds-client")]
#[command(version)]
#[command(about = "Search, inspect and upload Safety Data Sheets through the SDS API", long_about = None)]
pub struct Args {
    /// Config file (defaults to ./sds-client.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the SDS API
    #[arg(long, global = true, env = "SDS_API_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// API key sent as X-SDS-SEARCH-ACCESS-API-KEY (overrides the stored key)
    #[arg(long, global = true, env = "SDS_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format: json or markdown
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for SDS files
    Search(SearchArgs),
    /// Show SDS details by id or PDF MD5
    Details(DetailsArgs),
    /// Check whether a newer revision of an SDS exists
    Revision(LookupArgs),
    /// Upload an SDS PDF and follow its extraction
    Upload(UploadArgs),
    /// Manage the locally stored API key
    #[command(subcommand)]
    ApiKey(ApiKeyCommand),
}

#[derive(ClapArgs, Debug)]
pub struct SearchArgs {
    /// Free-text search
    pub query: Option<String>,

    /// simple_query_string, match or match_phrase
    #[arg(long, default_value = "simple_query_string")]
    pub search_type: SearchType,

    /// Language code of the SDS (defaults to the config value, then "en")
    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub order_by: Option<String>,

    /// Only SDSs revised on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub min_revision_date: Option<NaiveDate>,

    /// Region short name
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub product_name: Option<String>,

    #[arg(long)]
    pub supplier_name: Option<String>,

    #[arg(long)]
    pub cas_no: Option<String>,

    #[arg(long)]
    pub product_code: Option<String>,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,
}

impl SearchArgs {
    /// Builds the request body; `default_language` fills in a missing `--language`
    pub fn to_query(&self, default_language: Option<&str>) -> SearchQuery {
        let mut query = SearchQuery::new(self.query.clone())
            .with_advanced(AdvancedSearch {
                product_name: self.product_name.clone(),
                supplier_name: self.supplier_name.clone(),
                cas_no: self.cas_no.clone(),
                product_code: self.product_code.clone(),
            })
            .with_page(self.page, self.page_size);

        query.search_type = self.search_type;
        if let Some(language) = self.language.as_deref().or(default_language) {
            query.language_code = Some(language.to_string());
        }
        if self.order_by.is_some() {
            query.order_by = self.order_by.clone();
        }
        query.minimum_revision_date = self.min_revision_date;
        if let Some(region) = &self.region {
            query.region_short_name = Some(region.clone());
        }
        query
    }
}

/// Identifies SDSs by id and/or PDF MD5; both flags repeat
#[derive(ClapArgs, Debug)]
pub struct LookupArgs {
    #[arg(long = "sds-id", value_name = "ID")]
    pub sds_ids: Vec<String>,

    #[arg(long = "pdf-md5", value_name = "MD5")]
    pub pdf_md5s: Vec<String>,
}

#[derive(ClapArgs, Debug)]
pub struct DetailsArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Language code of the SDS
    #[arg(long)]
    pub language: Option<String>,

    /// Request the extended front-end payload
    #[arg(long)]
    pub fe: bool,
}

#[derive(ClapArgs, Debug)]
pub struct UploadArgs {
    /// SDS PDF to upload
    pub file: PathBuf,

    #[arg(long, default_value = "")]
    pub sku: String,

    #[arg(long, default_value = "")]
    pub upc_ean: String,

    #[arg(long, default_value = "")]
    pub product_code: String,

    /// Notification address, also sent with every status query
    #[arg(long)]
    pub email: Option<String>,

    /// Keep the imported SDS private
    #[arg(long = "private")]
    pub private_import: bool,

    /// Interval between status queries in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ApiKeyCommand {
    /// Store an API key for later runs
    Set { key: String },
    /// Forget the stored API key
    Clear,
    /// Show the stored API key, masked
    Show,
}

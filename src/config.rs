use std::env;

// Production listing URL: closed-page events, filtered by modality and store,
// one oversized page so pagination stays server-side.
const DEFAULT_LISTING_URL: &str = "https://www.superbid.com.pe/todos-eventos?filter=modalityId:[1,4];subMarketplaces.id:all;storeIds:[1261];isShopping:null&byPage=closedPage&pageNumber=1&pageSize=10000";
const DEFAULT_OUTPUT_DIR: &str = "data/raw/superbid";

pub struct Config {
    pub listing_url: String,
    pub output_dir: String,
    /// Bound the run to the first N bids; unset processes all of them.
    pub max_bids: Option<usize>,
    pub listing_scroll_passes: u32,
    pub detail_scroll_passes: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            listing_url: env::var("SUPERBID_LISTING_URL")
                .unwrap_or_else(|_| DEFAULT_LISTING_URL.to_string()),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string()),
            max_bids: env::var("MAX_BIDS").ok().map(|v| v.parse()).transpose()?,
            listing_scroll_passes: parse_or("LISTING_SCROLL_PASSES", 3)?,
            detail_scroll_passes: parse_or("DETAIL_SCROLL_PASSES", 6)?,
        })
    }
}

fn parse_or(key: &str, default: u32) -> anyhow::Result<u32> {
    match env::var(key) {
        Ok(v) => Ok(v.parse()?),
        Err(_) => Ok(default),
    }
}

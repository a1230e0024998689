use tracing::{info, warn};

use crate::{
    config::Config,
    crawler::{
        self,
        browser::BrowserSession,
        models::{AuctionDetail, BidRecord, ListingPage},
        parser,
    },
    storage::json::JsonStore,
};

/// Detail pages hydrate slowly; a page with zero auction links gets
/// re-rendered up to this many times before giving up on the bid.
const LINK_DISCOVERY_ATTEMPTS: usize = 5;

pub struct ScrapingService {
    cfg: Config,
    store: JsonStore,
}

impl ScrapingService {
    pub fn new(cfg: Config) -> Self {
        let store = JsonStore::new(&cfg.output_dir);
        Self { cfg, store }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let mut session = BrowserSession::open()?;

        let records = self.scrape(&session).await;
        let saved = self.store.save_bids(&records).await;

        session.close();

        let path = saved?;
        info!(
            path = %path.display(),
            records = records.len(),
            "DONE: scrape finished and serialized"
        );
        Ok(())
    }

    async fn scrape(&self, session: &BrowserSession) -> Vec<BidRecord> {
        let listing = match session
            .fetch_rendered(&self.cfg.listing_url, self.cfg.listing_scroll_passes)
            .await
        {
            Some(html) => parser::extract_bids(&html),
            None => {
                warn!(url = %self.cfg.listing_url, "Listing page yielded no content");
                ListingPage::default()
            }
        };

        let limit = self.cfg.max_bids.unwrap_or(listing.found.len());
        let mut records = Vec::new();

        for bid in listing.found.into_iter().take(limit) {
            info!(bid = %bid.id, "Processing bid");

            let links = self.auction_links(session, &bid.link).await;
            if links.is_empty() {
                warn!(
                    bid = %bid.id,
                    attempts = LINK_DISCOVERY_ATTEMPTS,
                    "No auction links found, keeping bid without details"
                );
            } else {
                info!(bid = %bid.id, count = links.len(), "Found auction links");
            }

            let mut record = BidRecord::new(bid);
            for link in links {
                // A failed render or dropped record still produces an entry
                // with null details, never a missing entry.
                let details = match session
                    .fetch_rendered(&crawler::absolute_url(&link), self.cfg.detail_scroll_passes)
                    .await
                {
                    Some(html) => parser::extract_car_auction_details(&html),
                    None => None,
                };

                record.details.push(AuctionDetail {
                    link_to_car_auction: link,
                    car_auction_details: details,
                });
            }

            records.push(record);
        }

        records
    }

    /// Render the bid's detail page and collect its car-auction links,
    /// re-rendering on an empty result up to the attempt cap.
    async fn auction_links(&self, session: &BrowserSession, bid_link: &str) -> Vec<String> {
        let url = crawler::absolute_url(bid_link);
        let url: &str = &url;
        let passes = self.cfg.detail_scroll_passes;

        crawler::retry_until_nonempty(LINK_DISCOVERY_ATTEMPTS, move |_| async move {
            match session.fetch_rendered(url, passes).await {
                Some(html) => parser::extract_auction_links(&html),
                None => Vec::new(),
            }
        })
        .await
    }
}

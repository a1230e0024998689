use serde::{Deserialize, Serialize};

/// One card from the paginated listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSummary {
    pub name: String,
    pub date: String,
    pub link: String,
    /// Derived as `name_date`; not guaranteed unique if name+date collide.
    pub id: String,
}

impl BidSummary {
    pub fn new(name: String, date: String, link: String) -> Self {
        let id = format!("{}_{}", name, date);
        Self { name, date, link, id }
    }
}

/// Result of parsing one listing page: cards that yielded a full summary,
/// and raw markup of cards missing any required sub-field.
#[derive(Debug, Default)]
pub struct ListingPage {
    pub found: Vec<BidSummary>,
    pub not_found: Vec<String>,
}

/// One discovered car-auction link plus whatever could be extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionDetail {
    pub link_to_car_auction: String,
    pub car_auction_details: Option<CarAuctionDetails>,
}

/// Flat record for one car-auction page. Every field degrades to None
/// independently when its source node is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarAuctionDetails {
    pub title: Option<String>,
    pub close_date: Option<String>,
    pub start_date: Option<String>,
    pub visits: Option<String>,
    pub participants: Option<String>,
    pub number_of_offers: Option<String>,
    pub offer: Option<String>,
    pub currency: Option<String>,
    pub winner: Option<String>,
    pub company: Option<String>,
    pub seller: Option<String>,
    pub initial_offer: Option<String>,
    pub description: Vec<String>,
    pub information: Option<Vec<String>>,
}

/// A bid summary augmented with its car-auction details, as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    #[serde(flatten)]
    pub bid: BidSummary,
    pub details: Vec<AuctionDetail>,
}

impl BidRecord {
    pub fn new(bid: BidSummary) -> Self {
        Self { bid, details: Vec::new() }
    }
}

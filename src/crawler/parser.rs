use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::crawler::models::{BidSummary, CarAuctionDetails, ListingPage};

// Class signatures observed on superbid.com.pe (React/MUI generated markup).
pub const BID_CARD: &str = "div.MuiGrid-root.css-bf37vd";
pub const BID_NAME: &str = "p.MuiTypography-root.MuiTypography-body1.jss206.css-z355qp";
pub const BID_DATE: &str = "p.MuiTypography-root.MuiTypography-body1.jss216.css-z355qp";
pub const AUCTION_LINK: &str = "a.jss630";
pub const AUCTION_TITLE: &str = "h1.MuiTypography-root.MuiTypography-h1.css-1yomz3x";
pub const OFFER_PANEL: &str = "div.offer-bid-panel";
pub const OPEN_AUCTION_PANEL: &str =
    "div.MuiGrid-root.MuiGrid-container.MuiGrid-direction-xs-column.css-12g27go";
pub const DESCRIPTION_PANEL: &str = "div.description-panel";
pub const INFORMATION_LIST: &str = "ul.information-list";

/// Parse one listing page into found summaries and the raw markup of cards
/// missing any required sub-field. Partial failure is per-card: a malformed
/// card goes to `not_found`, it never aborts the batch.
pub fn extract_bids(html: &str) -> ListingPage {
    let doc = Html::parse_document(html);
    let card_sel = Selector::parse(BID_CARD).unwrap();
    let name_sel = Selector::parse(BID_NAME).unwrap();
    let date_sel = Selector::parse(BID_DATE).unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut page = ListingPage::default();

    for card in doc.select(&card_sel) {
        let name = card.select(&name_sel).next().map(joined_text);
        let date = card.select(&date_sel).next().map(joined_text);
        let link = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        match (name, date, link) {
            (Some(name), Some(date), Some(link)) => {
                page.found.push(BidSummary::new(name, date, link));
            }
            _ => page.not_found.push(card.html()),
        }
    }

    info!(
        found = page.found.len(),
        not_found = page.not_found.len(),
        "Parsed listing cards"
    );
    page
}

/// Collect the relative "go to car auction" links from a bid's detail page,
/// in document order. May be empty when the page has not hydrated yet.
pub fn extract_auction_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let link_sel = Selector::parse(AUCTION_LINK).unwrap();

    doc.select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Extract one car-auction page into a flat record. Every region probe is
/// independently defensive: a missing node nulls its own fields only.
///
/// Exception kept as observed in the produced dataset: when the description
/// panel itself is absent the whole record is dropped (returns None) instead
/// of degrading field by field like every other region.
pub fn extract_car_auction_details(html: &str) -> Option<CarAuctionDetails> {
    let doc = Html::parse_document(html);

    let Some(description_panel) = first(&doc, DESCRIPTION_PANEL) else {
        info!(panel = DESCRIPTION_PANEL, "Description panel missing, dropping record");
        return None;
    };

    let mut details = CarAuctionDetails::default();

    // -------- Title --------
    details.title = match first(&doc, AUCTION_TITLE) {
        Some(h1) => Some(joined_text(h1)),
        None => {
            info!(selector = AUCTION_TITLE, "Title heading missing");
            None
        }
    };

    probe_offer_panel(&doc, &mut details);
    probe_open_auction_panel(&doc, &mut details);

    // -------- Description --------
    let p_sel = Selector::parse("p").unwrap();
    details.description = description_panel
        .select(&p_sel)
        .map(joined_text)
        .filter(|t| !t.is_empty())
        .collect();

    // -------- Information --------
    details.information = match first(&doc, INFORMATION_LIST) {
        Some(list) => {
            let li_sel = Selector::parse("li").unwrap();
            Some(
                list.select(&li_sel)
                    .map(joined_text)
                    .filter(|t| !t.is_empty())
                    .collect(),
            )
        }
        None => {
            info!(selector = INFORMATION_LIST, "Information list missing");
            None
        }
    };

    Some(details)
}

// -------- Offer/bid panel: dates, statistics, current offer, winner --------
fn probe_offer_panel(doc: &Html, details: &mut CarAuctionDetails) {
    let Some(panel) = first(doc, OFFER_PANEL) else {
        info!(selector = OFFER_PANEL, "Offer panel missing, skipping offer fields");
        return;
    };

    let tokens = text_tokens(panel);
    details.close_date = value_after(&tokens, "Fecha de cierre");
    details.start_date = value_after(&tokens, "Fecha de inicio");
    details.visits = value_after(&tokens, "Visitas");
    details.participants = value_after(&tokens, "Participantes");
    details.number_of_offers = value_after(&tokens, "Ofertas");
    details.winner = value_after(&tokens, "Ganador");

    // Current offer renders as one token like "S/ 15,500.00".
    if let Some(raw) = value_after(&tokens, "Oferta actual") {
        match raw.split_once(' ') {
            Some((currency, amount)) => {
                details.currency = Some(currency.to_string());
                details.offer = Some(amount.trim().to_string());
            }
            None => details.offer = Some(raw),
        }
    }
}

// -------- Open-auction panel: company, seller, initial offer --------
fn probe_open_auction_panel(doc: &Html, details: &mut CarAuctionDetails) {
    let Some(panel) = first(doc, OPEN_AUCTION_PANEL) else {
        info!(selector = OPEN_AUCTION_PANEL, "Open-auction panel missing, skipping seller fields");
        return;
    };

    let tokens = text_tokens(panel);
    details.company = value_after(&tokens, "Empresa");
    details.seller = value_after(&tokens, "Vendedor");
    details.initial_offer = value_after(&tokens, "Oferta inicial");
}

fn first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).unwrap();
    doc.select(&sel).next()
}

/// All non-empty descendant text tokens of a node, trimmed, in document order.
fn text_tokens(el: ElementRef) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Descendant text joined with single spaces and trimmed.
fn joined_text(el: ElementRef) -> String {
    text_tokens(el).join(" ")
}

// Label -> next non-empty token. The site renders every panel as a flat
// label/value sequence, so one scan covers all fields.
fn value_after(tokens: &[String], label: &str) -> Option<String> {
    let value = tokens
        .iter()
        .position(|t| t == label)
        .and_then(|i| tokens.get(i + 1))
        .cloned();

    if value.is_none() {
        info!(label, "Label not found in panel");
    }
    value
}

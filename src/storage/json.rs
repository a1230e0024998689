use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use tokio::fs;

use crate::crawler::models::BidRecord;

/// One-shot JSON persistence for a scrape run. The whole record list is
/// written at once at the end of the run; there is no incremental flush.
pub struct JsonStore {
    out_dir: PathBuf,
}

impl JsonStore {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Write all records to `<out_dir>/bids-<YYYY-MM-DD>.json` and return
    /// the path. Non-ASCII text stays literal (serde_json does not escape
    /// it), which downstream consumers of the dataset rely on.
    pub async fn save_bids(&self, bids: &[BidRecord]) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).await?;

        let filename = format!("bids-{}.json", Local::now().format("%Y-%m-%d"));
        let path = self.out_dir.join(filename);

        let json = serde_json::to_string(bids)?;
        fs::write(&path, json).await?;

        Ok(path)
    }

    pub async fn load_bids(&self, path: &Path) -> Result<Vec<BidRecord>> {
        let raw = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::models::{AuctionDetail, BidSummary, CarAuctionDetails};

    fn sample_records() -> Vec<BidRecord> {
        let mut record = BidRecord::new(BidSummary::new(
            "Subasta de Camiones Nº 5".to_string(),
            "15/08/2026".to_string(),
            "/evento/123".to_string(),
        ));
        record.details.push(AuctionDetail {
            link_to_car_auction: "/oferta/1".to_string(),
            car_auction_details: Some(CarAuctionDetails {
                title: Some("Camión Volvo FH 2019".to_string()),
                company: Some("Superbid Perú".to_string()),
                description: vec!["Año 2019, diésel".to_string()],
                ..Default::default()
            }),
        });
        record.details.push(AuctionDetail {
            link_to_car_auction: "/oferta/2".to_string(),
            car_auction_details: None,
        });

        vec![record]
    }

    #[tokio::test]
    async fn round_trip_preserves_structure_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let records = sample_records();

        let path = store.save_bids(&records).await.unwrap();
        let loaded = store.load_bids(&path).await.unwrap();

        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn output_filename_is_date_stamped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let path = store.save_bids(&[]).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy();

        let expected = format!("bids-{}.json", Local::now().format("%Y-%m-%d"));
        assert_eq!(name, expected);
    }

    #[tokio::test]
    async fn non_ascii_text_is_written_literally() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let path = store.save_bids(&sample_records()).await.unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();

        assert!(raw.contains("Camión Volvo FH 2019"));
        assert!(raw.contains("Nº 5"));
        assert!(!raw.contains("\\u"));
    }
}

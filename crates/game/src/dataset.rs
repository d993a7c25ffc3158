//! Country dataset loading
//!
//! Reads the restcountries v3.1 shape (`?fields=name,flags,flag`):
//!
//! ```json
//! [{ "name": { "common": "France" },
//!    "flags": { "png": "https://...", "alt": "..." },
//!    "flag": "🇫🇷" }]
//! ```

use std::path::Path;

use flagdraw_ipc::FlagEntry;
use flagdraw_scoring::ReferenceFetcher;
use serde::Deserialize;
use tracing::{debug, info};

use crate::DatasetError;

/// Where the dataset is downloaded from
pub const DATASET_URL: &str = "https://restcountries.com/v3.1/all?fields=name,flags,flag";

#[derive(Deserialize)]
struct RawCountry {
    name: RawName,
    #[serde(default)]
    flags: RawFlags,
    #[serde(default)]
    flag: Option<String>,
}

#[derive(Deserialize)]
struct RawName {
    common: String,
}

#[derive(Default, Deserialize)]
struct RawFlags {
    #[serde(default)]
    png: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

impl RawCountry {
    fn into_entry(self) -> Option<FlagEntry> {
        let Some(png) = self.flags.png.filter(|url| !url.is_empty()) else {
            debug!("Skipping {}: no raster flag", self.name.common);
            return None;
        };
        Some(FlagEntry {
            name: self.name.common,
            reference_image_url: png,
            alt: self.flags.alt.filter(|alt| !alt.is_empty()),
            emoji: self.flag,
        })
    }
}

/// Parse a dataset, dropping countries without a PNG flag
pub fn parse_dataset(json: &str) -> Result<Vec<FlagEntry>, DatasetError> {
    let raw: Vec<RawCountry> = serde_json::from_str(json)?;
    let total = raw.len();
    let entries: Vec<FlagEntry> = raw.into_iter().filter_map(RawCountry::into_entry).collect();
    if entries.is_empty() {
        return Err(DatasetError::Empty);
    }
    if entries.len() < total {
        debug!("Dropped {} of {} countries", total - entries.len(), total);
    }
    Ok(entries)
}

/// Read and parse a dataset file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<FlagEntry>, DatasetError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let entries = parse_dataset(&json)?;
    info!("Loaded {} countries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Download a dataset, returning the raw JSON alongside the parsed entries
pub async fn fetch_dataset<F: ReferenceFetcher>(
    fetcher: &F,
    url: &str,
) -> Result<(String, Vec<FlagEntry>), DatasetError> {
    let json = String::from_utf8(fetcher.fetch(url).await?)?;
    let entries = parse_dataset(&json)?;
    info!("Downloaded {} countries from {}", entries.len(), url);
    Ok((json, entries))
}

#[cfg(test)]
mod tests {
    use flagdraw_scoring::FetchError;

    use super::*;

    /// Serves one fixed body for every URL
    struct StaticFetcher(Result<Vec<u8>, u16>);

    impl ReferenceFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            self.0.clone().map_err(FetchError::Status)
        }
    }

    const SAMPLE: &str = r#"[
        {
            "name": { "common": "France", "official": "French Republic" },
            "flags": {
                "png": "https://flagcdn.com/w320/fr.png",
                "svg": "https://flagcdn.com/fr.svg",
                "alt": "The flag of France is composed of three equal vertical bands of blue, white and red."
            },
            "flag": "🇫🇷"
        },
        {
            "name": { "common": "Nowhere" },
            "flags": { "svg": "https://example.com/nowhere.svg" }
        },
        {
            "name": { "common": "Japan" },
            "flags": { "png": "https://flagcdn.com/w320/jp.png", "alt": "" }
        }
    ]"#;

    #[test]
    fn test_parse_sample() {
        let entries = parse_dataset(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "France");
        assert_eq!(entries[0].reference_image_url, "https://flagcdn.com/w320/fr.png");
        assert!(entries[0].alt.as_deref().unwrap().starts_with("The flag of France"));
        assert_eq!(entries[0].emoji.as_deref(), Some("🇫🇷"));

        assert_eq!(entries[1].name, "Japan");
        assert_eq!(entries[1].alt, None);
        assert_eq!(entries[1].emoji, None);
    }

    #[test]
    fn test_no_playable_countries() {
        let json = r#"[{ "name": { "common": "Nowhere" } }]"#;
        assert!(matches!(parse_dataset(json), Err(DatasetError::Empty)));
        assert!(matches!(parse_dataset("[]"), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(parse_dataset("{"), Err(DatasetError::Json(_))));
        assert!(matches!(
            parse_dataset(r#"[{ "flags": {} }]"#),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset("/nonexistent/countryData.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[tokio::test]
    async fn test_fetch_dataset() {
        let fetcher = StaticFetcher(Ok(SAMPLE.as_bytes().to_vec()));
        let (json, entries) = fetch_dataset(&fetcher, DATASET_URL).await.unwrap();
        assert_eq!(json, SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Japan");
    }

    #[tokio::test]
    async fn test_fetch_dataset_errors() {
        let err = fetch_dataset(&StaticFetcher(Err(503)), DATASET_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, DatasetError::Fetch(FetchError::Status(503))));

        let err = fetch_dataset(&StaticFetcher(Ok(vec![0xff, 0xfe])), DATASET_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, DatasetError::Encoding(_)));
    }
}

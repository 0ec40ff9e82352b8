// Property data lookups - thin reqwest clients for the external valuation,
// council news, bin collection and insights endpoints.
// No retry and no timeout override; a failed call surfaces as an error
// string in its own response section only.

use reqwest::Client;

use crate::config::Config;
use crate::models::{
    BinCollectionResponse, CouncilNewsResponse, PropertyBaseline, PropertyInsightsResponse,
    ValuationApiResponse,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Client for the upstream property-data API
pub struct LookupService {
    client: Client,
    base_url: Option<String>,
}

impl LookupService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.property_data_api_url.clone(),
        }
    }

    fn base_url(&self) -> Result<&str, BoxError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| "PROPERTY_DATA_API_URL not configured".into())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, BoxError> {
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(format!("Lookup failed with status {}", response.status()).into());
        }
        Ok(response.json::<T>().await?)
    }

    /// GET {base}/valuation - model estimate plus area statistics
    pub async fn fetch_valuation(
        &self,
        postcode: &str,
        address: &str,
        baseline: &PropertyBaseline,
    ) -> Result<ValuationApiResponse, BoxError> {
        let mut url = format!(
            "{}/valuation?postcode={}&address={}",
            self.base_url()?,
            urlencoding::encode(postcode),
            urlencoding::encode(address),
        );
        if let Some(price) = baseline.purchase_price {
            url.push_str(&format!("&purchasePrice={}", price));
        }
        if let Some(date) = baseline.purchase_date {
            url.push_str(&format!("&purchaseDate={}", date.format("%Y-%m-%d")));
        }
        if !baseline.property_type.is_empty() {
            url.push_str(&format!(
                "&propertyType={}",
                urlencoding::encode(&baseline.property_type)
            ));
        }
        if !baseline.street.is_empty() {
            url.push_str(&format!("&street={}", urlencoding::encode(&baseline.street)));
        }
        if !baseline.nearby_streets.is_empty() {
            url.push_str(&format!(
                "&nearbyStreets={}",
                urlencoding::encode(&baseline.nearby_streets.join(","))
            ));
        }
        self.get_json(url).await
    }

    /// GET {base}/council-news
    pub async fn fetch_council_news(&self, postcode: &str) -> Result<CouncilNewsResponse, BoxError> {
        let url = format!(
            "{}/council-news?postcode={}",
            self.base_url()?,
            urlencoding::encode(postcode),
        );
        self.get_json(url).await
    }

    /// GET {base}/bin-collection
    pub async fn fetch_bin_collection(
        &self,
        postcode: &str,
        address: &str,
    ) -> Result<BinCollectionResponse, BoxError> {
        let url = format!(
            "{}/bin-collection?postcode={}&address={}",
            self.base_url()?,
            urlencoding::encode(postcode),
            urlencoding::encode(address),
        );
        self.get_json(url).await
    }

    /// GET {base}/insights
    pub async fn fetch_insights(
        &self,
        postcode: &str,
        address: &str,
    ) -> Result<PropertyInsightsResponse, BoxError> {
        let url = format!(
            "{}/insights?postcode={}&address={}",
            self.base_url()?,
            urlencoding::encode(postcode),
            urlencoding::encode(address),
        );
        self.get_json(url).await
    }
}

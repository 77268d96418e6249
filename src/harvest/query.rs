//! Listing query construction

use crate::config::{ListingConfig, Region};
use url::Url;

/// Fully parameterized request for one region's listing snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub region_code: u32,
    pub region_kind: u32,
    pub market: String,
    pub max_results: u32,
    pub lookback_days: u32,
    /// Comma-joined property kind codes, e.g. "1,3"
    pub property_types: String,
}

impl Query {
    pub fn new(region: &Region, listing: &ListingConfig, lookback_days: u32) -> Self {
        Self {
            region_code: region.code,
            region_kind: region.kind.code(),
            market: listing.market.clone(),
            max_results: listing.max_results,
            lookback_days,
            property_types: listing.property_types.clone(),
        }
    }

    /// Builds the request URL against `endpoint`
    ///
    /// The query string is assembled by hand so the property kind list keeps
    /// its literal commas; form encoding would turn them into `%2C`.
    pub fn to_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        let query = format!(
            "al=1&market={}&num_homes={}&ord=redfin-recommended-asc&page_number=1\
             &region_id={}&region_type={}&sold_within_days={}&sp=true&status=9&uipt={}&v=8",
            self.market,
            self.max_results,
            self.region_code,
            self.region_kind,
            self.lookback_days,
            self.property_types,
        );

        let mut url = Url::parse(endpoint)?;
        url.set_query(Some(&query));
        Ok(url)
    }
}

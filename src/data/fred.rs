//! FRED graph CSV download (`fredgraph.csv`).
//!
//! The graph export needs no API key, unlike the observations API.

use reqwest::blocking::Client;

use super::{FeedSource, FetchError};

const GRAPH_CSV_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// FRED series id for seasonally adjusted initial claims.
pub const SERIES_INITIAL_CLAIMS: &str = "ICSA";

/// Download URL for a series' graph CSV.
pub fn graph_csv_url(series_id: &str) -> String {
    format!("{GRAPH_CSV_URL}?id={series_id}")
}

pub struct FredCsvSource {
    client: Client,
    url: String,
}

impl FredCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn for_series(series_id: &str) -> Self {
        Self::new(graph_csv_url(series_id))
    }
}

impl FeedSource for FredCsvSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: resp.status().as_u16(),
            });
        }

        resp.text().map_err(|source| FetchError::Body {
            url: self.url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_embeds_series_id() {
        assert_eq!(
            graph_csv_url(SERIES_INITIAL_CLAIMS),
            "https://fred.stlouisfed.org/graph/fredgraph.csv?id=ICSA"
        );
    }

    #[test]
    fn fetch_returns_body_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/graph/fredgraph.csv")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "ICSA".into()))
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("observation_date,ICSA\n2025-01-04,211000\n")
            .create();

        let source = FredCsvSource::new(format!("{}/graph/fredgraph.csv?id=ICSA", server.url()));
        let raw = source.fetch().unwrap();

        mock.assert();
        assert!(raw.contains("2025-01-04,211000"));
    }

    #[test]
    fn non_success_status_is_a_fetch_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/graph/fredgraph.csv")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create();

        let source = FredCsvSource::new(format!("{}/graph/fredgraph.csv?id=NOPE", server.url()));
        match source.fetch() {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}

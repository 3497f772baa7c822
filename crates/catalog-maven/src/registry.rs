//! Registry clients for the two coordinate backends.
//!
//! [`GoogleMavenClient`] reads maven-metadata.xml from maven.google.com;
//! [`MavenCentralClient`] queries the search.maven.org Solr API. Both treat
//! transport and parse failures as "no results": the error is logged and the
//! caller sees an empty outcome.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use catalog_core::HttpClient;

use crate::error::{RegistryError, Result};
use crate::types::{Coordinate, LibraryRecord};

const GOOGLE_MAVEN_BASE: &str = "https://maven.google.com";
const MAVEN_CENTRAL_BASE: &str = "https://search.maven.org";

/// Rows requested when listing every version of one artifact.
const GAV_ROWS: usize = 200;

/// Client for the maven.google.com metadata tree.
#[derive(Clone)]
pub struct GoogleMavenClient {
    http: HttpClient,
    base_url: String,
}

impl GoogleMavenClient {
    pub fn new(http: HttpClient) -> Self {
        Self::with_base_url(http, GOOGLE_MAVEN_BASE)
    }

    /// Points the client at a different registry root (mirrors, tests).
    pub fn with_base_url(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Latest published version of `coordinate`, or `None` when the artifact
    /// is unknown there or the registry cannot be reached.
    pub async fn latest_version(&self, coordinate: &Coordinate) -> Option<String> {
        match self.try_latest_version(coordinate).await {
            Ok(found) => found,
            Err(err) => {
                tracing::debug!(%coordinate, %err, "metadata probe failed");
                None
            }
        }
    }

    /// Every version listed in the artifact's metadata, in file order.
    pub async fn all_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        match self.try_all_versions(coordinate).await {
            Ok(versions) => versions,
            Err(err) => {
                tracing::warn!(%coordinate, %err, "metadata version listing failed");
                Vec::new()
            }
        }
    }

    async fn try_latest_version(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        let data = self.http.get_bytes(&self.metadata_url(coordinate)).await?;
        parse_latest_version(&data)
    }

    async fn try_all_versions(&self, coordinate: &Coordinate) -> Result<Vec<String>> {
        let data = self.http.get_bytes(&self.metadata_url(coordinate)).await?;
        parse_version_list(&data)
    }

    fn metadata_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{base}/{group}/{artifact}/maven-metadata.xml",
            base = self.base_url,
            group = coordinate.group.replace('.', "/"),
            artifact = coordinate.artifact,
        )
    }
}

/// Client for the search.maven.org Solr index.
#[derive(Clone)]
pub struct MavenCentralClient {
    http: HttpClient,
    base_url: String,
}

impl MavenCentralClient {
    pub fn new(http: HttpClient) -> Self {
        Self::with_base_url(http, MAVEN_CENTRAL_BASE)
    }

    /// Points the client at a different registry root (mirrors, tests).
    pub fn with_base_url(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Runs one Solr query and returns whatever records it yields. Docs
    /// without any version field are dropped.
    pub async fn search(&self, query: &str, rows: usize) -> Vec<LibraryRecord> {
        match self.try_search(query, rows).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(query, %err, "search query failed");
                Vec::new()
            }
        }
    }

    /// Every version the gav core holds for one coordinate, in index order.
    pub async fn versions(&self, coordinate: &Coordinate) -> Vec<String> {
        match self.try_versions(coordinate).await {
            Ok(versions) => versions,
            Err(err) => {
                tracing::warn!(%coordinate, %err, "version query failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str, rows: usize) -> Result<Vec<LibraryRecord>> {
        let url = format!(
            "{base}/solrsearch/select?q={q}&rows={rows}&wt=json",
            base = self.base_url,
            q = urlencoding::encode(query),
        );

        let data = self.http.get_bytes(&url).await?;
        parse_search_response(&data)
    }

    async fn try_versions(&self, coordinate: &Coordinate) -> Result<Vec<String>> {
        let url = format!(
            "{base}/solrsearch/select?q=g:{group}+AND+a:{artifact}&core=gav&rows={GAV_ROWS}&wt=json",
            base = self.base_url,
            group = urlencoding::encode(&coordinate.group),
            artifact = urlencoding::encode(&coordinate.artifact),
        );

        let data = self.http.get_bytes(&url).await?;
        parse_gav_response(&data)
    }
}

#[derive(Deserialize)]
struct SolrSearchResponse {
    response: SolrSearchBody,
}

#[derive(Deserialize)]
struct SolrSearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

/// One Solr doc. The default core reports `latestVersion`, the gav core
/// reports `v`; unknown fields are ignored.
#[derive(Deserialize)]
struct SearchDoc {
    #[serde(default)]
    g: String,
    #[serde(default)]
    a: String,
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
    #[serde(rename = "v")]
    version: Option<String>,
}

fn parse_search_response(data: &[u8]) -> Result<Vec<LibraryRecord>> {
    let response: SolrSearchResponse = serde_json::from_slice(data)?;

    let records = response
        .response
        .docs
        .into_iter()
        .filter_map(|d| {
            let latest_version = d.latest_version.or(d.version)?;
            Some(LibraryRecord {
                coordinate: Coordinate::new(d.g, d.a),
                latest_version,
            })
        })
        .collect();

    Ok(records)
}

fn parse_gav_response(data: &[u8]) -> Result<Vec<String>> {
    let response: SolrSearchResponse = serde_json::from_slice(data)?;

    Ok(response
        .response
        .docs
        .into_iter()
        .filter_map(|d| d.version.or(d.latest_version))
        .collect())
}

/// Pulls the single best version out of maven-metadata.xml: the `<latest>`
/// tag when present, the `<release>` tag otherwise.
fn parse_latest_version(data: &[u8]) -> Result<Option<String>> {
    let content = metadata_str(data)?;
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut current_tag: Option<String> = None;
    let mut latest: Option<String> = None;
    let mut release: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| RegistryError::Xml {
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                current_tag = Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Event::Text(ref e) => {
                let Some(ref tag) = current_tag else { continue };
                match tag.as_str() {
                    "latest" if latest.is_none() => latest = Some(decode_text(e)),
                    "release" if release.is_none() => release = Some(decode_text(e)),
                    _ => {}
                }
            }
            Event::End(_) => current_tag = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(latest.or(release).filter(|v| !v.is_empty()))
}

/// Collects every `<version>` element under the `<versions>` node.
fn parse_version_list(data: &[u8]) -> Result<Vec<String>> {
    let content = metadata_str(data)?;
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut in_versions = false;
    let mut in_version = false;
    let mut versions = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| RegistryError::Xml {
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"versions" => in_versions = true,
                b"version" if in_versions => in_version = true,
                _ => {}
            },
            Event::Text(ref e) if in_version => {
                let version = decode_text(e);
                if !version.is_empty() {
                    versions.push(version);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"versions" => in_versions = false,
                b"version" => in_version = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(versions)
}

fn metadata_str(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data).map_err(|e| RegistryError::Xml {
        message: e.to_string(),
    })
}

fn decode_text(e: &quick_xml::events::BytesText) -> String {
    match e.decode() {
        Ok(cow) => {
            let s = cow.trim().to_string();
            quick_xml::escape::unescape(&s)
                .map(|c| c.into_owned())
                .unwrap_or(s)
        }
        Err(_) => String::from_utf8_lossy(e.as_ref()).trim().to_string(),
    }
}

//! Canonical query types.
//!
//! A [`Query`] is built once per inbound request by the request normalizer
//! and handed read-only to every adapter in the domain's chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of request, each with its own provider chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    TextChat,
    VisionAnalyze,
    MarketData,
}

impl Domain {
    /// All domains, in display order.
    pub const ALL: [Domain; 3] = [Domain::TextChat, Domain::VisionAnalyze, Domain::MarketData];

    /// The adapter capability a provider needs to serve this domain.
    pub fn required_capability(&self) -> crate::provider::Capability {
        use crate::provider::Capability;
        match self {
            Domain::TextChat => Capability::TextGenerate,
            Domain::VisionAnalyze => Capability::VisionAnalyze,
            Domain::MarketData => Capability::DatasetQuery,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::TextChat => write!(f, "text_chat"),
            Domain::VisionAnalyze => write!(f, "vision_analyze"),
            Domain::MarketData => write!(f, "market_data"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text_chat" => Ok(Domain::TextChat),
            "vision_analyze" => Ok(Domain::VisionAnalyze),
            "market_data" => Ok(Domain::MarketData),
            other => Err(format!("invalid domain: '{other}'")),
        }
    }
}

/// Well-known attribute names carried on a [`Query`].
pub mod attr {
    pub const CROP_TYPE: &str = "crop_type";
    pub const SOIL_TYPE: &str = "soil_type";
    pub const SEASON: &str = "season";
    pub const QUESTION: &str = "question";
    pub const DISEASE: &str = "disease";
    pub const SYMPTOMS: &str = "symptoms";
    pub const LOCATION: &str = "location";
}

/// Decoded image bytes plus their declared mime type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

// Image payloads can be several megabytes; keep them out of debug logs.
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Ordered name/value parameters (crop type, soil, season, location, ...).
///
/// Insertion order is preserved; setting an existing name replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    fn set(&mut self, name: &str, value: String) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A validated, provider-agnostic request.
///
/// Fields are private: a query is assembled through the `with_*` builder
/// methods and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    domain: Domain,
    text: Option<String>,
    image: Option<ImagePayload>,
    attributes: Attributes,
}

impl Query {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            text: None,
            image: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.set(name, value.into());
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Shorthand for `self.attributes().get(name)`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }
}

//! Top-level configuration.
//!
//! Every section defaults independently, so a JSON file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "classifier": { "ambiguity_score_gap": 0.1 },
//!   "session": { "ttl_secs": 600 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::dialog::RetrievalConfig;
use crate::error::Result;
use crate::session::SessionConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpdeskConfig {
    pub classifier: ClassifierConfig,
    pub session: SessionConfig,
    pub retrieval: RetrievalConfig,
}

impl HelpdeskConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.session.validate()?;
        self.retrieval.validate()
    }
}

use std::fs::File;
use std::path::{Path, PathBuf};

use eventwhisper_types::RawRecord;
use evtx::err::EvtxError;
use evtx::{EvtxParser, ParserSettings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open event log {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: EvtxError,
    },

    #[error("failed to decode record: {0}")]
    Decode(#[from] EvtxError),
}

/// Records of one `.evtx` file, decoded to JSON text on demand
pub struct EvtxSource {
    parser: EvtxParser<File>,
}

impl EvtxSource {
    /// Open a log file. Decoding stays on the calling thread.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let parser = EvtxParser::from_path(path)
            .map_err(|source| SourceError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .with_configuration(ParserSettings::default().num_threads(1));

        Ok(Self { parser })
    }

    /// Lazily yield records in file order
    pub fn records(&mut self) -> impl Iterator<Item = Result<RawRecord, SourceError>> + '_ {
        self.parser.records_json().map(|result| {
            result
                .map(|record| RawRecord::new(record.data, record.timestamp))
                .map_err(SourceError::from)
        })
    }
}

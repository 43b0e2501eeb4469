use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("sheet at {url} is empty")]
    Empty { url: String },

    #[error("sheet is missing required column \"{column}\"")]
    MissingColumn { column: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("notification contains no records")]
    NoRecords,

    #[error("notification record is missing {0}")]
    MissingField(&'static str),

    #[error("object {key} not found in bucket {bucket}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("access denied reading object {key} from bucket {bucket}")]
    ObjectAccessDenied { bucket: String, key: String },

    #[error("could not get object {key} from bucket {bucket}: {message}")]
    ObjectFetch {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("object content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("object content is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("order record must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("error writing item to table {table}: {message}")]
    TableWrite { table: String, message: String },

    #[error("error reading from table {table}: {message}")]
    TableRead { table: String, message: String },

    #[error("attribute {0} has a type that cannot be represented as JSON")]
    UnsupportedAttribute(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid output index: {0} (valid range: 1-8)")]
    InvalidOutputIndex(u8),
}

use smol_str::SmolStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no operation found{}", .0.as_ref().map(|name| format!(": `{name}`")).unwrap_or_default())]
    NoOperationFound(Option<SmolStr>),
}

pub type Result<TSuccess> = std::result::Result<TSuccess, Error>;

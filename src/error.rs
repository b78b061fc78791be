use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Datum error: {0}")]
    Datum(#[from] DatumError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Angle error: {0}")]
    Angle(#[from] AngleError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatumError {
    #[error("Unknown datum: {0}")]
    UnknownDatum(String),

    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("Invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleError {
    #[error("Malformed angle text: {0:?}")]
    MalformedAngleText(String),
}

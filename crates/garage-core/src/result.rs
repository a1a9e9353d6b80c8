use crate::error::GarageError;

pub type GarageResult<T> = Result<T, GarageError>;

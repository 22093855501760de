#[derive(Debug)]
pub enum ApplicationError {
    BadRequest(String),
    PayloadTooLarge,
    InternalError(String),
}

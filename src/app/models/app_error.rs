#[derive(Debug)]
pub struct AppError {
    pub message: String,
}

pub mod hasher;
pub mod multipart;
pub mod sqlx;
pub mod time;

pub mod upload_category;

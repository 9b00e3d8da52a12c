pub mod access_info;

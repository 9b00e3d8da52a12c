/// The two kinds of files a post may carry, each with its own directory and
/// per-request cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    Images,
    Documents,
}

impl UploadCategory {
    pub fn from_field_name(field_name: &str) -> Option<Self> {
        match field_name {
            "images" => Some(Self::Images),
            "documents" => Some(Self::Documents),
            _ => None,
        }
    }

    pub fn dir(&self) -> &'static str {
        match self {
            Self::Images => "uploads/images",
            Self::Documents => "uploads/documents",
        }
    }

    pub fn max_files(&self) -> usize {
        match self {
            Self::Images => 10,
            Self::Documents => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_multipart_field_names() {
        assert_eq!(
            UploadCategory::from_field_name("images"),
            Some(UploadCategory::Images)
        );
        assert_eq!(
            UploadCategory::from_field_name("documents"),
            Some(UploadCategory::Documents)
        );
        assert_eq!(UploadCategory::from_field_name("avatar"), None);
    }

    #[test]
    fn categories_have_distinct_dirs() {
        assert_ne!(
            UploadCategory::Images.dir(),
            UploadCategory::Documents.dir()
        );
    }
}

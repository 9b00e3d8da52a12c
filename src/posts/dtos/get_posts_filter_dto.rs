use serde::{Deserialize, Deserializer};

/// Published-feed pagination. Absent or non-numeric values fall back to the
/// defaults rather than failing the request.
#[derive(Debug, Deserialize)]
pub struct GetPostsFilterDto {
    #[serde(default, deserialize_with = "lenient_page_param")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_page_param")]
    pub limit: Option<u32>,
}

impl GetPostsFilterDto {
    pub fn page(&self) -> i64 {
        match self.page {
            Some(page) if page > 0 => page as i64,
            _ => 1,
        }
    }

    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit as i64,
            _ => 10,
        }
    }
}

fn lenient_page_param<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    Ok(raw.and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let dto: GetPostsFilterDto = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(dto.page(), 1);
        assert_eq!(dto.limit(), 10);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let dto: GetPostsFilterDto =
            serde_json::from_value(serde_json::json!({ "page": "abc", "limit": "-3" })).unwrap();

        assert_eq!(dto.page(), 1);
        assert_eq!(dto.limit(), 10);
    }

    #[test]
    fn zero_is_treated_as_absent() {
        let dto: GetPostsFilterDto =
            serde_json::from_value(serde_json::json!({ "page": "0", "limit": "0" })).unwrap();

        assert_eq!(dto.page(), 1);
        assert_eq!(dto.limit(), 10);
    }

    #[test]
    fn numeric_values_pass_through() {
        let dto: GetPostsFilterDto =
            serde_json::from_value(serde_json::json!({ "page": "2", "limit": "25" })).unwrap();

        assert_eq!(dto.page(), 2);
        assert_eq!(dto.limit(), 25);
    }
}

use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Limit/offset query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Pagination {
    /// Bounds both values so out-of-range input never reaches the database:
    /// Postgres rejects negative LIMIT/OFFSET at execution time.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_missing() {
        let p: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.clamped(), (20, 0));
    }

    #[test]
    fn negative_values_are_clamped() {
        let p = Pagination {
            limit: -1,
            offset: -50,
        };
        assert_eq!(p.clamped(), (1, 0));
    }

    #[test]
    fn oversized_limit_is_capped() {
        let p = Pagination {
            limit: 10_000,
            offset: 40,
        };
        assert_eq!(p.clamped(), (100, 40));
    }
}

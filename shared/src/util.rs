/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a `"table:uuid"` resource ID
pub fn new_id(table: &str) -> String {
    format!("{}:{}", table, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_prefix() {
        let id = new_id("menu");
        assert!(id.starts_with("menu:"));
        assert_eq!(id.len(), "menu:".len() + 32);
        assert_ne!(new_id("menu"), id);
    }
}

use serde::Deserialize;

/// Custom deserializer for Azure DevOps numeric ids (work items, pull requests).
///
/// Agents send ids as JSON integers; anything outside `1..=u32::MAX` is rejected
/// instead of being silently truncated.
pub fn deserialize_positive_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = i64::deserialize(deserializer)?;
    if id <= 0 {
        return Err(serde::de::Error::custom("id must be a positive integer"));
    }
    u32::try_from(id).map_err(|_| serde::de::Error::custom("id is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Args {
        #[serde(deserialize_with = "deserialize_positive_id")]
        id: u32,
    }

    #[test]
    fn test_accepts_positive_ids() {
        let args: Args = serde_json::from_str(r#"{"id": 5394169}"#).unwrap();
        assert_eq!(args.id, 5394169);
    }

    #[test]
    fn test_rejects_zero_negative_and_oversized_ids() {
        assert!(serde_json::from_str::<Args>(r#"{"id": 0}"#).is_err());
        assert!(serde_json::from_str::<Args>(r#"{"id": -3}"#).is_err());
        assert!(serde_json::from_str::<Args>(r#"{"id": 4294967296}"#).is_err());
        assert!(serde_json::from_str::<Args>(r#"{"id": "12"}"#).is_err());
    }
}

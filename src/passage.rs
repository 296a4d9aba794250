use crate::error::{Result, TypetrialError};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

static RESOURCE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/resources");

/// Number of rounds in a competitive session
pub const ROUND_COUNT: usize = 7;

/// The ordered passage set: one passage per round plus the practice text
#[derive(Deserialize, Clone, Debug)]
pub struct PassageSet {
    pub practice: String,
    pub rounds: Vec<String>,
}

impl PassageSet {
    /// Load the passages bundled with the binary
    pub fn bundled() -> Result<Self> {
        let set: PassageSet = from_str(read_resource("passages.json")?)?;
        if set.rounds.is_empty() {
            return Err(TypetrialError::Resource(
                "passages.json contains no rounds".to_string(),
            ));
        }
        Ok(set)
    }

    pub fn round(&self, index: usize) -> Option<&str> {
        self.rounds.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

pub(crate) fn read_resource(file_name: &str) -> Result<&'static str> {
    let file = RESOURCE_DIR
        .get_file(file_name)
        .ok_or_else(|| TypetrialError::Resource(format!("{file_name} not found")))?;

    file.contents_utf8()
        .ok_or_else(|| TypetrialError::Resource(format!("{file_name} is not valid utf-8")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_passages() {
        let set = PassageSet::bundled().unwrap();

        assert_eq!(set.len(), ROUND_COUNT);
        assert!(set.rounds.iter().all(|p| !p.is_empty()));
        assert_eq!(set.round(0), Some(set.practice.as_str()));
        assert!(set.round(ROUND_COUNT).is_none());
    }

    #[test]
    fn test_passage_deserialization() {
        let json_data = r#"
        {
            "practice": "warm up",
            "rounds": ["one", "two"]
        }
        "#;

        let set: PassageSet = from_str(json_data).expect("Failed to deserialize passages");

        assert_eq!(set.practice, "warm up");
        assert_eq!(set.rounds, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_read_missing_resource() {
        let result = read_resource("nonexistent.json");
        assert!(matches!(result, Err(TypetrialError::Resource(_))));
    }
}

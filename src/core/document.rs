use crate::domain::model::OutputRecord;
use crate::utils::error::Result;

pub const DOCUMENT_EXTENSION: &str = "yaml";

pub fn document_name(output_name: &str) -> String {
    format!("{}.{}", output_name, DOCUMENT_EXTENSION)
}

pub fn render_document(record: &OutputRecord) -> Result<String> {
    Ok(serde_yaml::to_string(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> OutputRecord {
        OutputRecord {
            author: "alice".to_string(),
            description: "a test run".to_string(),
            config: json!({"team": ["Bennett"]}),
        }
    }

    #[test]
    fn test_document_name() {
        assert_eq!(document_name("sample"), "sample.yaml");
    }

    #[test]
    fn test_render_document_keys_in_order() {
        let text = render_document(&sample()).unwrap();

        let author = text.find("author:").unwrap();
        let description = text.find("description:").unwrap();
        let config = text.find("config:").unwrap();
        assert!(author < description && description < config);

        let parsed: OutputRecord = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_render_document_is_deterministic() {
        let record = OutputRecord {
            config: json!({"z": 1, "a": {"nested": [1, 2, 3]}, "m": null}),
            ..sample()
        };
        assert_eq!(
            render_document(&record).unwrap(),
            render_document(&record).unwrap()
        );
    }

    #[test]
    fn test_render_multiline_string_config() {
        let config = "bennett char lvl=90/90 cons=6 talent=9,9,9;\nactive bennett;\n";
        let record = OutputRecord {
            config: json!(config),
            ..sample()
        };
        let parsed: OutputRecord =
            serde_yaml::from_str(&render_document(&record).unwrap()).unwrap();
        assert_eq!(parsed.config, json!(config));
    }
}

//! JSON output shapes for the CLI.

use serde::Serialize;

use framestat_search::StatOptions;
use framestat_types::{DimensionTriple, StatResult};

/// Serializable view of one stat collection.
#[derive(Debug, Serialize)]
pub struct StatReport {
    pub query: String,
    pub filter_field: String,
    pub filter_values: Vec<u64>,
    pub scanned: u64,
    pub admitted: u64,
    pub unique_docs_frames: Vec<(u64, u64)>,
    pub unique_docs: Vec<u64>,
    pub unique_frames: Vec<u64>,
    pub unique_sentences: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<DimensionTriple>>,
}

impl StatReport {
    pub fn new(query: &str, options: &StatOptions, result: &StatResult) -> Self {
        Self {
            query: query.to_string(),
            filter_field: options.effective_filter_field().to_string(),
            filter_values: options.filter_values.iter().collect(),
            scanned: result.num_scanned(),
            admitted: result.num_admitted(),
            unique_docs_frames: result.unique_docs_frames().collect(),
            unique_docs: result.unique_docs().to_vec(),
            unique_frames: result.unique_frames().to_vec(),
            unique_sentences: result.unique_sentences().to_vec(),
            hits: result.hits().map(<[DimensionTriple]>::to_vec),
        }
    }
}

/// Document and segment counts of an index.
#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub index_path: String,
    pub num_docs: u64,
    pub num_segments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use framestat_types::StatAccumulator;

    #[test]
    fn test_report_json_shape() {
        let mut acc = StatAccumulator::new();
        acc.admit(DimensionTriple::new(3, 5, 7));
        acc.admit(DimensionTriple::new(1, 1, 1));
        acc.reject();
        let result = acc.finish();

        let options = StatOptions::new().with_filter([1, 5]);
        let report = StatReport::new("sea", &options, &result);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["filter_field"], "frame_id");
        assert_eq!(json["filter_values"], serde_json::json!([1, 5]));
        assert_eq!(json["scanned"], 3);
        assert_eq!(
            json["unique_docs_frames"],
            serde_json::json!([[1, 1], [3, 5]])
        );
        assert!(json.get("hits").is_none());
    }

    #[test]
    fn test_report_with_hits() {
        let mut acc = StatAccumulator::recording_hits();
        acc.admit(DimensionTriple::new(2, 4, 6));
        let result = acc.finish();

        let report = StatReport::new("sea", &StatOptions::new(), &result);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["hits"],
            serde_json::json!([{"doc": 2, "frame": 4, "sentence": 6}])
        );
    }
}

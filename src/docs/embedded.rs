use super::index::Index;
use super::searchdata::parse_search_data;
use lazy_static::lazy_static;

/// Search data bundled at compile time, one fragment of the UART/stdio
/// library's documentation.
pub static SAMPLE_SEARCH_DATA: &str = include_str!("../../data/sample/all_75.js");

pub const SAMPLE_FILE_NAME: &str = "all_75.js";

lazy_static! {
    /// Bundled sample index, initialized on first access
    pub static ref SAMPLE: Index = load_sample();
}

/// Parse the bundled fragment and build its index
fn load_sample() -> Index {
    let start = std::time::Instant::now();

    let entries =
        parse_search_data(SAMPLE_SEARCH_DATA).expect("bundled search data should parse");
    let parse_time = start.elapsed();

    let index_start = std::time::Instant::now();
    let index = Index::from_entries(entries).expect("bundled search data should be well formed");
    let index_time = index_start.elapsed();

    tracing::debug!(
        ?parse_time,
        ?index_time,
        symbols = index.len(),
        anchors = index.anchor_count(),
        "bundled sample loaded"
    );

    index
}

/// Get a reference to the bundled sample index
pub fn get_sample_index() -> &'static Index {
    &SAMPLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_load() {
        let index = get_sample_index();
        assert!(!index.is_empty(), "Sample should contain symbols");
        assert!(
            index.records().all(|r| !r.anchors.is_empty()),
            "Every record should have an anchor"
        );
    }

    #[test]
    fn test_function_lookup() {
        let index = get_sample_index();

        let getc = index.get("UARTgetc");
        assert!(getc.is_some(), "Should find UARTgetc");

        if let Some(record) = getc {
            assert_eq!(record.anchors.len(), 2);
            assert_eq!(record.distinct_anchors().len(), 1);
            assert_eq!(record.primary_anchor().unwrap().source_file, "uartstdio.c");
        }
    }

    #[test]
    fn test_struct_field_lookup() {
        let index = get_sample_index();

        let year = index.get("usYear").expect("Should find usYear");
        assert_eq!(year.primary_anchor().unwrap().context_label, "tTime");
        assert_eq!(year.primary_anchor().unwrap().page(), "../structt_time.html");
    }

    #[test]
    fn test_overloaded_descriptions_kept() {
        let index = get_sample_index();

        let init = index.get("UARTStdioInit").expect("Should find UARTStdioInit");
        assert_eq!(init.distinct_anchors().len(), 2);
        assert_eq!(
            init.anchors[1].context_label,
            "UARTStdioInit(unsigned long ulPortNum)"
        );
    }

    #[test]
    fn test_search() {
        let index = get_sample_index();

        let results = index.query("str");
        assert!(!results.is_empty(), "Should find symbols matching 'str'");
    }
}
